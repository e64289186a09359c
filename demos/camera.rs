extern crate coaster_spline;

use coaster_spline::{fit, Camera, CameraSettings, Point, ZoomCamera};

fn main() {
    env_logger::init();

    let spline = fit(&[
        Point::new(0.0, 1.0),
        Point::new(1.0, -1.0),
        Point::new(2.0, 0.0),
        Point::new(4.0, 3.0),
        Point::new(5.0, 1.0),
    ]);

    let mut camera = ZoomCamera::from_settings(
        CameraSettings::default()
            .with_canvas_height(480.0)
            .with_zoom(60.0)
            .with_top_left(Point::new(-0.5, 4.0)),
    );

    println!("screen_x;screen_y;world_x;world_y");
    for world in spline.sample(0.0, 5.0, 0.25) {
        let screen = camera.transform_point(world);
        let back = camera.inverse_transform_point(screen);
        println!("{:.2};{:.2};{:.4};{:.4}", screen.x, screen.y, back.x, back.y);
    }

    camera.update_top_left(Point::new(1.0, 4.0));
    camera.set_zoom(120.0);
    println!("after pan and zoom, x = 2 maps to {:.2}", camera.transform_x(2.0));
}
