extern crate coaster_spline;

use coaster_spline::{Coaster, CubicCoaster, Point};

fn main() {
    env_logger::init();

    let coaster = CubicCoaster::from_points(&[
        Point::new(0.0, 120.0),
        Point::new(80.0, 20.0),
        Point::new(160.0, 90.0),
        Point::new(240.0, 40.0),
        Point::new(320.0, 60.0),
    ]);

    println!("area: {:.2}", coaster.area());
    println!("max acceleration: {:.4}", coaster.max_acceleration());
    println!("rail contacts at 50: {:?}", coaster.rail_contacts(50.0));

    println!("x;y;slant");
    for point in coaster.profile(0.0, 320.0, 10.0) {
        println!("{:.2};{:.2};{:.4}", point.x, point.y, coaster.slant(point.x));
    }
}
