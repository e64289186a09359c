//! World/screen mapping used by the drawing layer.
//!
//! World coordinates have `y` pointing up; screen coordinates have `y` pointing down from the
//! top of a canvas of height `canvas_height`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{point::Point, transform::AffineTransform2D};

/// Pan and zoom state of a camera.
/// # Example
/// ```
/// use coaster_spline::{CameraSettings, Point};
///
/// let settings = CameraSettings::default()
///     .with_canvas_height(600.0)
///     .with_zoom(2.0);
///
/// assert_eq!(settings.top_left, Point::ZERO);
/// assert_eq!(settings.zoom, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraSettings {
    pub top_left: Point,
    pub zoom: f64,
    pub canvas_height: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings { top_left: Point::ZERO, zoom: 1.0, canvas_height: 0.0 }
    }
}

impl CameraSettings {
    #[must_use]
    pub fn with_top_left(mut self, top_left: Point) -> Self {
        self.top_left = top_left;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_canvas_height(mut self, canvas_height: f64) -> Self {
        self.canvas_height = canvas_height;
        self
    }
}

pub trait Camera {
    fn transform_point(&self, point: Point) -> Point;
    fn transform_x(&self, x: f64) -> f64;
    fn transform_y(&self, y: f64) -> f64;
    fn inverse_transform_point(&self, point: Point) -> Point;
    fn inverse_transform_x(&self, x: f64) -> f64;
    fn inverse_transform_y(&self, y: f64) -> f64;
    fn top_left(&self) -> Point;
    fn update_top_left(&mut self, point: Point);
}

/// Pan-only camera in closed form: `x_s = x - left`, `y_s = H - (y - top)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardCamera {
    top_left: Point,
    canvas_height: f64,
}

impl StandardCamera {
    pub fn new(canvas_height: f64) -> Self {
        StandardCamera { top_left: Point::ZERO, canvas_height }
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }
}

impl Camera for StandardCamera {
    fn transform_point(&self, point: Point) -> Point {
        Point::new(self.transform_x(point.x), self.transform_y(point.y))
    }

    fn transform_x(&self, x: f64) -> f64 {
        x - self.top_left.x
    }

    fn transform_y(&self, y: f64) -> f64 {
        self.canvas_height - (y - self.top_left.y)
    }

    fn inverse_transform_point(&self, point: Point) -> Point {
        Point::new(self.inverse_transform_x(point.x), self.inverse_transform_y(point.y))
    }

    fn inverse_transform_x(&self, x: f64) -> f64 {
        x + self.top_left.x
    }

    fn inverse_transform_y(&self, y: f64) -> f64 {
        self.canvas_height - y + self.top_left.y
    }

    fn top_left(&self) -> Point {
        self.top_left
    }

    fn update_top_left(&mut self, point: Point) {
        self.top_left = point;
    }
}

/// Pan and zoom camera backed by a homogeneous transform,
/// `scale(zoom) · translate(-left, H / zoom + top) · flip()`, so that
/// `x_s = zoom (x - left)` and `y_s = H - zoom (y - top)`.
///
/// The transform is rebuilt whenever the pan or the zoom changes.
/// # Example
/// ```
/// use coaster_spline::{Camera, CameraSettings, Point, ZoomCamera};
///
/// let settings = CameraSettings::default().with_canvas_height(100.0).with_zoom(2.0);
/// let camera = ZoomCamera::from_settings(settings);
///
/// assert_eq!(camera.transform_point(Point::new(3.0, 4.0)), Point::new(6.0, 92.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCamera {
    settings: CameraSettings,
    transform: AffineTransform2D,
}

impl ZoomCamera {
    pub fn new(canvas_height: f64) -> Self {
        ZoomCamera::from_settings(CameraSettings::default().with_canvas_height(canvas_height))
    }

    pub fn from_settings(settings: CameraSettings) -> Self {
        ZoomCamera { settings, transform: ZoomCamera::build_transform(&settings) }
    }

    pub fn settings(&self) -> CameraSettings {
        self.settings
    }

    pub fn transform(&self) -> &AffineTransform2D {
        &self.transform
    }

    pub fn zoom(&self) -> f64 {
        self.settings.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        *self = ZoomCamera::from_settings(self.settings.with_zoom(zoom));
    }

    fn build_transform(settings: &CameraSettings) -> AffineTransform2D {
        let CameraSettings { top_left, zoom, canvas_height } = *settings;
        AffineTransform2D::scale(zoom)
            * AffineTransform2D::translate(-top_left.x, canvas_height / zoom + top_left.y)
            * AffineTransform2D::flip()
    }
}

impl Camera for ZoomCamera {
    fn transform_point(&self, point: Point) -> Point {
        self.transform.apply(point)
    }

    fn transform_x(&self, x: f64) -> f64 {
        self.transform.transform_x(x)
    }

    fn transform_y(&self, y: f64) -> f64 {
        self.transform.transform_y(y)
    }

    fn inverse_transform_point(&self, point: Point) -> Point {
        self.transform.invert_apply(point)
    }

    fn inverse_transform_x(&self, x: f64) -> f64 {
        self.transform.inverse_transform_x(x)
    }

    fn inverse_transform_y(&self, y: f64) -> f64 {
        self.transform.inverse_transform_y(y)
    }

    fn top_left(&self) -> Point {
        self.settings.top_left
    }

    fn update_top_left(&mut self, point: Point) {
        *self = ZoomCamera::from_settings(self.settings.with_top_left(point));
    }
}
