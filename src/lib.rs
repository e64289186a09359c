//! Numeric kernel for drawing and riding a roller coaster track.
//!
//! Fits a natural cubic spline through control points, evaluates its height, slope, area and
//! curvature, finds where it crosses a horizontal level, and maps between world and screen
//! coordinates with a homogeneous pan/zoom/flip camera.
//!
//! # Example
//! ```
//! use coaster_spline::{fit, roots, Camera, CameraSettings, Point, ZoomCamera};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 0.0)
//! ];
//! let spline = fit(&points);
//!
//! assert_approx_eq!(spline.evaluate(0.5), 0.6875, 1e-9);
//! assert_approx_eq!(spline.definite_integral(), 1.25, 1e-9);
//! assert_eq!(roots::find_crossings(&spline, 0.5).len(), 2);
//!
//! let camera = ZoomCamera::from_settings(CameraSettings::default().with_canvas_height(100.0));
//! let screen = camera.transform_point(Point::new(1.0, spline.evaluate(1.0)));
//! assert_approx_eq!(screen.y, 99.0, 1e-9);
//! ```

mod camera;
mod coaster;
mod error;
mod fit;
mod function;
mod point;
mod polynomial;
mod spline;
mod transform;
pub mod roots;
pub mod stepping;

pub use camera::{Camera, CameraSettings, StandardCamera, ZoomCamera};
pub use coaster::{Coaster, CubicCoaster};
pub use error::SplineError;
pub use fit::{fit, try_fit};
pub use function::ScalarFunction;
pub use point::Point;
pub use polynomial::Cubic;
pub use spline::PiecewiseCubic;
pub use transform::{
    backward_solve, forward_solve, AffineTransform2D, LinearSolver, PivotedLu, UnpivotedLu,
};
