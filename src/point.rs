use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point in the plane. Used both for spline control points (knots the user drags around)
/// and for world/screen coordinates passed through a camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Point with both coordinates set to NaN. Returned by solvers that could not invert a matrix.
    pub const NAN: Point = Point { x: f64::NAN, y: f64::NAN };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Total order on the `x` coordinate, used to sort control points before fitting.
    /// `y` does not take part in the comparison.
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    /// use coaster_spline::Point;
    ///
    /// let left = Point::new(1.0, 5.0);
    /// let right = Point::new(2.0, -5.0);
    ///
    /// assert_eq!(left.cmp_x(&right), Ordering::Less);
    /// assert_eq!(left.cmp_x(&Point::new(1.0, 0.0)), Ordering::Equal);
    /// ```
    pub fn cmp_x(&self, other: &Point) -> Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}
