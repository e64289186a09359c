//! Roller coaster track built on a fitted spline.

use crate::{fit::fit, point::Point, roots, spline::PiecewiseCubic};

/// Queries the simulation and drawing code make against a track.
pub trait Coaster {
    /// Track height at `x`, 0 outside the track.
    fn height(&self, x: f64) -> f64;

    /// Slope of the track at `x`, 0 outside the track.
    fn slant(&self, x: f64) -> f64;

    /// Area between the track and the ground.
    fn area(&self) -> f64;

    /// Largest curvature term sampled at the knots.
    fn max_acceleration(&self) -> f64;
}

/// A [Coaster] whose track is a natural cubic spline through the user's control points.
/// Moving a control point means building a new coaster with [CubicCoaster::from_points].
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::{Coaster, CubicCoaster, Point};
///
/// let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
/// let coaster = CubicCoaster::from_points(&points);
///
/// assert_approx_eq!(coaster.height(1.0), 1.0, 1e-9);
/// assert_approx_eq!(coaster.area(), 1.25, 1e-9);
/// assert_eq!(coaster.rail_contacts(0.5).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CubicCoaster {
    spline: PiecewiseCubic,
}

impl CubicCoaster {
    pub fn new(spline: PiecewiseCubic) -> Self {
        CubicCoaster { spline }
    }

    pub fn from_points(points: &[Point]) -> Self {
        CubicCoaster { spline: fit(points) }
    }

    pub fn spline(&self) -> &PiecewiseCubic {
        &self.spline
    }

    /// Positions where the track passes through height `level`.
    pub fn rail_contacts(&self, level: f64) -> Vec<f64> {
        roots::find_crossings(&self.spline, level)
    }

    /// Track points `(x, height)` every `precision` units from `start` to `end`, the polyline
    /// the rail and the scaffolds are stroked from.
    pub fn profile(&self, start: f64, end: f64, precision: f64) -> Vec<Point> {
        self.spline.sample(start, end, precision)
    }
}

impl Coaster for CubicCoaster {
    fn height(&self, x: f64) -> f64 {
        self.spline.evaluate(x)
    }

    fn slant(&self, x: f64) -> f64 {
        self.spline.derivative(x)
    }

    fn area(&self) -> f64 {
        self.spline.definite_integral()
    }

    fn max_acceleration(&self) -> f64 {
        self.spline.max_second_derivative()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn track() -> CubicCoaster {
        CubicCoaster::from_points(&[
            Point::new(0.0, 10.0),
            Point::new(10.0, 2.0),
            Point::new(20.0, 6.0),
            Point::new(30.0, 1.0),
        ])
    }

    #[test]
    fn delegates_to_spline() {
        let coaster = track();
        let spline = coaster.spline();

        for x in [0.0, 4.5, 10.0, 27.0] {
            assert_eq!(coaster.height(x), spline.evaluate(x));
            assert_eq!(coaster.slant(x), spline.derivative(x));
        }
        assert_eq!(coaster.area(), spline.definite_integral());
        assert_eq!(coaster.max_acceleration(), spline.max_second_derivative());
        assert!(coaster.max_acceleration() > 0.0);
    }

    #[test]
    fn flat_track() {
        let coaster = CubicCoaster::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

        assert_eq!(coaster.height(5.0), 0.0);
        assert_eq!(coaster.slant(5.0), 0.0);
        assert_eq!(coaster.max_acceleration(), 0.0);
        assert_eq!(coaster.area(), 0.0);
    }

    #[test]
    fn rail_contacts_lie_on_track() {
        let eps = 1e-6;
        let coaster = track();
        let contacts = coaster.rail_contacts(4.0);

        assert!(!contacts.is_empty());
        for window in contacts.windows(2) {
            assert!(window[0] < window[1]);
        }
        for x in contacts {
            assert_approx_eq!(coaster.height(x), 4.0, eps);
        }
    }

    #[test]
    fn profile_steps() {
        let coaster = track();
        let profile = coaster.profile(0.0, 30.0, 5.0);

        assert_eq!(profile.len(), 7);
        assert_eq!(profile[2], Point::new(10.0, coaster.height(10.0)));
        assert!(coaster.profile(0.0, 30.0, -1.0).is_empty());
    }

    #[test]
    fn trait_object() {
        let coaster: Box<dyn Coaster> = Box::new(track());
        assert_approx_eq!(coaster.height(20.0), 6.0, 1e-9);
        assert_eq!(coaster.height(31.0), 0.0);
    }
}
