//! Natural cubic spline fitting.

use crate::{error::SplineError, point::Point, polynomial::Cubic, spline::PiecewiseCubic};

/// Knots closer than this are treated as having equal x values by [try_fit].
const MIN_KNOT_SPACING: f64 = 1e-16;

/// Fits a natural cubic spline (zero second derivative at both ends) through `points`.
///
/// The points are sorted by `x` first. Fewer than 2 points give a spline without segments
/// that evaluates to 0 everywhere. Input is not validated: equal x values produce a
/// zero-width segment and non-finite coefficients. Use [try_fit] to reject such input.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::{fit, Point};
///
/// let spline = fit(&[Point::new(2.0, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
///
/// assert_approx_eq!(spline.evaluate(1.0), 1.0, 1e-9);
/// assert_approx_eq!(spline.second_derivative(0.0), 0.0, 1e-9);
/// assert_approx_eq!(spline.second_derivative(2.0), 0.0, 1e-9);
/// ```
pub fn fit(points: &[Point]) -> PiecewiseCubic {
    let mut points = points.to_vec();
    points.sort_by(Point::cmp_x);

    let x: Vec<f64> = points.iter().map(|p| p.x).collect();
    if points.len() < 2 {
        return PiecewiseCubic::from_parts(x, Vec::new());
    }

    let n = points.len() - 1;
    log::trace!("fitting natural spline through {} points", points.len());

    // interval widths and slopes
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let m: Vec<f64> = points
        .windows(2)
        .zip(h.iter())
        .map(|(w, width)| (w[1].y - w[0].y) / width)
        .collect();

    let z = second_derivatives(&h, &m);

    let segments = (0..n)
        .map(|i| {
            let a = (z[i + 1] - z[i]) / (6.0 * h[i]);
            let b = z[i] / 2.0;
            let c = m[i] - h[i] * (2.0 * z[i] + z[i + 1]) / 6.0;
            let d = points[i].y;
            Cubic::from_local(a, b, c, d, x[i])
        })
        .collect();

    PiecewiseCubic::from_parts(x, segments)
}

/// Same as [fit], but rejects input that would give a spline with non-finite coefficients.
/// # Errors
/// [SplineError::NotEnoughPoints] for fewer than 2 points, [SplineError::NonFinitePoint] for
/// NaN or infinite coordinates and [SplineError::DuplicateX] when two points share an x value.
/// ```
/// use coaster_spline::{try_fit, Point, SplineError};
///
/// let spline = try_fit(&[Point::new(0.0, 1.0), Point::new(0.0, 2.0), Point::new(1.0, 0.0)]);
/// assert_eq!(spline, Err(SplineError::DuplicateX { x: 0.0 }));
/// ```
pub fn try_fit(points: &[Point]) -> Result<PiecewiseCubic, SplineError> {
    if points.len() < 2 {
        log::debug!("rejecting spline with {} points", points.len());
        return Err(SplineError::NotEnoughPoints(points.len()));
    }

    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        log::debug!("rejecting non-finite point {:?}", points[index]);
        return Err(SplineError::NonFinitePoint { index });
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(Point::cmp_x);
    if let Some(w) = sorted.windows(2).find(|w| w[1].x - w[0].x < MIN_KNOT_SPACING) {
        log::debug!("rejecting duplicate x value {}", w[0].x);
        return Err(SplineError::DuplicateX { x: w[0].x });
    }

    Ok(fit(&sorted))
}

/// Solves the tridiagonal system for the second derivatives `z` at the knots,
/// with `z[0] = z[n] = 0`.
fn second_derivatives(h: &[f64], m: &[f64]) -> Vec<f64> {
    let n = h.len();
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut z = vec![0.0; n + 1];

    // a single segment has no interior knots
    if n > 1 {
        u[1] = 2.0 * (h[0] + h[1]);
        v[1] = 6.0 * (m[1] - m[0]);
        for i in 2..n {
            let tmp = h[i - 1] / u[i - 1];
            u[i] = 2.0 * (h[i - 1] + h[i]) - h[i - 1] * tmp;
            v[i] = 6.0 * (m[i] - m[i - 1]) - v[i - 1] * tmp;
        }
    }

    for i in (1..n).rev() {
        z[i] = (v[i] - h[i] * z[i + 1]) / u[i];
    }
    z
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn two_points_give_a_line() {
        let eps = 1e-12;
        let spline = fit(&[Point::new(1.0, 2.0), Point::new(3.0, 6.0)]);

        assert_eq!(spline.segments().len(), 1);
        let segment = spline.segments()[0];
        assert_approx_eq!(segment.a, 0.0, eps);
        assert_approx_eq!(segment.b, 0.0, eps);
        assert_approx_eq!(segment.c, 2.0, eps);
        assert_approx_eq!(segment.d, 0.0, eps);
    }

    #[test]
    fn known_second_derivatives() {
        let eps = 1e-12;
        // uniform spacing 1, slopes 1, -1, 1: z1 and z2 solve
        // 4 z1 + z2 = -12, z1 + 4 z2 = 12
        let z = second_derivatives(&[1.0, 1.0, 1.0], &[1.0, -1.0, 1.0]);

        assert_approx_eq!(z[0], 0.0, eps);
        assert_approx_eq!(z[1], -4.0, eps);
        assert_approx_eq!(z[2], 4.0, eps);
        assert_approx_eq!(z[3], 0.0, eps);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let sorted = fit(&[Point::new(0.0, 1.0), Point::new(1.0, -1.0), Point::new(3.0, 2.0)]);
        let shuffled = fit(&[Point::new(3.0, 2.0), Point::new(0.0, 1.0), Point::new(1.0, -1.0)]);

        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn too_few_points() {
        let spline = fit(&[Point::new(1.0, 1.0)]);
        assert_eq!(spline.breakpoints(), &[1.0]);
        assert!(spline.segments().is_empty());

        assert_eq!(try_fit(&[]), Err(SplineError::NotEnoughPoints(0)));
        assert_eq!(try_fit(&[Point::new(1.0, 1.0)]), Err(SplineError::NotEnoughPoints(1)));
    }

    #[test]
    fn duplicate_x_is_not_validated_by_fit() {
        let spline = fit(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0)]);

        assert!(spline.segments().iter().any(|s| !s.d.is_finite() || !s.a.is_finite() || !s.c.is_finite()));
    }

    #[test]
    fn duplicate_x_gives_nan_max_second_derivative() {
        let spline = fit(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0)]);

        for x in spline.breakpoints() {
            assert!(spline.second_derivative(*x).is_nan());
        }
        assert!(spline.max_second_derivative().is_nan());
    }

    #[test]
    fn try_fit_rejects_bad_input() {
        let spline = try_fit(&[Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]);
        assert_eq!(spline, Err(SplineError::NonFinitePoint { index: 1 }));

        let spline = try_fit(&[Point::new(2.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 3.0)]);
        assert_eq!(spline, Err(SplineError::DuplicateX { x: 2.0 }));
    }

    #[test]
    fn try_fit_matches_fit() {
        let points = [Point::new(0.0, 3.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0), Point::new(4.0, 0.0)];

        assert_eq!(try_fit(&points), Ok(fit(&points)));
    }
}
