//! Root isolation and bisection for cubics, and level crossings of a whole spline.

use crate::{function::ScalarFunction, polynomial::Cubic, spline::PiecewiseCubic};

/// Bisection stops once the bracketing interval is narrower than this.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Sign class of a function value. Zero is its own class, so a bracket `[0, +]` counts as a
/// sign change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// NaN is classified as [Sign::Zero].
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

/// Refines a root of `f` bracketed by `[low, high]` by bisection.
///
/// The sign of `f` at the current `low` end is the anchor: a midpoint with the same sign
/// replaces `low`, anything else replaces `high`. A midpoint where `f` is exactly zero is
/// returned immediately. Otherwise the loop runs while `high - low > epsilon` and the centre
/// of the last bracket is returned.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::roots::bisect;
///
/// let root = bisect(&|t: f64| t * t - 2.0, 0.0, 2.0, 1e-12);
/// assert_approx_eq!(root, 2.0_f64.sqrt(), 1e-9);
/// ```
pub fn bisect<F: ScalarFunction + ?Sized>(f: &F, mut low: f64, mut high: f64, epsilon: f64) -> f64 {
    let mut low_sign = Sign::of(f.value(low));

    while high - low > epsilon {
        let mid = (low + high) / 2.0;
        // Stop when halving no longer moves the ends.
        if mid <= low || mid >= high {
            break;
        }
        let mid_sign = Sign::of(f.value(mid));
        if mid_sign == Sign::Zero {
            return mid;
        }
        if mid_sign == low_sign {
            low = mid;
            low_sign = mid_sign;
        } else {
            high = mid;
        }
    }
    (low + high) / 2.0
}

/// Critical points of `a t^3 + b t^2 + c t + d`, i.e. roots of `3a t^2 + 2b t + c`.
///
/// A cubic with `a == 0` exactly degrades to a parabola whose only critical point is
/// `-c / 2b`; a linear or constant function has none.
fn critical_points(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        if b == 0.0 {
            return vec![];
        }
        return vec![-c / (2.0 * b)];
    }

    let discriminant = (2.0 * b).powi(2) - 12.0 * a * c;
    if discriminant == 0.0 {
        vec![-2.0 * b / (6.0 * a)]
    } else if discriminant > 0.0 {
        let root = discriminant.sqrt();
        vec![(-2.0 * b + root) / (6.0 * a), (-2.0 * b - root) / (6.0 * a)]
    } else {
        vec![]
    }
}

/// Roots of `a t^3 + b t^2 + c t + d` inside `[low, high]`.
///
/// The interval is cut at the critical points lying strictly inside it, so every piece is
/// monotonic and holds at most one root. Each piece whose end values fall in different
/// [Sign] classes is refined with [bisect]. Roots come back in increasing order.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::roots::bounded_cubic_roots;
///
/// // x - 4 = 0
/// let roots = bounded_cubic_roots(0.0, 0.0, 1.0, -4.0, 0.0, 10.0, 1e-9);
///
/// assert_eq!(roots.len(), 1);
/// assert_approx_eq!(roots[0], 4.0, 1e-6);
/// ```
pub fn bounded_cubic_roots(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    low: f64,
    high: f64,
    epsilon: f64,
) -> Vec<f64> {
    let cubic = Cubic::new(a, b, c, d);

    let mut borders = vec![low];
    let mut inner: Vec<f64> = critical_points(a, b, c)
        .into_iter()
        .filter(|t| low < *t && *t < high)
        .collect();
    inner.sort_by(f64::total_cmp);
    borders.extend(inner);
    borders.push(high);

    let mut roots = Vec::new();
    for border in borders.windows(2) {
        let (border_low, border_high) = (border[0], border[1]);
        if Sign::of(cubic.evaluate(border_low)) != Sign::of(cubic.evaluate(border_high)) {
            roots.push(bisect(&cubic, border_low, border_high, epsilon));
        }
    }
    roots
}

/// Every `t` where `spline` equals `level`, in increasing order.
///
/// Each segment's cubic is shifted by `level` and searched over its own `[x[i], x[i+1]]`.
/// A crossing sitting on a shared border can be found from both sides, each copy within
/// `epsilon` of the border, so results closer than `2 * epsilon` to the previous one are dropped.
pub fn all_intersections(spline: &PiecewiseCubic, level: f64, epsilon: f64) -> Vec<f64> {
    let breakpoints = spline.breakpoints();
    let mut crossings: Vec<f64> = Vec::new();

    for (i, segment) in spline.segments().iter().enumerate() {
        let found = segment.shifted(level).roots_in(breakpoints[i], breakpoints[i + 1], epsilon);
        for t in found {
            match crossings.last() {
                Some(last) if (t - last).abs() <= 2.0 * epsilon => {}
                _ => crossings.push(t),
            }
        }
    }
    log::trace!("found {} crossings of level {}", crossings.len(), level);
    crossings
}

/// Crossings of `level` with the default tolerance.
pub fn find_crossings(spline: &PiecewiseCubic, level: f64) -> Vec<f64> {
    all_intersections(spline, level, DEFAULT_EPSILON)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{fit::fit, point::Point};

    #[test]
    fn sign_classes() {
        assert_eq!(Sign::of(2.0), Sign::Positive);
        assert_eq!(Sign::of(-0.1), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of(f64::NAN), Sign::Zero);
    }

    #[test]
    fn linear_root() {
        let roots = bounded_cubic_roots(0.0, 0.0, 1.0, -4.0, 0.0, 10.0, 1e-9);

        assert_eq!(1, roots.len());
        assert_approx_eq!(roots[0], 4.0, 1e-6);
    }

    #[test]
    fn three_roots_of_cubic() {
        let eps = 1e-6;
        // (t + 1) t (t - 2) = t^3 - t^2 - 2t
        let roots = bounded_cubic_roots(1.0, -1.0, -2.0, 0.0, -3.0, 3.0, 1e-10);

        assert_eq!(3, roots.len());
        assert_approx_eq!(roots[0], -1.0, eps);
        assert_approx_eq!(roots[1], 0.0, eps);
        assert_approx_eq!(roots[2], 2.0, eps);
    }

    #[test]
    fn negative_leading_coefficient() {
        let eps = 1e-6;
        // -(t - 1)(t - 2)(t - 3)
        let roots = bounded_cubic_roots(-1.0, 6.0, -11.0, 6.0, 0.0, 4.0, 1e-10);

        assert_eq!(3, roots.len());
        assert_approx_eq!(roots[0], 1.0, eps);
        assert_approx_eq!(roots[1], 2.0, eps);
        assert_approx_eq!(roots[2], 3.0, eps);
    }

    #[test]
    fn parabola_with_zero_leading_coefficient() {
        let eps = 1e-6;
        // t^2 - 1
        let roots = bounded_cubic_roots(0.0, 1.0, 0.0, -1.0, -2.0, 2.0, 1e-10);

        assert_eq!(2, roots.len());
        assert_approx_eq!(roots[0], -1.0, eps);
        assert_approx_eq!(roots[1], 1.0, eps);
    }

    #[test]
    fn no_roots_outside_interval() {
        let roots = bounded_cubic_roots(0.0, 0.0, 1.0, -4.0, 5.0, 10.0, 1e-9);
        assert!(roots.is_empty());

        // t^2 + 1 never crosses zero
        let roots = bounded_cubic_roots(0.0, 1.0, 0.0, 1.0, -5.0, 5.0, 1e-9);
        assert!(roots.is_empty());
    }

    #[test]
    fn bisect_returns_exact_zero_midpoint() {
        // midpoint of [0, 8] is exactly the root
        let root = bisect(&|t: f64| t - 4.0, 0.0, 8.0, 1e-9);
        assert_eq!(root, 4.0);
    }

    #[test]
    fn crossings_of_hill() {
        let eps = 1e-6;
        let spline = fit(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)]);

        // first segment is -0.5t^3 + 1.5t, which equals 0.5 at t = 0.3472963553...
        let crossings = find_crossings(&spline, 0.5);

        assert_eq!(2, crossings.len());
        assert_approx_eq!(crossings[0], 0.347296355, eps);
        assert_approx_eq!(crossings[1], 2.0 - 0.347296355, eps);
        for t in crossings {
            assert_approx_eq!(spline.evaluate(t), 0.5, eps);
        }

        assert!(find_crossings(&spline, 2.0).is_empty());
    }

    #[test]
    fn crossing_on_knot_is_reported_once() {
        let spline = fit(&[Point::new(0.0, -1.0), Point::new(1.0, 0.0), Point::new(2.0, 1.0)]);

        let crossings = find_crossings(&spline, 0.0);

        assert_eq!(1, crossings.len());
        assert_approx_eq!(crossings[0], 1.0, 1e-6);
    }

    #[test]
    fn crossings_of_degenerate_spline() {
        let spline = fit(&[Point::new(1.0, 1.0)]);
        assert!(find_crossings(&spline, 1.0).is_empty());
    }

    #[test]
    fn crossing_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let mut x = 0.0;
            let mut points = Vec::new();
            for _ in 0..8 {
                x += rng.gen_range(0.5..2.0);
                points.push(Point::new(x, rng.gen_range(-5.0..5.0)));
            }
            let spline = fit(&points);
            let (start, end) = spline.domain().unwrap();

            for _ in 0..10 {
                let x0 = rng.gen_range(start + 0.1..end - 0.1);
                // skip flat spots where the crossing is ill-conditioned
                if spline.derivative(x0).abs() < 1e-2 {
                    continue;
                }
                let crossings = all_intersections(&spline, spline.evaluate(x0), 1e-10);
                assert!(
                    crossings.iter().any(|t| (t - x0).abs() < 1e-6),
                    "{} not among {:?}",
                    x0,
                    crossings
                );
            }
        }
    }
}
