#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::SplineError, function::ScalarFunction, point::Point, polynomial::Cubic, roots};

/// Upper bound on the number of points [PiecewiseCubic::sample] produces.
const MAX_SAMPLES: f64 = 1_000_000.0;

/// Piecewise cubic function `f(t) = a[i]t^3 + b[i]t^2 + c[i]t + d[i]` for `x[i] <= t <= x[i+1]`.
///
/// A value is an immutable snapshot: refitting produces a new [PiecewiseCubic] rather than
/// editing the coefficients in place. With fewer than 2 breakpoints every query returns 0.
///
/// Queries outside `[x[0], x[last]]` return the legacy sentinel `0`. Use the `checked_*`
/// variants to tell "out of domain" apart from a computed zero.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::{fit, Point};
///
/// let spline = fit(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)]);
///
/// assert_approx_eq!(spline.evaluate(1.0), 1.0, 1e-9);
/// assert_approx_eq!(spline.evaluate(0.5), 0.6875, 1e-9);
/// assert_eq!(spline.evaluate(3.0), 0.0);
/// assert_eq!(spline.checked_evaluate(3.0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiecewiseCubic {
    breakpoints: Vec<f64>,
    segments: Vec<Cubic>,
}

impl PiecewiseCubic {
    /// Builds a spline from raw coefficient arrays, checking that there is one coefficient
    /// per segment and that the breakpoints are strictly increasing.
    /// # Errors
    /// [SplineError::CoefficientCount] when a coefficient array does not have `x.len() - 1`
    /// entries, [SplineError::UnsortedBreakpoints] when `x` is not strictly increasing.
    /// ```
    /// use coaster_spline::PiecewiseCubic;
    ///
    /// let (a, b, c, d) = (vec![0.0], vec![0.0], vec![1.0], vec![2.0]);
    /// let spline = PiecewiseCubic::new(vec![0.0, 1.0], a.clone(), b.clone(), c.clone(), d.clone());
    /// assert!(spline.is_ok());
    ///
    /// let spline = PiecewiseCubic::new(vec![1.0, 0.0], a, b, c, d);
    /// assert!(spline.is_err());
    /// ```
    pub fn new(
        x: Vec<f64>,
        a: Vec<f64>,
        b: Vec<f64>,
        c: Vec<f64>,
        d: Vec<f64>,
    ) -> Result<Self, SplineError> {
        let expected = x.len().saturating_sub(1);
        for coefficients in [&a, &b, &c, &d] {
            if coefficients.len() != expected {
                return Err(SplineError::CoefficientCount {
                    breakpoints: x.len(),
                    segments: coefficients.len(),
                });
            }
        }

        // NaN breakpoints are rejected along with equal or decreasing ones.
        let out_of_order = |w: &[f64]| w[0] >= w[1] || w[0].is_nan() || w[1].is_nan();
        if let Some(index) = x.windows(2).position(out_of_order) {
            return Err(SplineError::UnsortedBreakpoints { index: index + 1 });
        }

        let segments = (0..expected).map(|i| Cubic::new(a[i], b[i], c[i], d[i])).collect();
        Ok(PiecewiseCubic { breakpoints: x, segments })
    }

    /// Used by the fitter, which guarantees the length invariant but not the ordering
    /// (duplicate x values are passed through).
    pub(crate) fn from_parts(breakpoints: Vec<f64>, segments: Vec<Cubic>) -> Self {
        debug_assert!(
            segments.is_empty() || segments.len() + 1 == breakpoints.len(),
            "one cubic per segment"
        );
        PiecewiseCubic { breakpoints, segments }
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn segments(&self) -> &[Cubic] {
        &self.segments
    }

    /// `true` when the spline has at least one segment to evaluate.
    pub fn is_defined(&self) -> bool {
        self.breakpoints.len() >= 2 && !self.segments.is_empty()
    }

    /// `(x[0], x[last])`, or `None` for a spline with fewer than 2 breakpoints.
    pub fn domain(&self) -> Option<(f64, f64)> {
        if self.is_defined() {
            Some((self.breakpoints[0], self.breakpoints[self.breakpoints.len() - 1]))
        } else {
            None
        }
    }

    pub fn contains(&self, t: f64) -> bool {
        match self.domain() {
            Some((min_x, max_x)) => min_x <= t && t <= max_x,
            None => false,
        }
    }

    /// Index `i` of the segment with `x[i] <= t <= x[i+1]`, scanning from the left, so a `t`
    /// on an interior breakpoint belongs to the lower segment. Returns 0 for `t` outside the
    /// domain or NaN.
    pub fn segment_index(&self, t: f64) -> usize {
        if !self.contains(t) {
            return 0;
        }
        (0..self.segments.len())
            .position(|i| self.is_in_segment_range(i, t))
            .unwrap_or(0)
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.checked_evaluate(t).unwrap_or(0.0)
    }

    pub fn derivative(&self, t: f64) -> f64 {
        self.checked_derivative(t).unwrap_or(0.0)
    }

    pub fn second_derivative(&self, t: f64) -> f64 {
        self.checked_second_derivative(t).unwrap_or(0.0)
    }

    pub fn checked_evaluate(&self, t: f64) -> Option<f64> {
        self.locate(t).map(|segment| segment.evaluate(t))
    }

    pub fn checked_derivative(&self, t: f64) -> Option<f64> {
        self.locate(t).map(|segment| segment.derivative(t))
    }

    pub fn checked_second_derivative(&self, t: f64) -> Option<f64> {
        self.locate(t).map(|segment| segment.second_derivative(t))
    }

    /// Evaluates the cubic of segment `index` at `t`, even outside that segment's range.
    /// Returns `None` when there is no such segment.
    pub fn evaluate_segment(&self, t: f64, index: usize) -> Option<f64> {
        self.segments.get(index).map(|segment| segment.evaluate(t))
    }

    /// Largest second derivative sampled at the breakpoints, never less than 0.
    /// Only the knots are checked; the true maximum over a segment may be larger.
    /// A NaN at any knot (a fit through equal x values) makes the result NaN.
    pub fn max_second_derivative(&self) -> f64 {
        self.breakpoints
            .iter()
            .map(|x| self.second_derivative(*x))
            .fold(0.0, |max, value| if value.is_nan() || value > max { value } else { max })
    }

    /// Area under the curve over the whole domain. Simpson's rule per segment, exact because
    /// every segment is a cubic.
    pub fn definite_integral(&self) -> f64 {
        if !self.is_defined() {
            return 0.0;
        }
        self.breakpoints
            .windows(2)
            .map(|w| {
                let (low, high) = (w[0], w[1]);
                let mid = (low + high) / 2.0;
                let weighted = self.evaluate(low) + 4.0 * self.evaluate(mid) + self.evaluate(high);
                (high - low) / 6.0 * weighted
            })
            .sum()
    }

    /// Evaluates many parameters at once, starting each lookup from the previous segment.
    /// Gives the same values as calling [PiecewiseCubic::evaluate] for each entry.
    /// # Example
    /// ```
    /// use coaster_spline::{fit, Point};
    ///
    /// let spline = fit(&[Point::new(0.0, 1.0), Point::new(2.0, 3.0), Point::new(4.0, 1.0)]);
    /// let ts = vec![0.0, 0.5, 2.0, 3.5, 5.0];
    ///
    /// let batch = spline.batch_evaluate(&ts);
    /// let single: Vec<f64> = ts.iter().map(|t| spline.evaluate(*t)).collect();
    /// assert_eq!(batch, single);
    /// ```
    pub fn batch_evaluate(&self, ts: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(ts.len());
        let mut index = 0;

        for t in ts {
            if !self.is_defined() || !self.contains(*t) {
                results.push(0.0);
                continue;
            }
            index = self.segment_index_with_hint(index, *t);
            results.push(self.segments[index].evaluate(*t));
        }
        results
    }

    /// Points `(t, f(t))` for `t = start, start + step, ...` below `end`, followed by `end`
    /// itself, so the last sample always lands on `end` even when `step` does not divide
    /// the range.
    ///
    /// Empty when `step` is not a positive finite number, when `start` or `end` is not finite,
    /// when `start > end`, or when more than a million points would be needed.
    /// # Example
    /// ```
    /// use coaster_spline::{fit, Point};
    ///
    /// let spline = fit(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    /// let xs: Vec<f64> = spline.sample(0.0, 1.0, 0.3).iter().map(|p| p.x).collect();
    ///
    /// assert_eq!(xs.len(), 5);
    /// assert_eq!(xs[4], 1.0);
    /// ```
    pub fn sample(&self, start: f64, end: f64, step: f64) -> Vec<Point> {
        let finite = step.is_finite() && start.is_finite() && end.is_finite();
        if !(finite && step > 0.0 && start <= end) {
            return Vec::new();
        }

        // Steps strictly below `end`. The relative slack keeps a quotient such as
        // 0.3 / 0.1 = 2.9999999999999996 from adding a sample next to `end`.
        let steps = ((end - start) / step * (1.0 - 1e-9)).ceil();
        if steps >= MAX_SAMPLES {
            return Vec::new();
        }
        let steps = steps as usize;

        let mut ts = Vec::with_capacity(steps + 1);
        ts.extend((0..steps).map(|i| start + step * i as f64));
        ts.push(end);
        let ys = self.batch_evaluate(&ts);
        ts.into_iter().zip(ys).map(|(t, y)| Point::new(t, y)).collect()
    }

    /// Every `t` where the curve equals `level`, see [roots::all_intersections].
    pub fn crossings(&self, level: f64, epsilon: f64) -> Vec<f64> {
        roots::all_intersections(self, level, epsilon)
    }

    fn locate(&self, t: f64) -> Option<&Cubic> {
        if !self.is_defined() || !self.contains(t) {
            return None;
        }
        self.segments.get(self.segment_index(t))
    }

    fn is_in_segment_range(&self, index: usize, t: f64) -> bool {
        self.breakpoints[index] <= t && t <= self.breakpoints[index + 1]
    }

    // The hint is only trusted when `t` lies strictly above its lower breakpoint, otherwise an
    // interior knot could resolve to the upper segment. Falls back to the full scan.
    fn segment_index_with_hint(&self, index_hint: usize, t: f64) -> usize {
        let strictly_inside = |i: usize| {
            i < self.segments.len()
                && (i == 0 || self.breakpoints[i] < t)
                && self.is_in_segment_range(i, t)
        };

        if strictly_inside(index_hint) {
            return index_hint;
        }
        if strictly_inside(index_hint + 1) {
            return index_hint + 1;
        }
        self.segment_index(t)
    }
}

impl ScalarFunction for PiecewiseCubic {
    fn value(&self, t: f64) -> f64 {
        self.evaluate(t)
    }
}
