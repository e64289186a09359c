#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{function::ScalarFunction, roots};

/// Cubic `f(t) = a t^3 + b t^2 + c t + d` written in the global parameter `t`,
/// so evaluating it never needs the segment origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Cubic { a, b, c, d }
    }

    /// Converts a cubic given in the local basis `(t - origin)` into global coefficients.
    /// # Example
    /// ```
    /// use assert_approx_eq::assert_approx_eq;
    /// use coaster_spline::Cubic;
    ///
    /// // (t - 2)^2 = t^2 - 4t + 4
    /// let cubic = Cubic::from_local(0.0, 1.0, 0.0, 0.0, 2.0);
    ///
    /// assert_approx_eq!(cubic.b, 1.0, 1e-12);
    /// assert_approx_eq!(cubic.c, -4.0, 1e-12);
    /// assert_approx_eq!(cubic.d, 4.0, 1e-12);
    /// ```
    pub fn from_local(a: f64, b: f64, c: f64, d: f64, origin: f64) -> Self {
        let x = origin;
        Cubic {
            a,
            b: -3.0 * a * x + b,
            c: 3.0 * a * x * x - 2.0 * b * x + c,
            d: -a * x * x * x + b * x * x - c * x + d,
        }
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    pub fn derivative(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    pub fn second_derivative(&self, t: f64) -> f64 {
        6.0 * self.a * t + 2.0 * self.b
    }

    /// Simpson's rule over `[low, high]`. Exact for a cubic.
    pub fn integral(&self, low: f64, high: f64) -> f64 {
        let mid = (low + high) / 2.0;
        (high - low) / 6.0 * (self.evaluate(low) + 4.0 * self.evaluate(mid) + self.evaluate(high))
    }

    /// The same cubic moved down by `level`, whose roots are the points where `self` equals
    /// `level`.
    pub fn shifted(&self, level: f64) -> Self {
        Cubic { d: self.d - level, ..*self }
    }

    /// Roots inside `(low, high)`, see [roots::bounded_cubic_roots].
    pub fn roots_in(&self, low: f64, high: f64, epsilon: f64) -> Vec<f64> {
        roots::bounded_cubic_roots(self.a, self.b, self.c, self.d, low, high, epsilon)
    }
}

impl ScalarFunction for Cubic {
    fn value(&self, t: f64) -> f64 {
        self.evaluate(t)
    }
}
