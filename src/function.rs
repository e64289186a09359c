/// Single argument real function `f(t)`.
///
/// Root refinement and numeric differentiation take their function through this trait, so a
/// closure, a single [crate::Cubic] or a whole [crate::PiecewiseCubic] can be passed in the
/// same way.
/// # Example
/// ```
/// use coaster_spline::ScalarFunction;
///
/// let square = |t: f64| t * t;
/// assert_eq!(square.value(3.0), 9.0);
/// ```
pub trait ScalarFunction {
    fn value(&self, t: f64) -> f64;
}

impl<F> ScalarFunction for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, t: f64) -> f64 {
        self(t)
    }
}
