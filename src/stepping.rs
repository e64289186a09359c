//! Single-step integrators and numeric differentiation used by the ride simulation.

use crate::function::ScalarFunction;

/// One explicit Euler step of `dx/dt = f(t, x)`: `x + h f(t, x)`.
pub fn euler_step<F>(x: f64, t: f64, h: f64, f: F) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    x + h * f(t, x)
}

/// One classical fourth order Runge-Kutta step of `dx/dt = f(t, x)`.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::stepping::runge_kutta_step;
///
/// // dx/dt = x, x(0) = 1
/// let mut x = 1.0;
/// let h = 0.01;
/// for i in 0..100 {
///     x = runge_kutta_step(x, i as f64 * h, h, |_, x| x);
/// }
/// assert_approx_eq!(x, 1.0_f64.exp(), 1e-8);
/// ```
pub fn runge_kutta_step<F>(x: f64, t: f64, h: f64, f: F) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let k1 = h * f(t, x);
    let k2 = h * f(t + h / 2.0, x + k1 / 2.0);
    let k3 = h * f(t + h / 2.0, x + k2 / 2.0);
    let k4 = h * f(t + h, x + k3);
    x + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
}

/// Centered difference `(f(x + h) - f(x - h)) / 2h`.
pub fn central_difference<F: ScalarFunction + ?Sized>(x: f64, h: f64, f: &F) -> f64 {
    (f.value(x + h) - f.value(x - h)) / (2.0 * h)
}
