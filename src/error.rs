use thiserror::Error;

/// Errors reported by the validated construction paths ([crate::try_fit] and
/// [crate::PiecewiseCubic::new]). Evaluation itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("Error in Spline: spline must have at least 2 points, got {0}")]
    NotEnoughPoints(usize),

    #[error("Error in Spline: point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("Error in Spline: points have equal x values ({x})")]
    DuplicateX { x: f64 },

    #[error("Error in Spline: {breakpoints} breakpoints need {} segments, got {segments}", .breakpoints.saturating_sub(1))]
    CoefficientCount { breakpoints: usize, segments: usize },

    #[error("Error in Spline: breakpoint {index} is not strictly greater than the previous one")]
    UnsortedBreakpoints { index: usize },
}
