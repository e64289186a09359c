//! Homogeneous 3x3 transforms of the plane.

use std::ops::Mul;

use nalgebra::{Matrix3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Solves `M w = rhs` for a 3x3 matrix. [AffineTransform2D::invert_apply_with] goes through
/// this trait so the elimination strategy can be swapped without touching callers.
pub trait LinearSolver {
    fn solve(&self, matrix: &Matrix3<f64>, rhs: &Vector3<f64>) -> Vector3<f64>;
}

/// Gaussian elimination without pivoting: `M = L U`, then `L v = rhs` forward and `U w = v`
/// backward. A zero pivot is not detected and yields non-finite components. Enough for
/// scale, translation and flip, whose diagonal never vanishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnpivotedLu;

impl UnpivotedLu {
    /// Factors `matrix` into a unit lower triangular `L` and an upper triangular `U`.
    pub fn decompose(matrix: &Matrix3<f64>) -> (Matrix3<f64>, Matrix3<f64>) {
        let mut lower = Matrix3::identity();
        let mut upper = *matrix;

        for pivot in 0..2 {
            for row in pivot + 1..3 {
                let factor = upper[(row, pivot)] / upper[(pivot, pivot)];
                lower[(row, pivot)] = factor;
                for col in 0..3 {
                    upper[(row, col)] -= factor * upper[(pivot, col)];
                }
            }
        }
        log::trace!("lu factors: lower={:?} upper={:?}", lower, upper);
        (lower, upper)
    }
}

impl LinearSolver for UnpivotedLu {
    fn solve(&self, matrix: &Matrix3<f64>, rhs: &Vector3<f64>) -> Vector3<f64> {
        let (lower, upper) = UnpivotedLu::decompose(matrix);
        let v = forward_solve(&lower, rhs);
        backward_solve(&upper, &v)
    }
}

/// LU with partial pivoting from nalgebra. Handles matrices with a zero on the diagonal,
/// such as rotations by a quarter turn. A singular matrix yields NaN components.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotedLu;

impl LinearSolver for PivotedLu {
    fn solve(&self, matrix: &Matrix3<f64>, rhs: &Vector3<f64>) -> Vector3<f64> {
        match (*matrix).lu().solve(rhs) {
            Some(solution) => solution,
            None => Vector3::repeat(f64::NAN),
        }
    }
}

/// Solves `L v = rhs` for lower triangular `L`, top row first.
pub fn forward_solve(lower: &Matrix3<f64>, rhs: &Vector3<f64>) -> Vector3<f64> {
    let mut v = Vector3::zeros();
    for i in 0..3 {
        let mut sum = rhs[i];
        for j in 0..i {
            sum -= lower[(i, j)] * v[j];
        }
        v[i] = sum / lower[(i, i)];
    }
    v
}

/// Solves `U w = rhs` for upper triangular `U`, bottom row first.
pub fn backward_solve(upper: &Matrix3<f64>, rhs: &Vector3<f64>) -> Vector3<f64> {
    let mut w = Vector3::zeros();
    for i in (0..3).rev() {
        let mut sum = rhs[i];
        for j in i + 1..3 {
            sum -= upper[(i, j)] * w[j];
        }
        w[i] = sum / upper[(i, i)];
    }
    w
}

/// Transform of the plane as a 3x3 matrix acting on `[x, y, 1]`.
///
/// Cameras build it from [AffineTransform2D::scale], [AffineTransform2D::translate] and
/// [AffineTransform2D::flip]; the type itself accepts any matrix.
/// # Example
/// ```
/// use assert_approx_eq::assert_approx_eq;
/// use coaster_spline::{AffineTransform2D, Point};
///
/// let transform = AffineTransform2D::scale(2.0)
///     .compose(&AffineTransform2D::translate(1.0, -1.0))
///     .compose(&AffineTransform2D::flip());
///
/// let screen = transform.apply(Point::new(3.0, 4.0));
/// assert_eq!(screen, Point::new(8.0, -10.0));
///
/// let world = transform.invert_apply(screen);
/// assert_approx_eq!(world.x, 3.0, 1e-9);
/// assert_approx_eq!(world.y, 4.0, 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffineTransform2D {
    matrix: Matrix3<f64>,
}

impl AffineTransform2D {
    pub fn identity() -> Self {
        AffineTransform2D { matrix: Matrix3::identity() }
    }

    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        AffineTransform2D { matrix }
    }

    #[rustfmt::skip]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        AffineTransform2D {
            matrix: Matrix3::new(
                rows[0][0], rows[0][1], rows[0][2],
                rows[1][0], rows[1][1], rows[1][2],
                rows[2][0], rows[2][1], rows[2][2],
            ),
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        AffineTransform2D::from_rows([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    /// Uniform scale about the origin.
    pub fn scale(factor: f64) -> Self {
        AffineTransform2D::from_rows([[factor, 0.0, 0.0], [0.0, factor, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Mirror in the x axis, `y -> -y`.
    pub fn flip() -> Self {
        AffineTransform2D::from_rows([[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// `self · other`: the result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &AffineTransform2D) -> AffineTransform2D {
        AffineTransform2D { matrix: self.matrix * other.matrix }
    }

    pub fn apply(&self, point: Point) -> Point {
        let v = self.matrix * Vector3::new(point.x, point.y, 1.0);
        Point::new(v[0], v[1])
    }

    /// Maps a point back through the transform by solving `M w = [x, y, 1]` with
    /// [UnpivotedLu]. No inverse matrix is formed.
    pub fn invert_apply(&self, point: Point) -> Point {
        self.invert_apply_with(&UnpivotedLu, point)
    }

    pub fn invert_apply_with<S: LinearSolver + ?Sized>(&self, solver: &S, point: Point) -> Point {
        let w = solver.solve(&self.matrix, &Vector3::new(point.x, point.y, 1.0));
        Point::new(w[0], w[1])
    }

    // The axis helpers hold the other coordinate at 0. They rely on the transform having no
    // x/y cross terms, which holds for scale, translation and flip but not for rotation.

    pub fn transform_x(&self, x: f64) -> f64 {
        self.apply(Point::new(x, 0.0)).x
    }

    pub fn transform_y(&self, y: f64) -> f64 {
        self.apply(Point::new(0.0, y)).y
    }

    pub fn inverse_transform_x(&self, x: f64) -> f64 {
        self.invert_apply(Point::new(x, 0.0)).x
    }

    pub fn inverse_transform_y(&self, y: f64) -> f64 {
        self.invert_apply(Point::new(0.0, y)).y
    }
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        AffineTransform2D::identity()
    }
}

impl Mul for AffineTransform2D {
    type Output = AffineTransform2D;

    fn mul(self, other: AffineTransform2D) -> AffineTransform2D {
        self.compose(&other)
    }
}

impl Mul<Point> for AffineTransform2D {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        self.apply(point)
    }
}
