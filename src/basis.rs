//! Basis functions for synthesizing a 2D scalar field
//!
//! A field is a weighted sum of basis functions evaluated at every grid point.
//! Stacking one row of basis values per point gives the design matrix `A`, so
//! the whole field is the single product `A * c`.
//!
//! # Provided Bases
//! - [`SineBasis`]: products of half-wave sines, `sin((i+1)πx) sin((j+1)πy)`,
//!   which vanish on the edges of the unit square.
use nalgebra::{DMatrix, MatrixViewMut};

/// A set of 2D basis functions.
pub trait Basis: Sized + Clone + std::fmt::Debug {
    /// Number of basis functions, i.e. columns of a design matrix row
    fn k(&self) -> usize;

    /// Evaluates basis function `j` at `(x, y)`
    fn solve_function(&self, j: usize, x: f64, y: f64) -> f64;

    /// Populates a row of the design matrix with every basis function evaluated at `(x, y)`.
    ///
    /// Values are written from column `start_index` onward; the row may be
    /// shorter than `start_index + k()`, in which case the tail is dropped.
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: f64,
        y: f64,
        mut row: MatrixViewMut<'_, f64, R, C, RS, CS>,
    ) {
        for j in 0..self.k() {
            let col = start_index + j;
            if col >= row.ncols() {
                break;
            }
            row[col] = self.solve_function(j, x, y);
        }
    }

    /// Builds the design matrix for a set of points, one row per point.
    fn design_matrix(&self, points: &[(f64, f64)]) -> DMatrix<f64> {
        let mut matrix = DMatrix::zeros(points.len(), self.k());
        for (i, (x, y)) in points.iter().enumerate() {
            self.fill_matrix_row(0, *x, *y, matrix.row_mut(i));
        }
        matrix
    }
}

/// Double-sine basis on the unit square.
///
/// Function `i + j * nmodes` is
/// ```math
/// sin((i+1)πx) · sin((j+1)πy),   0 <= i, j < nmodes
/// ```
///
/// Every function is zero on the boundary of `[0, 1]²`, so any field built
/// from it (before the constant offset) fades out towards the edges.
#[derive(Debug, Clone, Copy)]
pub struct SineBasis {
    nmodes: usize,
}
impl SineBasis {
    /// Creates a basis with `nmodes` modes per axis (`nmodes²` functions)
    #[must_use]
    pub fn new(nmodes: usize) -> Self {
        Self { nmodes }
    }

    /// Modes per axis
    #[must_use]
    pub fn nmodes(&self) -> usize {
        self.nmodes
    }

    /// Writes `sin(π t), sin(2π t), …` into `out`.
    ///
    /// Uses the recurrence `sin(nθ) = 2cos(θ)sin((n-1)θ) - sin((n-2)θ)`, so
    /// only one `sin`/`cos` pair is evaluated per axis.
    fn harmonics(t: f64, out: &mut [f64]) {
        let theta = std::f64::consts::PI * t;
        let cos_t = theta.cos();

        let mut sin_prev2 = 0.0; // sin(0θ)
        let mut sin_prev = theta.sin();
        for (n, slot) in out.iter_mut().enumerate() {
            if n == 0 {
                *slot = sin_prev;
                continue;
            }

            let sin_n = 2.0 * cos_t * sin_prev - sin_prev2;
            *slot = sin_n;
            (sin_prev2, sin_prev) = (sin_prev, sin_n);
        }
    }
}
impl Basis for SineBasis {
    fn k(&self) -> usize {
        self.nmodes * self.nmodes
    }

    fn solve_function(&self, j: usize, x: f64, y: f64) -> f64 {
        let (i, j) = (j % self.nmodes, j / self.nmodes);
        let pi = std::f64::consts::PI;
        ((i + 1) as f64 * pi * x).sin() * ((j + 1) as f64 * pi * y).sin()
    }

    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: f64,
        y: f64,
        mut row: MatrixViewMut<'_, f64, R, C, RS, CS>,
    ) {
        let mut sx = vec![0.0; self.nmodes];
        let mut sy = vec![0.0; self.nmodes];
        Self::harmonics(x, &mut sx);
        Self::harmonics(y, &mut sy);

        for (j, sy_j) in sy.iter().enumerate() {
            for (i, sx_i) in sx.iter().enumerate() {
                let col = start_index + i + j * self.nmodes;
                if col >= row.ncols() {
                    return;
                }
                row[col] = sx_i * sy_j;
            }
        }
    }
}
