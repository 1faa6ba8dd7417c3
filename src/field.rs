//! Sample grid and the scalar field synthesized on it
//!
//! The grid is the mesh of two [`linspace`]s, flattened row-major with the
//! row index running along `y`: point `(col, row)` is `(x[col], y[row])`.
//! Field values use the same layout, which is also the layout the contouring
//! library expects.
use nalgebra::DVector;

use crate::{
    basis::{Basis, SineBasis},
    coefficients::CoefficientTable,
    error::{Error, Result},
    value::{linspace, Linspace},
};

/// A regular rectangular grid of sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}
impl Grid {
    /// Creates an `n x n` grid spanning `x_limits` by `y_limits`, edges included
    #[must_use]
    pub fn new(x_limits: (f64, f64), y_limits: (f64, f64), n: usize) -> Self {
        Self {
            xs: linspace(x_limits.0, x_limits.1, n),
            ys: linspace(y_limits.0, y_limits.1, n),
        }
    }

    /// Column coordinates
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Row coordinates
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of columns
    #[must_use]
    pub fn nx(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ys.len()
    }

    /// Total number of sample points
    #[must_use]
    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Returns true if the grid has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spacing between columns
    #[must_use]
    pub fn x_step(&self) -> f64 {
        step(&self.xs)
    }

    /// Spacing between rows
    #[must_use]
    pub fn y_step(&self) -> f64 {
        step(&self.ys)
    }

    /// Every grid point, row-major
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ys
            .iter()
            .flat_map(move |y| self.xs.iter().map(move |x| (*x, *y)))
    }
}

fn step(values: &[f64]) -> f64 {
    match values {
        [first, .., last] => Linspace::new(*first, *last, values.len()).step(),
        _ => 0.0,
    }
}

/// Scalar values sampled on a [`Grid`].
#[derive(Debug, Clone)]
pub struct ScalarField {
    grid: Grid,
    values: Vec<f64>,
}
impl ScalarField {
    /// Wraps precomputed values; `values` must be row-major over `grid`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if the value count does not match the grid.
    pub fn from_values(grid: Grid, values: Vec<f64>) -> Result<Self> {
        if values.len() != grid.len() {
            return Err(Error::InvalidConfig(format!(
                "field has {} values for a {}x{} grid",
                values.len(),
                grid.nx(),
                grid.ny()
            )));
        }
        Ok(Self { grid, values })
    }

    /// Evaluates `z = A·c + z_mean` on every grid point.
    ///
    /// `A` is the design matrix of `basis` over the grid and `c` the
    /// coefficient vector.
    ///
    /// # Errors
    /// Returns an error if the coefficient count does not match the basis.
    pub fn evaluate(
        grid: Grid,
        basis: &SineBasis,
        coefficients: &CoefficientTable,
        z_mean: f64,
    ) -> Result<Self> {
        coefficients.expect_modes(basis.nmodes())?;

        let points: Vec<(f64, f64)> = grid.points().collect();
        let design = basis.design_matrix(&points);
        let weights = DVector::from_column_slice(coefficients.values());

        let mut z = design * weights;
        z.add_scalar_mut(z_mean);

        log::debug!(
            "Evaluated {} modes on a {}x{} grid",
            basis.k(),
            grid.nx(),
            grid.ny()
        );
        Self::from_values(grid, z.iter().copied().collect())
    }

    /// The grid the field is sampled on
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All values, row-major
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at column `col`, row `row`
    #[must_use]
    pub fn value(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.grid.nx() {
            return None;
        }
        self.values.get(row * self.grid.nx() + col).copied()
    }

    /// Largest value
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest value
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// `n` contour levels evenly spaced over `[0, max]`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyField`] if the field never rises above zero.
    pub fn levels(&self, n: usize) -> Result<Vec<f64>> {
        let max = self.max();
        if max.is_nan() || max <= 0.0 {
            return Err(Error::EmptyField { max });
        }
        Ok(linspace(0.0, max, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close};

    #[test]
    fn test_grid_layout() {
        let grid = Grid::new((0.0, 1.0), (10.0, 12.0), 3);
        assert_eq!(grid.len(), 9);
        assert_close!(grid.x_step(), 0.5);
        assert_close!(grid.y_step(), 1.0);

        let points: Vec<_> = grid.points().collect();
        assert_eq!(points[0], (0.0, 10.0));
        assert_eq!(points[2], (1.0, 10.0));
        assert_eq!(points[3], (0.0, 11.0));
        assert_eq!(points[8], (1.0, 12.0));
    }

    #[test]
    fn test_single_mode_field() {
        // Only the (0, 0) mode: z = sin(πx) sin(πy) - 0.25
        let mut coefficients = vec![0.0; 4];
        coefficients[0] = 1.0;
        let coefficients = CoefficientTable::from(coefficients);

        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 5);
        let field =
            ScalarField::evaluate(grid, &SineBasis::new(2), &coefficients, -0.25).unwrap();

        assert_close!(field.max(), 0.75);
        assert_close!(field.min(), -0.25);
        assert_close!(field.value(2, 2).unwrap(), 0.75);
        assert_close!(field.value(0, 2).unwrap(), -0.25);
        assert_eq!(field.value(5, 0), None);

        // Symmetric about the centre
        assert_close!(field.value(1, 3).unwrap(), field.value(3, 1).unwrap());

        let levels = field.levels(6).unwrap();
        assert_all_close!(&levels, &[0.0, 0.15, 0.3, 0.45, 0.6, 0.75]);
    }

    #[test]
    fn test_mode_ordering() {
        // Weight only (i, j) = (1, 0): sin(2πx) sin(πy), antisymmetric in x
        let mut coefficients = vec![0.0; 4];
        coefficients[1] = 1.0;
        let coefficients = CoefficientTable::from(coefficients);

        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 5);
        let field = ScalarField::evaluate(grid, &SineBasis::new(2), &coefficients, 0.0).unwrap();

        assert_close!(field.value(1, 2).unwrap(), 1.0);
        assert_close!(field.value(3, 2).unwrap(), -1.0);
        assert_close!(field.value(2, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_coefficient_mismatch() {
        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 4);
        let coefficients = CoefficientTable::from(vec![1.0; 5]);
        let err = ScalarField::evaluate(grid, &SineBasis::new(2), &coefficients, 0.0).unwrap_err();
        assert!(matches!(err, Error::CoefficientCount { expected: 4, found: 5 }));
    }

    #[test]
    fn test_empty_field_levels() {
        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 2);
        let field = ScalarField::from_values(grid.clone(), vec![-1.0, -0.5, -0.2, 0.0]).unwrap();
        assert!(matches!(field.levels(6), Err(Error::EmptyField { .. })));

        assert!(ScalarField::from_values(grid, vec![1.0]).is_err());
    }
}
