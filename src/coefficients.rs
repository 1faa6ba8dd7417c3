//! Fourier coefficient tables
//!
//! The table is plain text: whitespace separated numbers, one or more per
//! line, `#` comments and blank lines ignored. Rows are flattened in order,
//! so a single column and an `nmodes x nmodes` matrix read the same way.
use std::path::Path;

use crate::error::{Error, Result};

/// A flat, row-major table of sine-series weights.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    values: Vec<f64>,
    columns: usize,
}
impl CoefficientTable {
    /// Reads and parses a coefficient file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let table = Self::parse(&text)?;

        log::debug!(
            "Loaded {} coefficients ({} per row) from {}",
            table.len(),
            table.columns,
            path.display()
        );
        Ok(table)
    }

    /// Parses a coefficient table from text.
    ///
    /// # Errors
    /// Returns [`Error::Coefficients`] if a token is not a number or a row has
    /// a different width than the first one.
    pub fn parse(text: &str) -> Result<Self> {
        let mut values = Vec::new();
        let mut columns = None;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let content = line.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let row = content
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| Error::Coefficients {
                        line: line_no,
                        reason: format!("`{token}` is not a number"),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            match columns {
                None => columns = Some(row.len()),
                Some(width) if width != row.len() => {
                    return Err(Error::Coefficients {
                        line: line_no,
                        reason: format!("expected {width} columns, found {}", row.len()),
                    });
                }
                Some(_) => {}
            }

            values.extend(row);
        }

        Ok(Self {
            values,
            columns: columns.unwrap_or(0),
        })
    }

    /// Checks that the table holds exactly one weight per mode pair.
    ///
    /// # Errors
    /// Returns [`Error::CoefficientCount`] otherwise.
    pub fn expect_modes(&self, nmodes: usize) -> Result<()> {
        let expected = nmodes * nmodes;
        if self.values.len() == expected {
            Ok(())
        } else {
            Err(Error::CoefficientCount {
                expected,
                found: self.values.len(),
            })
        }
    }

    /// The weights, flattened row-major
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of weights
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the table holds no weights
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Weight of mode `sin((i+1)πx) sin((j+1)πy)`
    #[must_use]
    pub fn mode(&self, i: usize, j: usize, nmodes: usize) -> Option<f64> {
        if i >= nmodes || j >= nmodes {
            return None;
        }
        self.values.get(i + j * nmodes).copied()
    }
}
impl From<Vec<f64>> for CoefficientTable {
    fn from(values: Vec<f64>) -> Self {
        Self {
            columns: usize::from(!values.is_empty()),
            values,
        }
    }
}
