//! Evenly spaced samples and small numeric helpers.
//!
//! # Example
//!
//! ```rust
//! use contour_logo::value::Linspace;
//!
//! // 5 values from 0.0 to 1.0, both ends included
//! let xs: Vec<f64> = Linspace::new(0.0, 1.0, 5).collect();
//! assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! ```
/// Iterator over `n` evenly spaced values between `start` and `end`, both included.
///
/// The last value is always exactly `end`, not `start + (n - 1) * step`.
#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    end: f64,
    n: usize,
    index: usize,
}
impl Linspace {
    /// Creates a new iterator yielding `n` values over `start..=end`
    ///
    /// A single sample yields `start`; zero samples yields nothing.
    #[must_use]
    pub fn new(start: f64, end: f64, n: usize) -> Self {
        Self {
            start,
            end,
            n,
            index: 0,
        }
    }

    /// Distance between consecutive samples
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.n < 2 {
            0.0
        } else {
            (self.end - self.start) / (self.n - 1) as f64
        }
    }
}
impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.n {
            return None;
        }

        let i = self.index;
        self.index += 1;

        if i + 1 == self.n && self.n > 1 {
            Some(self.end)
        } else {
            Some(self.start + i as f64 * self.step())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n - self.index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for Linspace {}

/// Collects `n` evenly spaced values between `start` and `end`, both included.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    Linspace::new(start, end, n).collect()
}

/// Converts a length in inches to a whole number of pixels at `dpi`.
///
/// Rounds to nearest and clamps into `1..=u32::MAX`, so a positive size never
/// collapses to an empty image.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_pixels(inches: f64, dpi: f64) -> u32 {
    let pixels = (inches * dpi).round();
    if pixels.is_nan() {
        1
    } else {
        pixels.clamp(1.0, f64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.03, 0.95, 40);
        assert_eq!(xs.len(), 40);
        assert_eq!(xs[0], 0.03);
        assert_eq!(xs[39], 0.95);

        let step = Linspace::new(0.03, 0.95, 40).step();
        assert!((xs[1] - xs[0] - step).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(Linspace::new(0.0, 1.0, 7).len(), 7);
    }

    #[test]
    fn test_to_pixels() {
        assert_eq!(to_pixels(1.0, 100.0), 100);
        assert_eq!(to_pixels(2.55, 100.0), 255);
        assert_eq!(to_pixels(0.0, 100.0), 1);
        assert_eq!(to_pixels(f64::NAN, 100.0), 1);
    }
}
