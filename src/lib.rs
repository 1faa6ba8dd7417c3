//! # Contour logo
//! ## A logo drawn by the thing it advertises
//!
//! The ContourPy logo is a filled contour plot. A smooth scalar field is built
//! from a double Fourier sine series, sampled on a regular grid, split into five
//! coloured bands between `0` and its maximum, and outlined in black.
//!
//! This crate does that end to end:
//! - Read the sine-series amplitudes from a plain text [`coefficients`] file
//! - Evaluate the [`field`] over the logo area with a [`basis::SineBasis`] design matrix
//! - Compute filled bands and level lines with [`contouring`]
//! - Draw them with the small figure model in [`render`], and write SVG or PNG
//! - Produce the full set of logo files with [`logo::generate`]
//!
//! ```rust,no_run
//! # use contour_logo::{LogoConfig, logo::generate};
//! let config = LogoConfig::default();
//! for path in generate(&config).expect("Failed to create logo") {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Core Concepts
//! - A [`LogoConfig`] holds every tunable: number of modes, grid size, borders, colours, output names.
//!     - [`LogoConfig::default`] reproduces the published logo.
//! - A [`ScalarField`] is the sampled sum `z_mean + sum c[i + j*n] sin((i+1) pi x) sin((j+1) pi y)`.
//! - A [`ContourSet`] holds one band per pair of adjacent levels and one set of lines per level.
//!     - Bands may have holes; they are drawn with the even-odd fill rule.
//! - An [`logo::Artwork`] is one output file; [`logo::Artwork::catalogue`] lists them in writing order.
//!
//! # Testing utilities
//!
//! [`assert_close!`] and [`assert_all_close!`] compare floats with a tolerance. See [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]


pub mod basis;
pub mod coefficients;
pub mod config;
pub mod contouring;
pub mod error;
pub mod field;
pub mod logo;
pub mod render;
pub mod value;

pub use coefficients::CoefficientTable;
pub use config::{LogoConfig, Rgb};
pub use contouring::{ContourGenerator, ContourSet, Extent};
pub use error::{Error, Result};
pub use field::{Grid, ScalarField};
pub use logo::{generate, Artwork, Logo};

pub use nalgebra;
