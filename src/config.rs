//! Run configuration
//!
//! Every constant the logo depends on lives in [`LogoConfig`]. The `Default`
//! impl carries the canonical values; a JSON file can override any subset.
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::error::{Error, Result};

/// An opaque 8-bit RGB colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);
impl Rgb {
    /// Pure black, used for contour outlines and the wordmark
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidConfig(format!("`{s}` is not a #rrggbb colour"));

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}
impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Everything needed to render the logo set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Whitespace separated table of `nmodes * nmodes` Fourier coefficients
    pub input_filename: PathBuf,

    /// Number of sine modes along each axis
    pub nmodes: usize,

    /// Constant offset added to the synthesized field
    pub z_mean: f64,

    /// Number of grid samples along each axis
    pub ngrid: usize,

    /// Margin cut from the unit square on the left and right
    pub xborder: [f64; 2],

    /// Margin cut from the unit square on the bottom and top
    pub yborder: [f64; 2],

    /// TrueType font used for the wordmark
    pub font_path: PathBuf,

    /// Outline width in points for SVG output
    pub svg_linewidth: f64,

    /// Outline width in points for PNG output
    pub png_linewidth: f64,

    /// One fill colour per contour band, lowest band first
    pub colors: Vec<Rgb>,

    /// Directory all artwork is written to
    pub output_dir: PathBuf,

    /// Project name, used for the wordmark and the file names
    pub name: String,

    /// Wordmark size in points
    pub font_size: f64,

    /// Pixel sizes of the square logo-only PNGs
    pub png_sizes: Vec<u32>,

    /// Extra margin, in data units, around the logo in the bordered PNG
    pub outer_border: f64,

    /// Pixels per inch for raster output
    pub dpi: f64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            input_filename: PathBuf::from("coefficients.txt"),
            nmodes: 8,
            z_mean: -0.034_291_014_512_612_87,
            ngrid: 40,
            xborder: [0.03, 0.05],
            yborder: [0.06, 0.02],
            font_path: PathBuf::from("../fonts/Catamaran-Bold.ttf"),
            svg_linewidth: 0.5,
            png_linewidth: 1.0,

            // colorbrewer RdYlGn
            colors: vec![
                Rgb(0x1a, 0x96, 0x41),
                Rgb(0xa6, 0xd9, 0x6a),
                Rgb(0xff, 0xff, 0xbf),
                Rgb(0xfd, 0xae, 0x61),
                Rgb(0xd7, 0x19, 0x1c),
            ],

            output_dir: PathBuf::from("output"),
            name: "ContourPy".to_string(),
            font_size: 28.0,
            png_sizes: vec![200, 300],
            outer_border: 0.1,
            dpi: 100.0,
        }
    }
}

impl LogoConfig {
    /// Loads a configuration from a JSON file; absent fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds out-of-range values.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a drawable logo.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.nmodes == 0 {
            return fail("nmodes must be at least 1");
        }
        if self.ngrid < 2 {
            return fail("ngrid must be at least 2");
        }
        if self.colors.is_empty() {
            return fail("at least one band colour is required");
        }

        let (x0, x1) = self.x_limits();
        let (y0, y1) = self.y_limits();
        if x0.partial_cmp(&x1) != Some(std::cmp::Ordering::Less) {
            return fail("xborder leaves no horizontal extent");
        }
        if y0.partial_cmp(&y1) != Some(std::cmp::Ordering::Less) {
            return fail("yborder leaves no vertical extent");
        }

        for (name, value) in [
            ("svg_linewidth", self.svg_linewidth),
            ("png_linewidth", self.png_linewidth),
            ("font_size", self.font_size),
            ("dpi", self.dpi),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be positive")));
            }
        }

        // The bordered artwork widens both limits by outer_border on each side
        let border = self.outer_border;
        if border.is_nan() || x1 - x0 + 2.0 * border <= 0.0 || y1 - y0 + 2.0 * border <= 0.0 {
            return fail("outer_border collapses the bordered logo");
        }

        if self.png_sizes.contains(&0) {
            return fail("png_sizes must be non-zero");
        }

        Ok(())
    }

    /// Path of an output file: `output_dir/filename`
    #[must_use]
    pub fn full_output_filename(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }

    /// Common prefix of every output file name, e.g. `contourpy_logo`
    #[must_use]
    pub fn output_stem(&self) -> String {
        format!("{}_logo", self.name.to_lowercase())
    }

    /// Horizontal data limits of the logo
    #[must_use]
    pub fn x_limits(&self) -> (f64, f64) {
        (self.xborder[0], 1.0 - self.xborder[1])
    }

    /// Vertical data limits of the logo
    #[must_use]
    pub fn y_limits(&self) -> (f64, f64) {
        (self.yborder[0], 1.0 - self.yborder[1])
    }

    /// Number of contour levels; one more than the number of bands
    #[must_use]
    pub fn levels_count(&self) -> usize {
        self.colors.len() + 1
    }
}
