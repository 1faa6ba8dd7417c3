//! The logo itself and the set of files rendered from it
//!
//! [`Logo`] owns everything computed from the coefficients: the field, its
//! levels and contours. Each [`Artwork`] is one output file; [`generate`]
//! renders all of them.
use std::path::PathBuf;

use crate::{
    basis::SineBasis,
    coefficients::CoefficientTable,
    config::{LogoConfig, Rgb},
    contouring::ContourSet,
    error::{Error, Result},
    field::{Grid, ScalarField},
    render::{Axes, Figure, FontBook, HAlign, TextElement, VAlign},
};

/// File type of an [`Artwork`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Vector output, text outlined
    Svg,
    /// Raster output at the configured dpi
    Png,
}

/// One of the files produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artwork {
    /// The logo alone, 1x1 inch SVG
    Logo,

    /// The logo alone as a square PNG of the given pixel size
    LogoPng {
        /// Width and height in pixels
        pixels: u32,
    },

    /// 3x3 inch PNG with a transparent margin, sized to survive a circular avatar crop
    BorderedPng,

    /// Logo with the project name to its right
    Horizontal,

    /// Logo with the project name underneath
    Vertical,
}
impl Artwork {
    /// Every artwork, in the order they are written
    #[must_use]
    pub fn catalogue(config: &LogoConfig) -> Vec<Artwork> {
        let mut artworks = vec![Artwork::Logo];
        artworks.extend(
            config
                .png_sizes
                .iter()
                .map(|&pixels| Artwork::LogoPng { pixels }),
        );
        artworks.extend([Artwork::BorderedPng, Artwork::Horizontal, Artwork::Vertical]);
        artworks
    }

    /// Output file name, without the directory
    #[must_use]
    pub fn filename(&self, config: &LogoConfig) -> String {
        let stem = config.output_stem();
        match self {
            Artwork::Logo => format!("{stem}.svg"),
            Artwork::LogoPng { pixels } => format!("{stem}_{pixels}.png"),
            Artwork::BorderedPng => {
                let pixels = crate::value::to_pixels(BORDERED_INCHES, config.dpi);
                format!("{stem}_{pixels}_border.png")
            }
            Artwork::Horizontal => format!("{stem}_horiz.svg"),
            Artwork::Vertical => format!("{stem}_vert.svg"),
        }
    }

    /// File type
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        match self {
            Artwork::Logo | Artwork::Horizontal | Artwork::Vertical => OutputFormat::Svg,
            Artwork::LogoPng { .. } | Artwork::BorderedPng => OutputFormat::Png,
        }
    }

    /// Whether the project name is drawn, which needs the font
    #[must_use]
    pub fn has_wordmark(&self) -> bool {
        matches!(self, Artwork::Horizontal | Artwork::Vertical)
    }

    /// Outline width in points for this artwork's format
    #[must_use]
    pub fn linewidth(&self, config: &LogoConfig) -> f64 {
        match self.format() {
            OutputFormat::Svg => config.svg_linewidth,
            OutputFormat::Png => config.png_linewidth,
        }
    }
}

const BORDERED_INCHES: f64 = 3.0;

/// The contoured field, ready to be drawn any number of times.
#[derive(Debug, Clone)]
pub struct Logo {
    field: ScalarField,
    levels: Vec<f64>,
    contours: ContourSet,
    colors: Vec<Rgb>,
    xlim: (f64, f64),
    ylim: (f64, f64),
}
impl Logo {
    /// Loads the coefficient file named by `config` and contours the resulting field.
    ///
    /// # Errors
    /// Returns an error if the file is missing or malformed, or contouring fails.
    pub fn build(config: &LogoConfig) -> Result<Self> {
        let coefficients = CoefficientTable::load(&config.input_filename)?;
        Self::from_coefficients(config, &coefficients)
    }

    /// Contours the field synthesized from `coefficients`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the table has the
    /// wrong size, the field has no positive values, or contouring fails.
    pub fn from_coefficients(config: &LogoConfig, coefficients: &CoefficientTable) -> Result<Self> {
        config.validate()?;

        let grid = Grid::new(config.x_limits(), config.y_limits(), config.ngrid);
        let basis = SineBasis::new(config.nmodes);
        let field = ScalarField::evaluate(grid, &basis, coefficients, config.z_mean)?;

        let levels = field.levels(config.levels_count())?;
        let contours = ContourSet::compute(&field, &levels)?;

        log::info!(
            "Field range [{:.4}, {:.4}], {} levels",
            field.min(),
            field.max(),
            levels.len()
        );
        Ok(Self {
            field,
            levels,
            contours,
            colors: config.colors.clone(),
            xlim: config.x_limits(),
            ylim: config.y_limits(),
        })
    }

    /// The sampled field
    #[must_use]
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Contour levels, `0` to the field maximum
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Bands and lines at [`Self::levels`]
    #[must_use]
    pub fn contours(&self) -> &ContourSet {
        &self.contours
    }

    /// Draws the logo onto `axes` and sets its limits to the logo border.
    ///
    /// Bands first, one colour each with no edges, then black outlines at every
    /// level so outlines sit on top of every fill.
    pub fn plot(&self, axes: &mut Axes, linewidth: f64) {
        for (band, color) in self.contours.bands.iter().zip(&self.colors) {
            axes.fill(band.path.clone(), *color);
        }

        for lines in &self.contours.lines {
            axes.stroke(lines.path.clone(), Rgb::BLACK, linewidth);
        }

        axes.set_xlim(self.xlim.0, self.xlim.1);
        axes.set_ylim(self.ylim.0, self.ylim.1);
    }

    /// Builds the figure for one artwork.
    ///
    /// # Errors
    /// Returns an error if the artwork has a wordmark and no font is given.
    pub fn render(
        &self,
        artwork: Artwork,
        config: &LogoConfig,
        fonts: Option<&FontBook>,
    ) -> Result<Figure> {
        let linewidth = artwork.linewidth(config);
        let (x0, x1) = self.xlim;
        let (y0, y1) = self.ylim;

        let figure = match artwork {
            Artwork::Logo => {
                let mut figure = Figure::new(1.0, 1.0, config.dpi);
                self.plot(figure.axes_mut(), linewidth);
                figure
            }

            Artwork::LogoPng { pixels } => {
                let mut figure = Figure::new(1.0, 1.0, config.dpi);
                self.plot(figure.axes_mut(), linewidth);

                let size = f64::from(pixels) / config.dpi;
                figure.set_size_inches(size, size);
                figure
            }

            Artwork::BorderedPng => {
                let mut figure = Figure::new(BORDERED_INCHES, BORDERED_INCHES, config.dpi);
                self.plot(figure.axes_mut(), linewidth);

                let border = config.outer_border;
                figure
                    .axes_mut()
                    .set_xlim(x0 - border, x1 + border)
                    .set_ylim(y0 - border, y1 + border);
                figure
            }

            Artwork::Horizontal => {
                let mut figure = Figure::new(2.55, 0.75, config.dpi);
                self.plot(figure.axes_mut(), linewidth);

                let text = wordmark(config, fonts, (0.95, 0.5), HAlign::Left, VAlign::CenterBaseline)?;
                figure.axes_mut().text(text).set_xlim(0.0, 3.4);
                figure
            }

            Artwork::Vertical => {
                let mut figure = Figure::new(2.0, 1.1, config.dpi);
                self.plot(figure.axes_mut(), linewidth);

                let text = wordmark(config, fonts, (0.5, 0.05), HAlign::Center, VAlign::Top)?;
                figure.axes_mut().text(text).set_ylim(-0.5, 1.0);
                figure
            }
        };

        Ok(figure)
    }

    /// Renders and writes one artwork into the output directory.
    ///
    /// # Errors
    /// Returns an error if the figure cannot be built, rendered or written.
    pub fn save(
        &self,
        artwork: Artwork,
        config: &LogoConfig,
        fonts: Option<&FontBook>,
    ) -> Result<PathBuf> {
        let figure = self.render(artwork, config, fonts)?;
        let path = config.full_output_filename(&artwork.filename(config));

        log::info!("Writing file {}", path.display());
        match artwork.format() {
            OutputFormat::Svg => figure.save_svg(&path, fonts)?,
            OutputFormat::Png => figure.save_png(&path, fonts)?,
        }

        Ok(path)
    }
}

/// The project name in the wordmark font, anchored at `position` in data coordinates
fn wordmark(
    config: &LogoConfig,
    fonts: Option<&FontBook>,
    position: (f64, f64),
    h_align: HAlign,
    v_align: VAlign,
) -> Result<TextElement> {
    let fonts = fonts.ok_or_else(|| Error::Font {
        path: config.font_path.clone(),
        reason: "wordmark font not loaded",
    })?;

    Ok(TextElement {
        text: config.name.clone(),
        position,
        size: config.font_size,
        family: fonts.family().to_string(),
        weight: fonts.weight(),
        h_align,
        v_align,
        color: Rgb::BLACK,
    })
}

/// Renders every artwork in [`Artwork::catalogue`] order, overwriting existing files.
///
/// The font is only read once an artwork with a wordmark is reached, so the
/// logo-only files are written even when it is missing.
///
/// # Errors
/// Returns the first error encountered; files written before it are left in place.
pub fn generate(config: &LogoConfig) -> Result<Vec<PathBuf>> {
    let logo = Logo::build(config)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| Error::io(&config.output_dir, e))?;

    let mut fonts: Option<FontBook> = None;
    let mut written = Vec::new();
    for artwork in Artwork::catalogue(config) {
        if artwork.has_wordmark() && fonts.is_none() {
            fonts = Some(FontBook::load(&config.font_path)?);
        }

        written.push(logo.save(artwork, config, fonts.as_ref())?);
    }

    Ok(written)
}
