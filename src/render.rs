//! Figures, axes and the elements drawn on them
//!
//! A small figure model: one [`Figure`] of a given size in inches holds one
//! [`Axes`] covering the whole figure, with equal aspect and no decorations.
//! Elements are added in data coordinates and drawn in insertion order.
//!
//! Output goes through SVG in both cases:
//! - [`Figure::save_svg`] writes the document, outlining any text with the
//!   wordmark font so the file needs no fonts to display.
//! - [`Figure::save_png`] rasterizes the same document with `resvg`.
use std::path::Path;

use crate::{
    config::Rgb,
    error::{Error, Result},
};

mod font;
pub use font::FontBook;

mod raster;
pub use raster::{outline_text, svg2png};

mod svg;
pub use svg::ViewTransform;

/// Points per inch; SVG user units are points
pub const POINTS_PER_INCH: f64 = 72.0;

/// A single run of connected points.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    /// Vertices in data coordinates
    pub points: Vec<(f64, f64)>,
    /// Whether the last point joins back to the first
    pub closed: bool,
}

/// A compound path in data coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPath {
    subpaths: Vec<SubPath>,
}
impl DataPath {
    /// Adds a closed ring. Degenerate rings (fewer than 3 points) are skipped.
    pub fn push_ring(&mut self, mut points: Vec<(f64, f64)>) {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() >= 3 {
            self.subpaths.push(SubPath {
                points,
                closed: true,
            });
        }
    }

    /// Adds an open polyline. Single points are skipped.
    pub fn push_polyline(&mut self, points: Vec<(f64, f64)>) {
        if points.len() >= 2 {
            self.subpaths.push(SubPath {
                points,
                closed: false,
            });
        }
    }

    /// The subpaths in insertion order
    #[must_use]
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// Returns true if there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Every vertex of every subpath
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.subpaths.iter().flat_map(|s| s.points.iter().copied())
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    /// Text starts at the anchor
    Left,
    /// Text is centred on the anchor
    Center,
}

/// Vertical text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    /// The anchor sits halfway up the glyphs, measured from the baseline
    CenterBaseline,
    /// The anchor sits at the top of the glyphs
    Top,
}

/// A run of text anchored in data coordinates.
#[derive(Debug, Clone)]
pub struct TextElement {
    /// The string to draw
    pub text: String,
    /// Anchor position in data coordinates
    pub position: (f64, f64),
    /// Size in points
    pub size: f64,
    /// Font family name
    pub family: String,
    /// CSS font weight (400 regular, 700 bold)
    pub weight: u16,
    /// Horizontal alignment
    pub h_align: HAlign,
    /// Vertical alignment
    pub v_align: VAlign,
    /// Fill colour
    pub color: Rgb,
}

/// Things that can be drawn on an [`Axes`]
#[derive(Debug, Clone)]
pub enum Element {
    /// A filled compound path, even-odd rule, no outline. Clipped to the axes.
    Fill {
        /// Shape to fill
        path: DataPath,
        /// Fill colour
        color: Rgb,
    },

    /// A stroked path with no fill. Clipped to the axes.
    Stroke {
        /// Shape to outline
        path: DataPath,
        /// Line colour
        color: Rgb,
        /// Line width in points
        width: f64,
    },

    /// A text label. Never clipped.
    Text(TextElement),
}

/// A data rectangle mapped onto the figure with equal aspect.
#[derive(Debug, Clone)]
pub struct Axes {
    xlim: (f64, f64),
    ylim: (f64, f64),
    elements: Vec<Element>,
}
impl Default for Axes {
    fn default() -> Self {
        Self {
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            elements: Vec::new(),
        }
    }
}
impl Axes {
    /// Sets the horizontal data limits
    pub fn set_xlim(&mut self, left: f64, right: f64) -> &mut Self {
        self.xlim = (left, right);
        self
    }

    /// Sets the vertical data limits
    pub fn set_ylim(&mut self, bottom: f64, top: f64) -> &mut Self {
        self.ylim = (bottom, top);
        self
    }

    /// Horizontal data limits
    #[must_use]
    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    /// Vertical data limits
    #[must_use]
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    /// Adds a filled path
    pub fn fill(&mut self, path: DataPath, color: Rgb) -> &mut Self {
        self.elements.push(Element::Fill { path, color });
        self
    }

    /// Adds a stroked path
    pub fn stroke(&mut self, path: DataPath, color: Rgb, width: f64) -> &mut Self {
        self.elements.push(Element::Stroke { path, color, width });
        self
    }

    /// Adds a text label
    pub fn text(&mut self, text: TextElement) -> &mut Self {
        self.elements.push(Element::Text(text));
        self
    }

    /// Elements in drawing order
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns true if any element is text
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.elements.iter().any(|e| matches!(e, Element::Text(_)))
    }
}

/// A fixed-size drawing surface holding one [`Axes`].
#[derive(Debug, Clone)]
pub struct Figure {
    size: (f64, f64),
    dpi: f64,
    axes: Axes,
}
impl Figure {
    /// Creates a figure `width x height` inches, rasterized at `dpi`
    #[must_use]
    pub fn new(width: f64, height: f64, dpi: f64) -> Self {
        Self {
            size: (width, height),
            dpi,
            axes: Axes::default(),
        }
    }

    /// Changes the figure size, keeping its contents
    pub fn set_size_inches(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    /// Size in inches
    #[must_use]
    pub fn size_inches(&self) -> (f64, f64) {
        self.size
    }

    /// Raster size in pixels
    #[must_use]
    pub fn size_pixels(&self) -> (u32, u32) {
        (
            crate::value::to_pixels(self.size.0, self.dpi),
            crate::value::to_pixels(self.size.1, self.dpi),
        )
    }

    /// Pixels per inch for raster output
    #[must_use]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// The axes
    #[must_use]
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// The axes, mutably
    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.axes
    }

    /// Mapping from data coordinates to SVG points for the current size and limits
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(
            (
                self.size.0 * POINTS_PER_INCH,
                self.size.1 * POINTS_PER_INCH,
            ),
            self.axes.xlim,
            self.axes.ylim,
        )
    }

    /// Renders the figure as an SVG document. Text is left as `<text>` elements.
    #[must_use]
    pub fn to_svg(&self) -> String {
        svg::render(self)
    }

    /// Writes the figure as SVG, converting text to outlines with `fonts`.
    ///
    /// # Errors
    /// Returns an error if the text cannot be outlined or the file cannot be written.
    pub fn save_svg(&self, path: &Path, fonts: Option<&FontBook>) -> Result<()> {
        let mut document = self.to_svg();
        if self.axes.has_text() {
            document = outline_text(&document, Some(self.require_fonts(fonts)?))?;
        }

        std::fs::write(path, document).map_err(|e| Error::io(path, e))
    }

    /// Rasterizes the figure at its dpi with a transparent background and writes a PNG.
    ///
    /// # Errors
    /// Returns an error if rendering, encoding or writing fails.
    pub fn save_png(&self, path: &Path, fonts: Option<&FontBook>) -> Result<()> {
        let fonts = if self.axes.has_text() {
            Some(self.require_fonts(fonts)?)
        } else {
            fonts
        };
        svg2png(&self.to_svg(), self.size_pixels(), fonts, path)
    }

    // usvg silently drops text it has no font for
    fn require_fonts<'f>(&self, fonts: Option<&'f FontBook>) -> Result<&'f FontBook> {
        fonts.ok_or_else(|| Error::InvalidConfig("figure has text but no font was loaded".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_rings() {
        let mut path = DataPath::default();
        path.push_ring(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        path.push_ring(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        path.push_polyline(vec![(2.0, 2.0)]);
        path.push_polyline(vec![(2.0, 2.0), (3.0, 3.0)]);

        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.subpaths()[0].points.len(), 3);
        assert!(path.subpaths()[0].closed);
        assert!(!path.subpaths()[1].closed);
        assert_eq!(path.points().count(), 5);
    }

    #[test]
    fn test_figure_size() {
        let mut figure = Figure::new(1.0, 1.0, 100.0);
        assert_eq!(figure.size_pixels(), (100, 100));

        figure.set_size_inches(3.0, 3.0);
        assert_eq!(figure.size_pixels(), (300, 300));

        let figure = Figure::new(2.55, 0.75, 100.0);
        assert_eq!(figure.size_pixels(), (255, 75));
    }

    #[test]
    fn test_text_requires_font() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut figure = Figure::new(1.0, 1.0, 100.0);
        figure.axes_mut().text(TextElement {
            text: "label".to_string(),
            position: (0.5, 0.5),
            size: 12.0,
            family: "Missing".to_string(),
            weight: 400,
            h_align: HAlign::Left,
            v_align: VAlign::CenterBaseline,
            color: Rgb::BLACK,
        });

        let svg_path = dir.path().join("label.svg");
        assert!(matches!(
            figure.save_svg(&svg_path, None),
            Err(Error::InvalidConfig(_))
        ));
        assert!(!svg_path.exists());

        let png_path = dir.path().join("label.png");
        assert!(figure.save_png(&png_path, None).is_err());
    }

    #[test]
    fn test_save_without_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut path = DataPath::default();
        path.push_ring(vec![(0.2, 0.2), (0.8, 0.2), (0.8, 0.8), (0.2, 0.8)]);

        let mut figure = Figure::new(1.0, 1.0, 100.0);
        figure.axes_mut().fill(path, Rgb(0xa6, 0xd9, 0x6a));

        let svg_path = dir.path().join("square.svg");
        figure.save_svg(&svg_path, None).unwrap();
        assert_eq!(std::fs::read_to_string(&svg_path).unwrap(), figure.to_svg());

        let png_path = dir.path().join("square.png");
        figure.set_size_inches(2.0, 2.0);
        figure.save_png(&png_path, None).unwrap();

        let pixmap = resvg::tiny_skia::Pixmap::load_png(&png_path).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (200, 200));
        assert_eq!(pixmap.pixel(100, 100).unwrap().alpha(), 255);
        assert_eq!(pixmap.pixel(5, 5).unwrap().alpha(), 0);
    }

    #[test]
    fn test_axes_elements() {
        let mut figure = Figure::new(1.0, 1.0, 100.0);
        assert_eq!(figure.axes().xlim(), (0.0, 1.0));

        figure
            .axes_mut()
            .set_xlim(0.03, 0.95)
            .set_ylim(0.06, 0.98)
            .stroke(DataPath::default(), Rgb::BLACK, 0.5);
        assert_eq!(figure.axes().elements().len(), 1);
        assert!(!figure.axes().has_text());
    }
}
