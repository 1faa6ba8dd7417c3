use std::path::Path;

use resvg::{tiny_skia, usvg};

use super::FontBook;
use crate::error::{Error, Result};

fn parse(svg: &str, fonts: Option<&FontBook>) -> Result<usvg::Tree> {
    let mut opt = usvg::Options::default();
    if let Some(fonts) = fonts {
        fonts.register(opt.fontdb_mut());
    }

    Ok(usvg::Tree::from_str(svg, &opt)?)
}

/// Re-serializes an SVG document with every `<text>` converted to paths.
///
/// # Errors
/// Returns an error if the document cannot be parsed.
pub fn outline_text(svg: &str, fonts: Option<&FontBook>) -> Result<String> {
    let tree = parse(svg, fonts)?;
    Ok(tree.to_string(&usvg::WriteOptions::default()))
}

/// Rasterizes an SVG document to a `size` pixel PNG with a transparent background.
///
/// The document is scaled to fill the pixmap exactly.
///
/// # Errors
/// Returns an error if the SVG cannot be parsed, or the PNG cannot be encoded or written.
#[allow(clippy::cast_precision_loss)]
pub fn svg2png(
    svg: &str,
    size: (u32, u32),
    fonts: Option<&FontBook>,
    target: &Path,
) -> Result<()> {
    let tree = parse(svg, fonts)?;

    let (width, height) = size;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(Error::Pixmap(width, height))?;

    let tree_size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / tree_size.width(),
        height as f32 / tree_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(target)
        .map_err(|e| Error::PngEncode(e.to_string()))?;
    Ok(())
}
