//! SVG serialization of a [`Figure`]
//!
//! The document is sized in points (`72 * inches`) with a matching viewBox,
//! so line widths and font sizes in points map 1:1 to user units.
use std::fmt::Write;

use super::{DataPath, Element, Figure, HAlign, TextElement, VAlign, POINTS_PER_INCH};

const CLIP_ID: &str = "axes-clip";

/// Maps data coordinates onto the figure with equal aspect.
///
/// The data rectangle is scaled uniformly to the largest size that fits and
/// centred along the axis with slack. SVG `y` grows downward, data `y` upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    left: f64,
    top: f64,
    x0: f64,
    y1: f64,
    width: f64,
    height: f64,
}
impl ViewTransform {
    /// Fits `xlim x ylim` into a `size` (width, height) area in points
    #[must_use]
    pub fn new(size: (f64, f64), xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        let dx = xlim.1 - xlim.0;
        let dy = ylim.1 - ylim.0;
        let scale = (size.0 / dx).min(size.1 / dy);

        let (width, height) = (dx * scale, dy * scale);
        Self {
            scale,
            left: (size.0 - width) / 2.0,
            top: (size.1 - height) / 2.0,
            x0: xlim.0,
            y1: ylim.1,
            width,
            height,
        }
    }

    /// Data point to SVG user units
    #[must_use]
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.left + (x - self.x0) * self.scale,
            self.top + (self.y1 - y) * self.scale,
        )
    }

    /// The axes rectangle as `(x, y, width, height)` in SVG user units
    #[must_use]
    pub fn clip_rect(&self) -> (f64, f64, f64, f64) {
        (self.left, self.top, self.width, self.height)
    }

    /// Points per data unit
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Formats a coordinate with at most 3 decimals and no trailing zeros
fn num(value: f64) -> String {
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn path_data(path: &DataPath, transform: &ViewTransform) -> String {
    let mut d = String::new();
    for subpath in path.subpaths() {
        for (i, point) in subpath.points.iter().enumerate() {
            let (x, y) = transform.apply(*point);
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{command}{} {} ", num(x), num(y));
        }
        if subpath.closed {
            d.push_str("Z ");
        }
    }
    d.truncate(d.trim_end().len());
    d
}

fn write_text(out: &mut String, text: &TextElement, transform: &ViewTransform) {
    let (x, y) = transform.apply(text.position);
    let anchor = match text.h_align {
        HAlign::Left => "start",
        HAlign::Center => "middle",
    };
    let baseline = match text.v_align {
        VAlign::CenterBaseline => "central",
        VAlign::Top => "text-before-edge",
    };

    let _ = writeln!(
        out,
        r#"  <text x="{}" y="{}" font-family="{}" font-weight="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="{baseline}" fill="{}">{}</text>"#,
        num(x),
        num(y),
        escape(&text.family),
        text.weight,
        num(text.size),
        text.color,
        escape(&text.text),
    );
}

/// Renders `figure` to a standalone SVG document
pub(super) fn render(figure: &Figure) -> String {
    let (width_in, height_in) = figure.size_inches();
    let (width, height) = (width_in * POINTS_PER_INCH, height_in * POINTS_PER_INCH);
    let transform = figure.transform();

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}pt" height="{h}pt" viewBox="0 0 {w} {h}" version="1.1">"#,
        w = num(width),
        h = num(height),
    );

    //
    // Axes clip
    let (cx, cy, cw, ch) = transform.clip_rect();
    let _ = writeln!(
        out,
        r#" <defs>
  <clipPath id="{CLIP_ID}">
   <rect x="{}" y="{}" width="{}" height="{}"/>
  </clipPath>
 </defs>"#,
        num(cx),
        num(cy),
        num(cw),
        num(ch),
    );

    out.push_str(" <g id=\"axes\">\n");
    for element in figure.axes().elements() {
        match element {
            Element::Fill { path, color } => {
                if path.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    r#"  <path d="{}" clip-path="url(#{CLIP_ID})" fill="{color}" fill-rule="evenodd" stroke="none"/>"#,
                    path_data(path, &transform),
                );
            }

            Element::Stroke { path, color, width } => {
                if path.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    r#"  <path d="{}" clip-path="url(#{CLIP_ID})" fill="none" stroke="{color}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="butt"/>"#,
                    path_data(path, &transform),
                    num(*width),
                );
            }

            Element::Text(text) => write_text(&mut out, text, &transform),
        }
    }
    out.push_str(" </g>\n</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_close, config::Rgb};

    #[test]
    fn test_num_format() {
        assert_eq!(num(72.0), "72");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-2.5), "-2.5");
    }

    #[test]
    fn test_transform_square() {
        let t = ViewTransform::new((72.0, 72.0), (0.0, 1.0), (0.0, 1.0));
        assert_eq!(t.apply((0.0, 0.0)), (0.0, 72.0));
        assert_eq!(t.apply((1.0, 1.0)), (72.0, 0.0));
        assert_eq!(t.clip_rect(), (0.0, 0.0, 72.0, 72.0));
    }

    #[test]
    fn test_transform_letterbox() {
        // Wide figure, square data: centred horizontally
        let t = ViewTransform::new((200.0, 100.0), (0.0, 1.0), (0.0, 1.0));
        assert_close!(t.scale(), 100.0);
        let (x, y, w, h) = t.clip_rect();
        assert_close!(x, 50.0);
        assert_close!(y, 0.0);
        assert_close!(w, 100.0);
        assert_close!(h, 100.0);

        // Tall data in a square figure: centred horizontally, full height
        let t = ViewTransform::new((72.0, 72.0), (0.03, 0.95), (-0.5, 1.0));
        let (x, y, _, h) = t.clip_rect();
        assert_close!(y, 0.0);
        assert_close!(h, 72.0);
        assert!(x > 0.0);
    }

    #[test]
    fn test_render_document() {
        let mut figure = Figure::new(1.0, 1.0, 100.0);
        let mut path = DataPath::default();
        path.push_ring(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        figure
            .axes_mut()
            .fill(path.clone(), Rgb(0x1a, 0x96, 0x41))
            .stroke(path, Rgb::BLACK, 0.5)
            .fill(DataPath::default(), Rgb::BLACK);

        let svg = figure.to_svg();
        assert!(svg.contains(r#"width="72pt" height="72pt" viewBox="0 0 72 72""#));
        assert!(svg.contains(r##"<path d="M0 72 L72 72 L72 0 Z" clip-path="url(#axes-clip)" fill="#1a9641" fill-rule="evenodd""##));
        assert!(svg.contains(r##"stroke="#000000" stroke-width="0.5""##));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_render_text() {
        let mut figure = Figure::new(2.0, 1.0, 100.0);
        figure.axes_mut().text(TextElement {
            text: "A & B".to_string(),
            position: (0.5, 0.5),
            size: 28.0,
            family: "Catamaran".to_string(),
            weight: 700,
            h_align: HAlign::Center,
            v_align: VAlign::Top,
            color: Rgb::BLACK,
        });

        let svg = figure.to_svg();
        assert!(svg.contains(r##"<text x="72" y="36" font-family="Catamaran" font-weight="700" font-size="28" text-anchor="middle" dominant-baseline="text-before-edge" fill="#000000">A &amp; B</text>"##));
    }
}
