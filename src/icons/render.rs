//! Vector drawing of the status glyphs.
//!
//! Every glyph is a handful of straight strokes on a square canvas. The
//! drawing is serialized as a standalone SVG document so the icon directory
//! can be inspected or replaced by hand.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::IconKind;
use crate::util::Result;

/// Canvas edge length in SVG units.
pub const CANVAS_SIZE: f32 = 512.0;

/// Split point used to place the checkmark elbow and exclamation bar.
const GOLDEN_RATIO: f32 = 0.666;

/// Stroke color of the fallback glyph.
const FALLBACK_COLOR: [u8; 3] = [160, 160, 160];

/// A straight stroke between two canvas points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// Stroke list plus pen settings for one glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct IconDrawing {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    pub color: [u8; 3],
    pub strokes: Vec<Stroke>,
}

/// Pen with a translatable origin, mirroring a painter transform.
struct Pen {
    origin: [f32; 2],
    strokes: Vec<Stroke>,
}

impl Pen {
    fn new() -> Self {
        Self { origin: [0.0, 0.0], strokes: Vec::new() }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.origin[0] += dx;
        self.origin[1] += dy;
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let [ox, oy] = self.origin;
        self.strokes.push(Stroke {
            from: [ox + x1, oy + y1],
            to: [ox + x2, oy + y2],
        });
    }
}

impl IconDrawing {
    fn canvas(color: [u8; 3], strokes: Vec<Stroke>) -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            thickness: CANVAS_SIZE / 10.0,
            color,
            strokes,
        }
    }

    /// Build the drawing for a status glyph.
    pub fn for_kind(kind: IconKind) -> Self {
        let w = CANVAS_SIZE;
        let h = CANVAS_SIZE;
        let t = w / 10.0;
        let ratio = w * GOLDEN_RATIO;
        let inverted = w * (1.0 - GOLDEN_RATIO);
        let mut pen = Pen::new();

        match kind {
            IconKind::Checkmark => {
                pen.translate(inverted, h - 2.5 * t);
                let long = ratio * 0.85;
                let short = inverted * 0.75;
                pen.line(0.0, 0.0, long, -long);
                pen.line(0.0, 0.0, -short, -short);
            }
            IconKind::Cross => {
                pen.line(t, t, w - t, h - t);
                pen.line(w - t, t, t, h - t);
            }
            IconKind::Exclamation => {
                pen.translate(w / 2.0, t / 2.0);
                pen.line(0.0, 0.0, 0.0, ratio);
                pen.line(0.0, h - t / 2.0, 0.0, h - t);
            }
            IconKind::Plus => {
                pen.line(t, h / 2.0, w - t, h / 2.0);
                pen.line(w / 2.0, t, w / 2.0, h - t);
            }
        }

        Self::canvas(kind.color(), pen.strokes)
    }

    /// Grey question mark shown when a glyph cannot be loaded.
    pub fn fallback() -> Self {
        let w = CANVAS_SIZE;
        let h = CANVAS_SIZE;
        let t = w / 10.0;
        let mut pen = Pen::new();
        pen.line(w * 0.3, 2.0 * t, w * 0.7, 2.0 * t);
        pen.line(w * 0.7, 2.0 * t, w * 0.7, h * 0.45);
        pen.line(w * 0.7, h * 0.45, w / 2.0, h * 0.45);
        pen.line(w / 2.0, h * 0.45, w / 2.0, h * 0.65);
        pen.line(w / 2.0, h - 2.0 * t, w / 2.0, h - 1.5 * t);
        Self::canvas(FALLBACK_COLOR, pen.strokes)
    }

    /// Serialize as an SVG document clipped to the canvas.
    pub fn to_svg(&self) -> String {
        let [r, g, b] = self.color;
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        let _ = writeln!(
            svg,
            r#"  <defs><clipPath id="canvas"><rect x="0" y="0" width="{}" height="{}"/></clipPath></defs>"#,
            self.width, self.height,
        );
        let _ = writeln!(
            svg,
            r##"  <g clip-path="url(#canvas)" fill="none" stroke="#{r:02x}{g:02x}{b:02x}" stroke-width="{}" stroke-linecap="square">"##,
            self.thickness,
        );
        for stroke in &self.strokes {
            let _ = writeln!(
                svg,
                r#"    <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#,
                stroke.from[0], stroke.from[1], stroke.to[0], stroke.to[1],
            );
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

/// Render one glyph into `dir`, returning the written path.
pub fn render(kind: IconKind, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(kind.file_name());
    std::fs::write(&path, IconDrawing::for_kind(kind).to_svg())?;
    debug!("Rendered {} to {}", kind, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_strokes_per_glyph() {
        for kind in IconKind::REQUIRED {
            let drawing = IconDrawing::for_kind(kind);
            assert_eq!(drawing.strokes.len(), 2, "{kind}");
            assert_eq!(drawing.color, kind.color());
            assert!((drawing.thickness - 51.2).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cross_diagonals() {
        let drawing = IconDrawing::for_kind(IconKind::Cross);
        let t = CANVAS_SIZE / 10.0;
        assert_eq!(drawing.strokes[0].from, [t, t]);
        assert_eq!(drawing.strokes[0].to, [CANVAS_SIZE - t, CANVAS_SIZE - t]);
    }

    #[test]
    fn test_checkmark_translated() {
        let drawing = IconDrawing::for_kind(IconKind::Checkmark);
        let elbow = drawing.strokes[0].from;
        assert!((elbow[0] - 512.0 * 0.334).abs() < 0.01);
        assert!((elbow[1] - 384.0).abs() < 0.01);
        // Both strokes start at the elbow and rise to the right and left.
        assert_eq!(drawing.strokes[1].from, elbow);
        assert!(drawing.strokes[0].to[0] > elbow[0]);
        assert!(drawing.strokes[1].to[0] < elbow[0]);
    }

    #[test]
    fn test_svg_contents() {
        let svg = IconDrawing::for_kind(IconKind::Cross).to_svg();
        assert!(svg.contains("viewBox=\"0 0 512 512\""));
        assert!(svg.contains("stroke=\"#ff0000\""));
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = render(IconKind::Plus, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "plus.svg");
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("#ffffff"));
    }
}
