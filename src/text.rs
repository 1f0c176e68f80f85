//! Centered label rendering on top of rusttype.

use std::fmt;
use std::path::Path;

use rusttype::{point, Font, Scale};

use crate::canvas::Canvas;
use crate::config::Color;
use crate::error::{PanelError, Result};
use crate::geometry::Rect;

/// Pen used for the label.
///
/// `width` is kept alongside the color for hosts that reuse one pen across
/// shapes; glyph size comes from the [`TextFont`] only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPen {
    pub color: Color,
    pub width: f64,
}

impl TextPen {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for TextPen {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

// DejaVu Sans, under the Bitstream Vera license (see src/fonts/LICENSE).
const DEFAULT_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

/// A parsed font at a fixed pixel size.
#[derive(Clone)]
pub struct TextFont {
    font: Font<'static>,
    size: f32,
}

impl TextFont {
    /// The face compiled into the crate, so a panel has a label out of the box.
    pub fn default_face(size: f32) -> Result<Self> {
        let font = Font::try_from_bytes(DEFAULT_FONT_DATA).ok_or(PanelError::FontParse)?;
        Ok(Self { font, size })
    }

    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self> {
        let font = Font::try_from_vec(data).ok_or(PanelError::FontParse)?;
        Ok(Self { font, size })
    }

    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| PanelError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Same face at another pixel size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            font: self.font.clone(),
            size,
        }
    }

    fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }

    /// Advance width and line height of `text`, in pixels.
    pub fn measure(&self, text: &str) -> (f32, f32) {
        let scale = self.scale();
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        (width, v_metrics.ascent - v_metrics.descent)
    }
}

impl fmt::Debug for TextFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFont")
            .field("glyphs", &self.font.glyph_count())
            .field("size", &self.size)
            .finish()
    }
}

/// Draws one line of `text` centered both ways in `rect`. Glyphs may spill
/// outside `rect`; only the canvas edges clip.
pub fn draw_text_centered(
    canvas: &mut Canvas,
    rect: Rect,
    text: &str,
    pen: &TextPen,
    font: &TextFont,
) {
    if text.is_empty() || font.size <= 0.0 {
        return;
    }
    let scale = font.scale();
    let v_metrics = font.font.v_metrics(scale);
    let (width, line_height) = font.measure(text);
    let center = rect.center();
    let left = center.x as f32 - width / 2.0;
    let baseline = center.y as f32 - line_height / 2.0 + v_metrics.ascent;

    for glyph in font.font.layout(text, scale, point(left, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                canvas.blend_pixel(bb.min.x + gx as i32, bb.min.y + gy as i32, pen.color, v);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Bitmap;

    #[test]
    fn garbage_is_not_a_font() {
        let err = TextFont::from_bytes(vec![0xde, 0xad, 0xbe, 0xef], 12.0).unwrap_err();
        assert!(matches!(err, PanelError::FontParse));
    }

    #[test]
    fn missing_font_file_reports_path() {
        let err = TextFont::from_file("/definitely/not/here.ttf", 12.0).unwrap_err();
        match err {
            PanelError::FontRead { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.ttf"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bundled_face_loads_at_requested_size() {
        let font = TextFont::default_face(24.0).unwrap();
        assert_eq!(font.size(), 24.0);
        let (width, height) = font.measure("0.31mg/l");
        assert!(width > 0.0 && height > 0.0);
        assert_eq!(font.with_size(12.0).size(), 12.0);
    }

    #[test]
    fn label_glyphs_are_centered_in_rect() {
        let red = Color::new(255, 0, 0);
        let font = TextFont::default_face(24.0).unwrap();
        let rect = Rect::new(40.0, 40.0, 120.0, 120.0);
        let mut bitmap = Bitmap::new(200, 200);
        draw_text_centered(
            &mut bitmap.canvas(),
            rect,
            "0.31mg/l",
            &TextPen::new(red, 1.0),
            &font,
        );

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (usize::MAX, usize::MAX, 0, 0);
        for y in 0..200 {
            for x in 0..200 {
                if bitmap.pixel(x, y).unwrap().a > 0 {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        assert!(max_x > min_x && max_y > min_y, "nothing was drawn");

        let center = rect.center();
        let mid_x = (min_x + max_x + 1) as f64 / 2.0;
        let mid_y = (min_y + max_y + 1) as f64 / 2.0;
        assert!((mid_x - center.x).abs() <= 2.0, "x mid {mid_x}");
        assert!((mid_y - center.y).abs() <= 3.0, "y mid {mid_y}");
        // Glyphs stay inside the rect they were centered in.
        assert!(min_x as f64 >= rect.x && (max_x as f64) < rect.x + rect.width);
    }

    #[test]
    fn empty_label_draws_nothing() {
        let font = TextFont::default_face(24.0).unwrap();
        let mut bitmap = Bitmap::new(50, 50);
        let before = bitmap.clone();
        draw_text_centered(
            &mut bitmap.canvas(),
            Rect::new(0.0, 0.0, 50.0, 50.0),
            "",
            &TextPen::default(),
            &font,
        );
        assert_eq!(bitmap, before);
    }

    #[test]
    fn default_pen_is_black_hairline() {
        let pen = TextPen::default();
        assert_eq!(pen.color, Color::BLACK);
        assert_eq!(pen.width, 1.0);
    }
}
