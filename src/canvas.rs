// ============================================================================
// RASTER SURFACES
// ============================================================================
//
// Everything draws into tightly packed RGBA8 rows, the same layout `pixels`
// hands out from `Pixels::frame_mut`, so the panel can paint straight into the
// window framebuffer or into its own off-screen `Bitmap`.

use crate::config::Color;
use crate::geometry::{Point, Rect};
use crate::gradient::Paint;

/// Off-screen RGBA image owned by its creator.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        read_pixel(&self.data, self.width, self.height, x, y)
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.data, self.width, self.height)
    }
}

/// Drawing surface over a borrowed RGBA frame.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Rows past the end of `frame` are treated as missing.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = if width == 0 {
            0
        } else {
            height.min(frame.len() / (width * 4))
        };
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Overwrites every pixel, alpha included.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba();
        let len = self.width * self.height * 4;
        for chunk in self.frame[..len].chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        read_pixel(self.frame, self.width, self.height, x, y)
    }

    /// Source-over composite of `color` scaled by `coverage`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let sa = color.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let dst = &mut self.frame[idx..idx + 4];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8
        };
        let out = [
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ];
        dst.copy_from_slice(&out);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        if !(radius > 0.0) {
            return;
        }
        self.shade(center, radius + 1.0, |p| {
            let coverage = (radius - center.distance(p) + 0.5).clamp(0.0, 1.0);
            (coverage > 0.0).then(|| (paint.color_at(p), coverage as f32))
        });
    }

    /// Strokes the circle outline with a pen of `width` centered on `radius`.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, paint: &Paint) {
        self.stroke_arc(center, radius, width, 0.0, 360.0, paint);
    }

    /// Strokes the part of the circle starting at `start` degrees and running
    /// `span` degrees counter-clockwise. Ends are cut square to the radius.
    pub fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        start: f64,
        span: f64,
        paint: &Paint,
    ) {
        if !(radius > 0.0 && width > 0.0 && span > 0.0) {
            return;
        }
        let half = width / 2.0;
        let max_coverage = width.min(1.0);
        let full_turn = span >= 360.0;
        self.shade(center, radius + half + 1.0, |p| {
            if !full_turn && (center.direction_to(p) - start).rem_euclid(360.0) > span {
                return None;
            }
            let off_ring = (center.distance(p) - radius).abs();
            let coverage = (half + 0.5 - off_ring).clamp(0.0, max_coverage);
            (coverage > 0.0).then(|| (paint.color_at(p), coverage as f32))
        });
    }

    /// Composites `bitmap` scaled (nearest neighbour) into `dest`.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect) {
        if dest.is_empty() || bitmap.width == 0 || bitmap.height == 0 {
            return;
        }
        let (x0, x1) = pixel_span(dest.x, dest.x + dest.width, self.width);
        let (y0, y1) = pixel_span(dest.y, dest.y + dest.height, self.height);
        let sx = bitmap.width as f64 / dest.width;
        let sy = bitmap.height as f64 / dest.height;
        for y in y0..y1 {
            let src_y = ((y as f64 + 0.5 - dest.y) * sy) as usize;
            for x in x0..x1 {
                let src_x = ((x as f64 + 0.5 - dest.x) * sx) as usize;
                if let Some(color) = bitmap.pixel(src_x, src_y) {
                    if color.a > 0 {
                        self.blend_pixel(x as i32, y as i32, color, 1.0);
                    }
                }
            }
        }
    }

    /// Visits the pixels within `extent` of `center`, blending whatever the
    /// closure returns for each pixel center.
    fn shade<F>(&mut self, center: Point, extent: f64, mut f: F)
    where
        F: FnMut(Point) -> Option<(Color, f32)>,
    {
        let (x0, x1) = pixel_span(center.x - extent, center.x + extent, self.width);
        let (y0, y1) = pixel_span(center.y - extent, center.y + extent, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some((color, coverage)) = f(p) {
                    self.blend_pixel(x as i32, y as i32, color, coverage);
                }
            }
        }
    }
}

/// Pixel index range covering [lo, hi), clipped to [0, limit).
fn pixel_span(lo: f64, hi: f64, limit: usize) -> (usize, usize) {
    let lo = lo.floor().max(0.0);
    let hi = hi.ceil().min(limit as f64);
    if !(lo < hi) {
        return (0, 0);
    }
    (lo as usize, hi as usize)
}

fn read_pixel(data: &[u8], width: usize, height: usize, x: usize, y: usize) -> Option<Color> {
    if x >= width || y >= height {
        return None;
    }
    let idx = (y * width + x) * 4;
    let px = data.get(idx..idx + 4)?;
    Some(Color::new(px[0], px[1], px[2]).with_alpha(px[3]))
}
