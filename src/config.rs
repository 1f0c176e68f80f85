use bon::Builder;

// ============================================================================
// COLOR
// ============================================================================

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const TRANSPARENT: Color = Color::new(0x00, 0x00, 0x00).with_alpha(0);

    /// Opaque color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Opaque color from a `0xRRGGBB` literal, e.g. `Color::from_rgb(0x098BDE)`.
    pub const fn from_rgb(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Component-wise interpolation, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

// ============================================================================
// PANEL CONFIGURATION
// ============================================================================

/// Visual constants of a [`CircularProgressPanel`](crate::CircularProgressPanel).
///
/// Every field has a default, so `PanelConfig::builder().build()` gives the
/// stock blue panel.
#[derive(Debug, Clone, Builder)]
pub struct PanelConfig {
    // Geometry
    #[builder(default = 0.8)]
    pub outer_ratio: f64,
    #[builder(default = 0.6)]
    pub inner_ratio: f64,

    // Outer ring
    #[builder(default = Color::from_rgb(0x098BDE))]
    pub ring_color: Color,
    #[builder(default = 6.0)]
    pub ring_width: f64,

    // Inner disc, gradient runs top to bottom
    #[builder(default = Color::from_rgb(0x0CC4FA))]
    pub inner_gradient_top: Color,
    #[builder(default = Color::from_rgb(0x0874D3))]
    pub inner_gradient_bottom: Color,

    // Marker
    #[builder(default = Color::from_rgb(0x1CACF7))]
    pub marker_color: Color,
    #[builder(default = Color::WHITE)]
    pub marker_outline_color: Color,
    #[builder(default = 2.0)]
    pub marker_outline_width: f64,
    /// Defaults to twice the ring width.
    pub marker_radius: Option<f64>,

    // Animation, all in degrees
    #[builder(default = 60)]
    pub initial_angle: i32,
    /// Degrees per tick. Values below 1 are treated as 1.
    #[builder(default = 6)]
    pub angle_increment: i32,
    #[builder(default = 72)]
    pub trail_span: i32,
    /// Fraction of the conical sweep spent fading from white into the ring color.
    #[builder(default = 0.1)]
    pub trail_fade: f32,

    // Text
    #[builder(default = "0.31mg/l".to_string())]
    pub initial_text: String,
    /// Pixel size of the bundled label font.
    #[builder(default = 16.0)]
    pub font_size: f32,

    // Host window
    #[builder(default = "Circular Progress".to_string())]
    pub title: String,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PanelConfig {
    pub fn marker_radius(&self) -> f64 {
        self.marker_radius.unwrap_or(self.ring_width * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_split_into_channels() {
        let c = Color::from_rgb(0x098BDE);
        assert_eq!(c.to_rgba(), [0x09, 0x8b, 0xde, 0xff]);
        assert_eq!(Color::TRANSPARENT.a, 0);
    }

    #[test]
    fn lerp_hits_both_ends_and_midpoint() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).r, 128);
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn defaults_match_stock_panel() {
        let config = PanelConfig::default();
        assert_eq!(config.outer_ratio, 0.8);
        assert_eq!(config.inner_ratio, 0.6);
        assert_eq!(config.initial_angle, 60);
        assert_eq!(config.angle_increment, 6);
        assert_eq!(config.marker_radius(), 12.0);
        assert_eq!(config.initial_text, "0.31mg/l");
        assert_eq!(config.font_size, 16.0);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = PanelConfig::builder()
            .ring_width(4.0)
            .marker_radius(5.0)
            .build();
        assert_eq!(config.ring_width, 4.0);
        assert_eq!(config.marker_radius(), 5.0);
        assert_eq!(config.ring_color, Color::from_rgb(0x098BDE));
    }
}
