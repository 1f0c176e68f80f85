//! Fill sources for the canvas primitives.

use crate::config::Color;
use crate::geometry::Point;

/// Ordered color stops over [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStops {
    stops: Vec<(f32, Color)>,
}

impl ColorStops {
    pub fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Sets the color at `position`, replacing any stop already there.
    pub fn with_stop(mut self, position: f32, color: Color) -> Self {
        let position = position.clamp(0.0, 1.0);
        self.stops.retain(|(p, _)| *p != position);
        let idx = self.stops.partition_point(|(p, _)| *p < position);
        self.stops.insert(idx, (position, color));
        self
    }

    pub fn sample(&self, t: f32) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        let idx = self.stops.partition_point(|(p, _)| *p <= t);
        let (p0, c0) = self.stops[idx - 1];
        let (p1, c1) = self.stops[idx];
        c0.lerp(c1, (t - p0) / (p1 - p0))
    }
}

impl Default for ColorStops {
    fn default() -> Self {
        Self::new()
    }
}

/// Gradient along the line `start -> end`, constant perpendicular to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: ColorStops,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point, stops: ColorStops) -> Self {
        Self { start, end, stops }
    }

    pub fn color_at(&self, p: Point) -> Color {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq > 0.0 {
            ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq
        } else {
            0.0
        };
        self.stops.sample(t as f32)
    }
}

/// Angular gradient around `center`. Position 0 lies in direction `angle`
/// (degrees, counter-clockwise from 3 o'clock) and positions grow
/// counter-clockwise, reaching 1 after a full turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicalGradient {
    pub center: Point,
    pub angle: f64,
    pub stops: ColorStops,
}

impl ConicalGradient {
    pub fn new(center: Point, angle: f64, stops: ColorStops) -> Self {
        Self {
            center,
            angle,
            stops,
        }
    }

    pub fn position_at(&self, p: Point) -> f32 {
        let sweep = (self.center.direction_to(p) - self.angle).rem_euclid(360.0);
        (sweep / 360.0) as f32
    }

    pub fn color_at(&self, p: Point) -> Color {
        self.stops.sample(self.position_at(p))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Conical(ConicalGradient),
}

impl Paint {
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear(gradient) => gradient.color_at(p),
            Paint::Conical(gradient) => gradient.color_at(p),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}
