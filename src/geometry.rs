//! Panel geometry: where the rings sit for a given widget size.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` in direction `degrees`, counter-clockwise
    /// from 3 o'clock. Screen y grows downward, hence the minus on the sine.
    pub fn on_circle(self, radius: f64, degrees: f64) -> Point {
        let angle = degrees.to_radians();
        Point::new(self.x + radius * angle.cos(), self.y - radius * angle.sin())
    }

    /// Inverse of [`Point::on_circle`]: direction of `other` seen from `self`,
    /// in degrees within [0, 360).
    pub fn direction_to(self, other: Point) -> f64 {
        let degrees = (self.y - other.y).atan2(other.x - self.x).to_degrees();
        degrees.rem_euclid(360.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square bounding box of a circle.
    pub fn around_circle(center: Point, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Derived layout of the panel. Recomputed whenever the ratios change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub center: Point,
    pub max_radius: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub outer_rect: Rect,
    pub inner_rect: Rect,
}

impl PanelGeometry {
    pub fn new(width: usize, height: usize, outer_ratio: f64, inner_ratio: f64) -> Self {
        let center = Point::new(width as f64 * 0.5, height as f64 * 0.5);
        // Whole pixels only: odd sizes round the half down.
        let max_radius = (width.min(height) / 2) as f64;
        let outer_radius = max_radius * sanitize_ratio(outer_ratio);
        let inner_radius = max_radius * sanitize_ratio(inner_ratio);
        Self {
            center,
            max_radius,
            outer_radius,
            inner_radius,
            outer_rect: Rect::around_circle(center, outer_radius),
            inner_rect: Rect::around_circle(center, inner_radius),
        }
    }

    /// Marker position on the outer ring for `angle` degrees.
    pub fn point_on_outer(&self, angle: i32) -> Point {
        self.center.on_circle(self.outer_radius, angle as f64)
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}
