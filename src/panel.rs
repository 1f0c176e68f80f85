use std::cell::Cell;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::animation::{Orbit, RepeatingTimer};
use crate::canvas::{Bitmap, Canvas};
use crate::config::{Color, PanelConfig};
use crate::error::Result;
use crate::geometry::{PanelGeometry, Point, Rect};
use crate::gradient::{ColorStops, ConicalGradient, LinearGradient, Paint};
use crate::host::{self, HostOptions, Widget};
use crate::text::{draw_text_centered, TextFont, TextPen};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for driving a hosted panel from another thread.
#[derive(Debug, Clone)]
pub enum PanelCommand {
    SetText(String),
    SetCircleRatio(f64, f64),
    SetTextProperty(TextPen, Option<TextFont>),
    StartAnimation(u64), // interval in milliseconds
    StopAnimation(bool), // return to the start position
}

/// Circular progress indicator: a ring, a gradient disc with a centered
/// label, and a marker orbiting the ring while the animation runs.
#[derive(Debug)]
pub struct CircularProgressPanel {
    config: PanelConfig,
    width: usize,
    height: usize,
    geometry: PanelGeometry,
    background: Bitmap,
    orbit: Orbit,
    marker_center: Point,
    timer: RepeatingTimer,
    text: String,
    text_pen: TextPen,
    text_font: Option<TextFont>,
    font_warned: Cell<bool>,
    redraw_requested: bool,
}

impl CircularProgressPanel {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_config(width, height, PanelConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: PanelConfig) -> Self {
        let geometry = PanelGeometry::new(width, height, config.outer_ratio, config.inner_ratio);
        let text_font = match TextFont::default_face(config.font_size) {
            Ok(font) => Some(font),
            Err(err) => {
                warn!("bundled label font failed to load: {err}");
                None
            }
        };
        let mut panel = Self {
            orbit: Orbit::new(config.initial_angle, config.angle_increment),
            text: config.initial_text.clone(),
            marker_center: geometry.center,
            background: Bitmap::new(width, height),
            timer: RepeatingTimer::new(),
            text_pen: TextPen::default(),
            text_font,
            font_warned: Cell::new(false),
            redraw_requested: true,
            geometry,
            width,
            height,
            config,
        };
        panel.set_circle_ratio(panel.config.outer_ratio, panel.config.inner_ratio);
        panel
    }

    /// Sizes both circles as fractions of the largest circle that fits the
    /// widget, re-renders the cached background and puts the marker back at
    /// its start angle.
    pub fn set_circle_ratio(&mut self, outer_ratio: f64, inner_ratio: f64) {
        self.geometry = PanelGeometry::new(self.width, self.height, outer_ratio, inner_ratio);
        debug!(
            "panel {}x{}: outer radius {:.1}, inner radius {:.1}",
            self.width, self.height, self.geometry.outer_radius, self.geometry.inner_radius
        );
        self.render_background();
        self.set_marker_angle(self.orbit.initial());
    }

    /// Takes effect on the next paint.
    pub fn set_text_property(&mut self, pen: TextPen, font: Option<TextFont>) {
        self.text_pen = pen;
        self.text_font = font;
        self.font_warned.set(false);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.redraw_requested = true;
    }

    /// Starts moving the marker one step every `interval_ms`. Restarts the
    /// period if already running.
    pub fn start_animation(&mut self, interval_ms: u64) {
        info!("marker animation started, {interval_ms} ms per step");
        self.timer
            .start(Duration::from_millis(interval_ms), Instant::now());
    }

    pub fn stop_animation(&mut self, return_to_start: bool) {
        if self.timer.is_active() {
            info!("marker animation stopped at {} degrees", self.orbit.angle());
        }
        self.timer.stop();
        if return_to_start {
            self.set_marker_angle(self.orbit.initial());
        }
    }

    /// One animation step.
    pub fn advance_marker(&mut self) {
        let angle = self.orbit.step();
        trace!("marker step to {angle} degrees");
        self.set_marker_angle(angle);
    }

    pub fn set_marker_angle(&mut self, angle: i32) {
        self.orbit.set(angle);
        self.marker_center = self.geometry.point_on_outer(angle);
        self.redraw_requested = true;
    }

    pub fn render(&self, canvas: &mut Canvas) {
        let widget_rect = Rect::new(0.0, 0.0, self.width as f64, self.height as f64);
        canvas.draw_bitmap(&self.background, widget_rect);
        self.draw_marker(canvas);

        match &self.text_font {
            Some(font) => draw_text_centered(
                canvas,
                self.geometry.inner_rect,
                &self.text,
                &self.text_pen,
                font,
            ),
            None if !self.text.is_empty() && !self.font_warned.get() => {
                warn!("no font set, label {:?} is not drawn", self.text);
                self.font_warned.set(true);
            }
            None => {}
        }
    }

    pub fn show(&mut self) -> Result<()> {
        let options = self.host_options();
        host::run(self, &options, None)
    }

    pub fn show_with_commands(&mut self, receiver: Receiver<PanelCommand>) -> Result<()> {
        let options = self.host_options();
        host::run(self, &options, Some(receiver))
    }

    // Accessors

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn background(&self) -> &Bitmap {
        &self.background
    }

    pub fn marker_angle(&self) -> i32 {
        self.orbit.angle()
    }

    pub fn marker_center(&self) -> Point {
        self.marker_center
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_pen(&self) -> &TextPen {
        &self.text_pen
    }

    pub fn text_font(&self) -> Option<&TextFont> {
        self.text_font.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.timer.is_active()
    }

    pub fn animation_interval(&self) -> Option<Duration> {
        self.timer.is_active().then(|| self.timer.interval())
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl CircularProgressPanel {
    fn render_background(&mut self) {
        let config = &self.config;
        let geometry = &self.geometry;
        let mut canvas = self.background.canvas();
        canvas.clear(Color::TRANSPARENT);

        canvas.stroke_circle(
            geometry.center,
            geometry.outer_radius,
            config.ring_width,
            &Paint::Solid(config.ring_color),
        );

        let inner = geometry.inner_rect;
        let fill = LinearGradient::new(
            Point::new(inner.x, inner.top()),
            Point::new(inner.x, inner.bottom()),
            ColorStops::new()
                .with_stop(0.0, config.inner_gradient_top)
                .with_stop(1.0, config.inner_gradient_bottom),
        );
        canvas.fill_circle(geometry.center, geometry.inner_radius, &Paint::Linear(fill));
    }

    fn draw_marker(&self, canvas: &mut Canvas) {
        let config = &self.config;
        let geometry = &self.geometry;
        let angle = self.orbit.angle();

        // White at the marker, ring color toward both ends of the trail.
        let fade = config.trail_fade;
        let trail = ConicalGradient::new(
            geometry.center,
            angle as f64,
            ColorStops::new()
                .with_stop(0.0, Color::WHITE)
                .with_stop(fade, config.ring_color)
                .with_stop(1.0 - fade, config.ring_color)
                .with_stop(1.0, Color::WHITE),
        );
        let span = config.trail_span;
        canvas.stroke_arc(
            geometry.center,
            geometry.outer_radius,
            config.ring_width,
            (angle - span / 2) as f64,
            span as f64,
            &Paint::Conical(trail),
        );

        let radius = config.marker_radius();
        canvas.fill_circle(self.marker_center, radius, &Paint::Solid(config.marker_color));
        canvas.stroke_circle(
            self.marker_center,
            radius,
            config.marker_outline_width,
            &Paint::Solid(config.marker_outline_color),
        );
    }

    fn host_options(&self) -> HostOptions {
        HostOptions {
            title: self.config.title.clone(),
            background: self.config.background_color,
            max_framerate: self.config.max_framerate,
        }
    }
}

impl Widget for CircularProgressPanel {
    type Command = PanelCommand;

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn paint(&self, canvas: &mut Canvas) {
        self.render(canvas);
    }

    fn poll_timers(&mut self, now: Instant) -> bool {
        let fired = self.timer.poll(now);
        if fired {
            self.advance_marker();
        }
        fired
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn apply(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::SetText(text) => self.set_text(text),
            PanelCommand::SetCircleRatio(outer, inner) => self.set_circle_ratio(outer, inner),
            PanelCommand::SetTextProperty(pen, font) => self.set_text_property(pen, font),
            PanelCommand::StartAnimation(interval_ms) => self.start_animation(interval_ms),
            PanelCommand::StopAnimation(return_to_start) => self.stop_animation(return_to_start),
        }
    }
}
