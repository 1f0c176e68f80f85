// ============================================================================
// WINDOW HOST
// ============================================================================
//
// A widget never talks to the window system. The host owns the event loop,
// feeds it commands, polls its timers and hands it a canvas when a frame is
// due; the widget only answers through the `Widget` trait.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::canvas::Canvas;
use crate::config::Color;
use crate::error::{PanelError, Result};

/// Callbacks a host drives. Everything runs on the event-loop thread, so a
/// timer callback never overlaps a paint.
pub trait Widget {
    type Command;

    /// Fixed size in logical pixels.
    fn size(&self) -> (usize, usize);

    fn paint(&self, canvas: &mut Canvas);

    /// Runs due timer callbacks. Returns whether any fired.
    fn poll_timers(&mut self, now: Instant) -> bool;

    /// When the next timer is due, if one is running.
    fn next_deadline(&self) -> Option<Instant>;

    /// Whether state changed since the last call.
    fn take_redraw_request(&mut self) -> bool;

    fn apply(&mut self, command: Self::Command);
}

#[derive(Debug, Clone)]
pub struct HostOptions {
    pub title: String,
    pub background: Color,
    pub max_framerate: f64,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            background: Color::WHITE,
            max_framerate: 60.0,
        }
    }
}

impl HostOptions {
    pub fn frame_duration(&self) -> Duration {
        if self.max_framerate.is_finite() && self.max_framerate > 0.0 {
            Duration::from_secs_f64(1.0 / self.max_framerate)
        } else {
            Duration::ZERO
        }
    }
}

/// Opens a fixed-size window for `widget` and runs until it is closed.
/// Commands from `receiver` are applied between frames.
pub fn run<W: Widget>(
    widget: &mut W,
    options: &HostOptions,
    receiver: Option<Receiver<W::Command>>,
) -> Result<()> {
    let (width, height) = widget.size();
    if width == 0 || height == 0 {
        return Err(PanelError::EmptySurface { width, height });
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&options.title)
        .with_inner_size(LogicalSize::new(width as f64, height as f64))
        .with_resizable(false)
        .build(&event_loop)?;
    let window = Arc::new(window);
    let window_clone = window.clone();

    // The framebuffer stays at widget size; pixels scales it to the surface.
    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(width as u32, height as u32, surface_texture)?;
    info!(
        "hosting {width}x{height} widget in a {}x{} surface",
        size.width, size.height
    );

    let frame_duration = options.frame_duration();
    let mut last_frame = Instant::now();
    let mut redraw_pending = true;

    event_loop.run(move |event, window_target| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                window_target.exit();
            }
            WindowEvent::Resized(new_size) => {
                // Minimized windows report a zero size.
                if new_size.width > 0 && new_size.height > 0 {
                    debug!("surface resized to {}x{}", new_size.width, new_size.height);
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        warn!("failed to resize surface: {err}");
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let mut canvas = Canvas::new(pixels.frame_mut(), width, height);
                canvas.clear(options.background);
                widget.paint(&mut canvas);
                if let Err(err) = pixels.render() {
                    error!("failed to present frame: {err}");
                    window_target.exit();
                }
                last_frame = Instant::now();
            }
            _ => {}
        },
        Event::AboutToWait => {
            if let Some(ref receiver) = receiver {
                while let Ok(command) = receiver.try_recv() {
                    widget.apply(command);
                }
            }

            let now = Instant::now();
            widget.poll_timers(now);
            if widget.take_redraw_request() {
                redraw_pending = true;
            }

            let next_frame = last_frame + frame_duration;
            if redraw_pending && now >= next_frame {
                window_clone.request_redraw();
                redraw_pending = false;
            }

            // Sleep until the earliest pending tick or held-back frame. With a
            // command channel attached, poll it at least once per frame.
            let wake = [
                widget.next_deadline(),
                redraw_pending.then_some(next_frame),
                receiver.as_ref().map(|_| now + frame_duration.max(Duration::from_millis(1))),
            ]
            .into_iter()
            .flatten()
            .min();
            window_target.set_control_flow(match wake {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            });
        }
        _ => {}
    })?;

    Ok(())
}
