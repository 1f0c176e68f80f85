//! Circular progress panel: a ring, a gradient disc with a centered label and
//! a marker orbiting the ring, rendered in software into RGBA frames and hosted
//! in a winit + pixels window.
//!
//! ```no_run
//! use circular_progress::{CircularProgressPanel, TextFont, TextPen, Color};
//!
//! // Labels use the bundled DejaVu Sans face unless another font is set.
//! let mut panel = CircularProgressPanel::new(200, 200);
//! let font = TextFont::default_face(24.0)?;
//! panel.set_text_property(TextPen::new(Color::WHITE, 1.0), Some(font));
//! panel.set_text("0.42mg/l");
//! panel.start_animation(50);
//! panel.show()?;
//! # Ok::<(), circular_progress::PanelError>(())
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod host;
pub mod panel;
pub mod text;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use canvas::{Bitmap, Canvas};
pub use config::{Color, PanelConfig};
pub use error::{PanelError, Result};
pub use geometry::{PanelGeometry, Point, Rect};
pub use host::{HostOptions, Widget};
pub use panel::{CircularProgressPanel, PanelCommand};
pub use text::{TextFont, TextPen};
