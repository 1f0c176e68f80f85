//! Errors raised while loading resources or hosting a panel in a window.

use std::path::PathBuf;
use thiserror::Error;

/// Drawing and panel state updates never fail; only resource loading and the
/// window host do.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Font data could not be parsed.
    #[error("Invalid font data")]
    FontParse,

    /// Font file could not be read.
    #[error("Failed to read font file {path}: {source}")]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Event loop creation or execution failed.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failed.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// Framebuffer setup or presentation failed.
    #[error("Framebuffer error: {0}")]
    Pixels(#[from] pixels::Error),

    /// A window cannot host a zero-sized framebuffer.
    #[error("Cannot open a {width}x{height} surface")]
    EmptySurface { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, PanelError>;
