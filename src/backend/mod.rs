//! Render backend adapter
//!
//! The core only talks to the window and GPU through these two traits:
//! - `Backend`: window lifetime, frame begin/end, input polling, and
//!   off-screen render target creation
//! - `Canvas`: primitive drawing against whatever surface is currently bound
//!
//! `macroquad` provides the production implementation. Tests use the
//! recording backend, which journals every call instead of touching a GPU.

mod mq;
#[cfg(test)]
pub mod recording;

pub use mq::MacroquadBackend;

use std::future::Future;

use macroquad::color::Color;
use macroquad::math::Vec2;
use thiserror::Error;

use crate::input::FrameInput;
use crate::ui::Rect;

/// Largest window or render target edge we accept
pub const MAX_SURFACE_EDGE: u32 = 16384;

/// Backend error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("invalid window size {width}x{height}")]
    InvalidWindowSize { width: i64, height: i64 },
    #[error("invalid render target size {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },
    #[error("render target allocation failed: {0}")]
    TargetAllocation(String),
}

/// Check requested window dimensions before anything is created
pub fn validate_window_size(width: i64, height: i64) -> Result<(), BackendError> {
    let valid = 1..=MAX_SURFACE_EDGE as i64;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(BackendError::InvalidWindowSize { width, height })
    }
}

/// Check requested render target dimensions
pub fn validate_target_size(width: u32, height: u32) -> Result<(), BackendError> {
    let valid = 1..=MAX_SURFACE_EDGE;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(BackendError::InvalidTargetSize { width, height })
    }
}

/// The driver may hand back a smaller texture than asked for (e.g. past its
/// max texture size); treat that as a failed allocation
pub fn check_allocated(width: u32, height: u32, got: Vec2) -> Result<(), BackendError> {
    if got.x as u32 == width && got.y as u32 == height {
        Ok(())
    } else {
        Err(BackendError::TargetAllocation(format!(
            "asked for {}x{}, got {}x{}",
            width, height, got.x, got.y
        )))
    }
}

/// Drawing commands against the currently bound surface.
///
/// Coordinates are surface pixels with the origin in the top-left corner.
pub trait Canvas {
    /// Off-screen target type this canvas can sample from
    type Target;

    /// Size of the bound surface
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color);
    fn rect(&mut self, rect: Rect, color: Color);
    fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);
    /// Draw text with its baseline at `y`
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    fn measure_text(&self, text: &str, size: f32) -> Vec2;
    /// Draw a render target's texture stretched into `dest`
    fn texture(&mut self, target: &Self::Target, dest: Rect);
}

/// Window, frame pacing, input, and render targets.
///
/// The application loop is the only owner of a backend. Dropping it closes
/// the window, so anything holding a `Target` must be dropped first.
pub trait Backend: 'static {
    /// Off-screen render target; releases its texture on drop
    type Target: 'static;
    type Canvas: Canvas<Target = Self::Target>;

    /// Whether the platform asked the window to close
    fn should_close(&mut self) -> bool;

    /// Snapshot this frame's input
    fn poll_input(&mut self) -> FrameInput;

    /// Start a frame with the window bound as draw target
    fn begin_frame(&mut self) -> &mut Self::Canvas;

    /// Present the frame; resolves at the next frame boundary
    fn end_frame(&mut self) -> impl Future<Output = ()>;

    fn create_target(&mut self, width: u32, height: u32) -> Result<Self::Target, BackendError>;

    /// Bind `target`, run `draw` against it, then rebind the window
    fn render_to<F>(&mut self, target: &Self::Target, draw: F)
    where
        F: FnOnce(&mut Self::Canvas);
}
