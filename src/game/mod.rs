//! Game contract
//!
//! The one interface the application loop uses to drive any game:
//! - `update`: advance one frame, report what the loop should do next
//! - `draw`: render the current state onto whatever canvas is bound
//! - `reset`: go back to the initial condition, keeping the icon target
//! - `icon`: thumbnail texture, valid for the instance's whole lifetime
//!
//! The same `draw` produces the window view and the icon; the caller decides
//! which surface the canvas points at.

use thiserror::Error;

use crate::backend::{Backend, BackendError};
use crate::games::GameKind;
use crate::input::FrameInput;

/// Icon render target resolution (2:1, scaled into launcher cards)
pub const ICON_WIDTH: u32 = 500;
pub const ICON_HEIGHT: u32 = 250;

/// What the loop should do after this frame is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Stop the whole application
    Exit,
    /// Replace the active game with a freshly built one
    Switch(GameKind),
}

/// Failure to construct a game; fatal for the instance
#[derive(Debug, Error)]
pub enum GameError {
    #[error("could not create icon target for {title}: {source}")]
    Icon {
        title: &'static str,
        #[source]
        source: BackendError,
    },
}

/// A non-fatal problem inside a single frame.
///
/// The loop logs it, treats the frame as `Control::Continue`, and still
/// draws and presents.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FrameError(pub String);

pub trait Game<B: Backend> {
    fn title(&self) -> &str;

    fn update(&mut self, input: &FrameInput) -> Result<Control, FrameError>;

    fn draw(&self, canvas: &mut B::Canvas);

    fn reset(&mut self);

    fn icon(&self) -> &B::Target;
}

/// Allocate an icon target at the standard thumbnail size
pub fn icon_target<B: Backend>(backend: &mut B, title: &'static str) -> Result<B::Target, GameError> {
    backend
        .create_target(ICON_WIDTH, ICON_HEIGHT)
        .map_err(|source| GameError::Icon { title, source })
}

/// Draw a game's current state into its own icon target
pub fn render_icon<B: Backend, G: Game<B> + ?Sized>(backend: &mut B, game: &G) {
    backend.render_to(game.icon(), |canvas| game.draw(canvas));
}
