//! Immediate-mode drawing helpers
//!
//! Layout is plain rectangles; everything is redrawn every frame through a
//! `Canvas`, so the helpers work the same on the window and on icon targets.

mod rect;
mod viewport;
mod widgets;
pub mod theme;

pub use rect::*;
pub use viewport::*;
pub use widgets::*;
