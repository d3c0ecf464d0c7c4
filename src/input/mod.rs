//! Input handling
//!
//! Action-based keyboard and mouse input, snapshotted once per frame.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
