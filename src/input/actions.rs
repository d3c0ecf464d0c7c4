//! Action definitions
//!
//! Games read actions, never raw keys. The keyboard mapping lives in one
//! place so every game agrees on what Escape or R means.

use macroquad::input::KeyCode;

/// Everything a game can ask the input layer about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (WASD / arrows)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    Confirm,     // Enter / Space
    Back,        // Escape - leave the game, or quit from the launcher
    Pause,       // P
    Restart,     // R

    // Game of Life tools
    Clear,       // C
    Randomize,   // X
    CycleTheme,  // T

    ToggleFps,   // F12
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Confirm,
        Action::Back,
        Action::Pause,
        Action::Restart,
        Action::Clear,
        Action::Randomize,
        Action::CycleTheme,
        Action::ToggleFps,
    ];

    /// Keys bound to this action
    pub fn keys(&self) -> &'static [KeyCode] {
        match self {
            Action::MoveUp => &[KeyCode::W, KeyCode::Up],
            Action::MoveDown => &[KeyCode::S, KeyCode::Down],
            Action::MoveLeft => &[KeyCode::A, KeyCode::Left],
            Action::MoveRight => &[KeyCode::D, KeyCode::Right],
            Action::Confirm => &[KeyCode::Enter, KeyCode::KpEnter, KeyCode::Space],
            Action::Back => &[KeyCode::Escape],
            Action::Pause => &[KeyCode::P],
            Action::Restart => &[KeyCode::R],
            Action::Clear => &[KeyCode::C],
            Action::Randomize => &[KeyCode::X],
            Action::CycleTheme => &[KeyCode::T],
            Action::ToggleFps => &[KeyCode::F12],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_key() {
        for action in Action::ALL {
            assert!(!action.keys().is_empty(), "{:?} is unbound", action);
        }
    }

    #[test]
    fn test_no_key_bound_twice() {
        let mut seen = Vec::new();
        for action in Action::ALL {
            for key in action.keys() {
                assert!(!seen.contains(key), "{:?} bound twice", key);
                seen.push(*key);
            }
        }
    }
}
