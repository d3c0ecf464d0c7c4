//! Built-in games
//!
//! `GameKind` names every game the loop can construct. It is what the config
//! file uses for the start game and what `Control::Switch` carries.

mod ball;
mod breakout;
mod launcher;
mod life;
mod pong;

pub use breakout::Breakout;
pub use launcher::Launcher;
pub use life::Life;
pub use pong::Pong;

use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::game::{Game, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameKind {
    #[default]
    Launcher,
    Pong,
    Breakout,
    Life,
}

impl GameKind {
    /// Everything the launcher offers, in card order
    pub const GAMES: [GameKind; 3] = [GameKind::Pong, GameKind::Breakout, GameKind::Life];

    pub fn label(&self) -> &'static str {
        match self {
            GameKind::Launcher => launcher::TITLE,
            GameKind::Pong => pong::TITLE,
            GameKind::Breakout => breakout::TITLE,
            GameKind::Life => life::TITLE,
        }
    }

    /// Construct a fresh instance, icon included
    pub fn build<B: Backend>(self, backend: &mut B) -> Result<Box<dyn Game<B>>, GameError> {
        Ok(match self {
            GameKind::Launcher => Box::new(Launcher::new(backend)?),
            GameKind::Pong => Box::new(Pong::new(backend)?),
            GameKind::Breakout => Box::new(Breakout::new(backend)?),
            GameKind::Life => Box::new(Life::new(backend)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Event, RecordingBackend};

    #[test]
    fn test_build_matches_label() {
        let mut backend = RecordingBackend::new();
        for kind in GameKind::GAMES {
            let game = kind.build(&mut backend).unwrap();
            assert_eq!(game.title(), kind.label());
        }
        let launcher = GameKind::Launcher.build(&mut backend).unwrap();
        assert_eq!(launcher.title(), GameKind::Launcher.label());
    }

    #[test]
    fn test_build_failure_leaks_nothing() {
        let mut backend = RecordingBackend::new();
        let journal = backend.journal();
        backend.fail_targets = true;
        for kind in GameKind::GAMES {
            assert!(matches!(kind.build(&mut backend), Err(GameError::Icon { .. })));
        }
        assert_eq!(journal.count(&Event::CreateTarget(0)), 0);
    }

    #[test]
    fn test_kind_ron_names() {
        let kind: GameKind = ron::from_str("Life").unwrap();
        assert_eq!(kind, GameKind::Life);
        assert_eq!(ron::to_string(&GameKind::Breakout).unwrap(), "Breakout");
    }
}
