//! Startup configuration
//!
//! Read once from a RON file before the window opens. Every field has a
//! default, so a partial file (or no file at all) works.
//!
//! ```ron
//! (
//!     window: (width: 1280, height: 720),
//!     start: Pong,
//!     log_filter: Some("kgames=debug"),
//! )
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use macroquad::window::Conf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{validate_window_size, BackendError};
use crate::games::GameKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Window(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Signed so a bad value in the file is reported, not wrapped
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub high_dpi: bool,
    pub resizable: bool,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "KGames".to_string(),
            high_dpi: true,
            resizable: true,
            fullscreen: false,
        }
    }
}

impl WindowConfig {
    /// macroquad window configuration; fails on sizes no window can have
    pub fn to_conf(&self) -> Result<Conf, ConfigError> {
        validate_window_size(self.width as i64, self.height as i64)?;
        Ok(Conf {
            window_title: self.title.clone(),
            window_width: self.width,
            window_height: self.height,
            high_dpi: self.high_dpi,
            fullscreen: self.fullscreen,
            window_resizable: self.resizable,
            sample_count: 1,
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Initial state of the FPS overlay (debug builds only)
    pub show_fps: bool,
    /// Game shown when the application starts
    pub start: GameKind,
    /// `env_logger` filter; `RUST_LOG` is used when absent
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            show_fps: true,
            start: GameKind::Launcher,
            log_filter: None,
        }
    }
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "kgames.ron";

    /// Load a config file. Missing and unreadable files are both errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    /// Load a config file, falling back to defaults when it doesn't exist.
    /// A file that exists but can't be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_ron("(start: Life, window: (width: 1024))").unwrap();
        assert_eq!(config.start, GameKind::Life);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "KGames");
        assert!(config.show_fps);
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"(window: (title: "Hello, World!"), show_fps: false, log_filter: Some("debug"))"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.window.title, "Hello, World!");
        assert!(!config.show_fps);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, Config::default());

        // But an explicit load still reports it
        assert!(matches!(
            Config::load(&dir.path().join("absent.ron")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid ron data").unwrap();
        assert!(matches!(
            Config::load_or_default(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_start_game_is_error() {
        assert!(Config::from_ron("(start: Tetris)").is_err());
    }

    #[test]
    fn test_to_conf() {
        let window = WindowConfig {
            width: 800,
            height: 600,
            title: "Hello, World!".to_string(),
            ..Default::default()
        };
        let conf = window.to_conf().unwrap();
        assert_eq!(conf.window_title, "Hello, World!");
        assert_eq!(conf.window_width, 800);
        assert_eq!(conf.window_height, 600);
        assert!(conf.window_resizable);
    }

    #[test]
    fn test_invalid_window_size_rejected() {
        for (width, height) in [(0, 600), (800, -1), (100_000, 600)] {
            let window = WindowConfig {
                width,
                height,
                ..Default::default()
            };
            assert!(matches!(
                window.to_conf(),
                Err(ConfigError::Window(BackendError::InvalidWindowSize { .. }))
            ));
        }
    }
}
