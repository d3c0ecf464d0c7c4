//! KGames: a small collection of arcade games behind a launcher
//!
//! Pick a game from the launcher; Escape goes back to it, and Escape on the
//! launcher quits.
//!
//! Usage: `kgames [config.ron]` (defaults to `kgames.ron` in the working
//! directory; a missing file means default settings).

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod backend;
mod config;
mod game;
mod games;
mod input;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process;

use app::{App, AppError};
use backend::MacroquadBackend;
use config::Config;
use logging::{init_logging, LoggingConfig};

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Config::DEFAULT_PATH));
    let config = Config::load_or_default(&path);

    init_logging(LoggingConfig {
        env_filter: config.as_ref().ok().and_then(|c| c.log_filter.clone()),
    });

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}: {}", path.display(), e);
            process::exit(1);
        }
    };

    // Window settings are checked before anything is shown
    let conf = match config.window.to_conf() {
        Ok(conf) => conf,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    log::info!("=== KGames v{} ===", VERSION);
    macroquad::Window::from_config(conf, run(config));
}

async fn run(config: Config) {
    if let Err(e) = play(config).await {
        log::error!("{}", e);
        process::exit(1);
    }
}

async fn play(config: Config) -> Result<(), AppError> {
    let backend = MacroquadBackend::new(&config.window)?;
    let mut app = App::new(backend, config.start)?.with_fps_overlay(config.show_fps);
    app.run().await?;
    log::info!("Loop {:?}, exiting", app.state());
    Ok(())
}
