//! Application loop
//!
//! Owns the window (backend) and exactly one active game, and drives them one
//! frame at a time: close check, update, draw, present, then whatever the
//! update asked for (exit, or switching to another game).
//!
//! State machine: `Running -> Stopping -> Stopped`. `Stopped` is terminal.

use macroquad::color::{GREEN, ORANGE, RED};
use thiserror::Error;

use crate::backend::{Backend, BackendError, Canvas};
use crate::game::{Control, Game, GameError};
use crate::games::GameKind;
use crate::input::Action;
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Releasing the game, then the window
    Stopping,
    Stopped,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to start {kind:?}: {source}")]
    Startup {
        kind: GameKind,
        #[source]
        source: GameError,
    },
    #[error("window setup failed: {0}")]
    Window(#[from] BackendError),
    #[error("application loop has already stopped")]
    Stopped,
}

/// Builds a game for the loop; `GameKind::build` outside tests
type Factory<B> = Box<dyn FnMut(GameKind, &mut B) -> Result<Box<dyn Game<B>>, GameError>>;

pub struct App<B: Backend> {
    // Declared before `backend`: fields drop in order, so the game (and its
    // render targets) always goes before the window.
    active: Option<Box<dyn Game<B>>>,
    backend: Option<B>,
    factory: Factory<B>,
    state: LoopState,
    show_fps: bool,
}

impl<B: Backend> App<B> {
    /// Build the initial game on `backend`. The loop is `Running` only if
    /// that succeeds; otherwise the backend is dropped and nothing runs.
    pub fn new(backend: B, initial: GameKind) -> Result<Self, AppError> {
        let factory: Factory<B> = Box::new(|kind: GameKind, backend: &mut B| kind.build(backend));
        Self::with_factory(backend, initial, factory)
    }

    pub(crate) fn with_factory(
        mut backend: B,
        initial: GameKind,
        mut factory: Factory<B>,
    ) -> Result<Self, AppError> {
        let game = factory(initial, &mut backend).map_err(|source| {
            log::error!("Failed to start {}: {}", initial.label(), source);
            AppError::Startup {
                kind: initial,
                source,
            }
        })?;
        log::info!("Running {}", game.title());

        Ok(Self {
            active: Some(game),
            backend: Some(backend),
            factory,
            state: LoopState::Running,
            show_fps: false,
        })
    }

    /// Initial state of the FPS overlay (debug builds only; F12 toggles)
    pub fn with_fps_overlay(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn active_title(&self) -> Option<&str> {
        self.active.as_ref().map(|game| game.title())
    }

    /// Run one frame. Returns the state after the frame; calling this once
    /// the loop has stopped is an error.
    pub async fn frame(&mut self) -> Result<LoopState, AppError> {
        if self.state != LoopState::Running {
            return Err(AppError::Stopped);
        }
        let (Some(backend), Some(game)) = (self.backend.as_mut(), self.active.as_mut()) else {
            return Err(AppError::Stopped);
        };

        if backend.should_close() {
            log::info!("Close requested");
            self.stop();
            return Ok(self.state);
        }

        let input = backend.poll_input();
        if input.pressed(Action::ToggleFps) {
            self.show_fps = !self.show_fps;
        }

        let control = match game.update(&input) {
            Ok(control) => control,
            Err(e) => {
                log::warn!("{}: {}", game.title(), e);
                Control::Continue
            }
        };

        let canvas = backend.begin_frame();
        game.draw(canvas);
        if cfg!(debug_assertions) && self.show_fps {
            draw_fps(canvas, input.fps);
        }
        backend.end_frame().await;

        match control {
            Control::Continue => {}
            Control::Exit => {
                log::info!("{} requested exit", game.title());
                self.stop();
            }
            Control::Switch(kind) => self.replace_active(kind),
        }
        Ok(self.state)
    }

    /// Run frames until the loop stops
    pub async fn run(&mut self) -> Result<(), AppError> {
        while self.frame().await? != LoopState::Stopped {}
        Ok(())
    }

    /// Build the next game, then drop the current one, then install.
    /// If the build fails the current game stays.
    fn replace_active(&mut self, kind: GameKind) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        match (self.factory)(kind, backend) {
            Ok(next) => {
                if let Some(prev) = self.active.take() {
                    log::info!("Switching from {} to {}", prev.title(), next.title());
                }
                self.active = Some(next);
            }
            Err(e) => {
                log::error!("Could not start {}: {}", kind.label(), e);
            }
        }
    }

    fn stop(&mut self) {
        self.state = LoopState::Stopping;
        self.shutdown();
        self.state = LoopState::Stopped;
    }

    /// Release in reverse acquisition order: game, then window
    fn shutdown(&mut self) {
        if let Some(game) = self.active.take() {
            log::debug!("Releasing {}", game.title());
        }
        if self.backend.take().is_some() {
            log::debug!("Window released");
        }
    }
}

impl<B: Backend> Drop for App<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn draw_fps<C: Canvas + ?Sized>(canvas: &mut C, fps: i32) {
    let color = match fps {
        50.. => GREEN,
        30.. => ORANGE,
        _ => RED,
    };
    let size = theme::FONT_SIZE_DEBUG;
    canvas.text(&format!("FPS: {fps}"), 0.0, size, size, color);
}
