//! Launcher
//!
//! The game-select screen. It is a `Game` like any other: the loop drives it
//! the same way, and picking a card hands control back to the loop as
//! `Control::Switch`.
//!
//! Each card shows the icon of a dormant preview instance. Previews exist only
//! so their icon targets stay alive; nothing ever updates or draws them.

use macroquad::color::WHITE;
use macroquad::math::Vec2;

use super::GameKind;
use crate::backend::{Backend, Canvas};
use crate::game::{icon_target, render_icon, Control, FrameError, Game, GameError};
use crate::input::{Action, FrameInput};
use crate::ui::{card, centered_text, theme, Rect};

pub const TITLE: &str = "KGames";

const HINT: &str = "Enter to play, Esc to quit";

const CARDS_PER_ROW: usize = 4;
const CARD_SPACING: f32 = 10.0;

fn version_text() -> String {
    format!("v{}", crate::VERSION)
}

/// Title font size for a surface width
fn title_size(width: f32) -> f32 {
    (width / 10.0).clamp(40.0, 105.0)
}

/// Card bounds for `count` games on a surface of `size`.
/// Shared by `update` (hit testing) and `draw` so both see the same layout.
fn card_rects(size: Vec2, count: usize) -> Vec<Rect> {
    let top = title_size(size.x) + 20.0;
    let w = (size.x - CARD_SPACING * (CARDS_PER_ROW as f32 + 1.0)) / CARDS_PER_ROW as f32;
    let h = w / 2.0 + theme::FONT_SIZE_CARD;

    (0..count)
        .map(|i| {
            let col = (i % CARDS_PER_ROW) as f32;
            let row = (i / CARDS_PER_ROW) as f32;
            Rect::new(
                CARD_SPACING + col * (w + CARD_SPACING),
                top + CARD_SPACING + row * (h + CARD_SPACING),
                w,
                h,
            )
        })
        .collect()
}

struct Preview<B: Backend> {
    kind: GameKind,
    game: Box<dyn Game<B>>,
}

pub struct Launcher<B: Backend> {
    previews: Vec<Preview<B>>,
    selected: usize,
    /// Mouse position last frame; hover only moves the selection when the
    /// mouse itself moves, so keyboard selection isn't overridden
    last_mouse: Option<Vec2>,
    icon: B::Target,
}

impl<B: Backend> Launcher<B> {
    pub fn new(backend: &mut B) -> Result<Self, GameError> {
        let mut previews = Vec::with_capacity(GameKind::GAMES.len());
        for kind in GameKind::GAMES {
            previews.push(Preview {
                kind,
                game: kind.build(backend)?,
            });
        }
        log::debug!("Launcher built {} previews", previews.len());

        let icon = icon_target(backend, TITLE)?;
        let launcher = Self {
            previews,
            selected: 0,
            last_mouse: None,
            icon,
        };
        render_icon(backend, &launcher);
        Ok(launcher)
    }

    fn select_step(&mut self, delta: isize) {
        let last = self.previews.len().saturating_sub(1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn launch(&self, index: usize) -> Control {
        match self.previews.get(index) {
            Some(preview) => {
                log::info!("Launching {}", preview.game.title());
                Control::Switch(preview.kind)
            }
            None => Control::Continue,
        }
    }
}

impl<B: Backend> Game<B> for Launcher<B> {
    fn title(&self) -> &str {
        TITLE
    }

    fn update(&mut self, input: &FrameInput) -> Result<Control, FrameError> {
        if input.pressed(Action::Back) {
            return Ok(Control::Exit);
        }

        if input.pressed(Action::MoveLeft) {
            self.select_step(-1);
        }
        if input.pressed(Action::MoveRight) {
            self.select_step(1);
        }
        if input.pressed(Action::MoveUp) {
            self.select_step(-(CARDS_PER_ROW as isize));
        }
        if input.pressed(Action::MoveDown) {
            self.select_step(CARDS_PER_ROW as isize);
        }

        let rects = card_rects(input.screen, self.previews.len());
        let mouse = input.mouse;
        let hovered = rects.iter().position(|r| mouse.inside(r));

        if self.last_mouse != Some(mouse.pos()) {
            if let Some(i) = hovered {
                self.selected = i;
            }
        }
        self.last_mouse = Some(mouse.pos());

        if let Some(i) = rects.iter().position(|r| mouse.clicked(r)) {
            return Ok(self.launch(i));
        }
        if input.pressed(Action::Confirm) {
            return Ok(self.launch(self.selected));
        }
        Ok(Control::Continue)
    }

    fn draw(&self, canvas: &mut B::Canvas) {
        let size = canvas.size();
        canvas.clear(theme::BG_COLOR);

        let ts = title_size(size.x);
        centered_text(canvas, TITLE, size.x * 0.5, ts, ts, WHITE);

        let rects = card_rects(size, self.previews.len());
        for (i, (preview, rect)) in self.previews.iter().zip(rects).enumerate() {
            card(
                canvas,
                rect,
                preview.game.title(),
                preview.game.icon(),
                i == self.selected,
            );
        }

        let small = theme::FONT_SIZE_SMALL;
        canvas.text(&version_text(), 0.0, size.y - 5.0, small, theme::TEXT_DIM);
        let hint_w = canvas.measure_text(HINT, small).x;
        canvas.text(HINT, size.x - hint_w - 5.0, size.y - 5.0, small, theme::TEXT_DIM);
    }

    fn reset(&mut self) {
        self.selected = 0;
        self.last_mouse = None;
    }

    fn icon(&self) -> &B::Target {
        &self.icon
    }
}
