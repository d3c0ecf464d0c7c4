//! Conway's Game of Life on a wrapping grid

use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};
use macroquad::rand;

use super::GameKind;
use crate::backend::{Backend, Canvas};
use crate::game::{icon_target, render_icon, Control, FrameError, Game, GameError};
use crate::input::{Action, FrameInput};
use crate::ui::{Rect, Viewport};

pub const TITLE: &str = "Game of Life";

const GRID_W: usize = 64;
const GRID_H: usize = 32;
const CELL: f32 = 10.0;
const ARENA: Vec2 = Vec2::new(GRID_W as f32 * CELL, GRID_H as f32 * CELL);

/// Seconds per generation
const TICK: f32 = 0.1;
/// Generations a single slow frame may catch up on
const MAX_TICKS_PER_FRAME: u32 = 4;

/// Live cells at generation zero: a glider, a blinker, a toad and an
/// R-pentomino
const SEED: &[(usize, usize)] = &[
    // glider
    (3, 1), (4, 2), (2, 3), (3, 3), (4, 3),
    // blinker
    (20, 6), (21, 6), (22, 6),
    // toad
    (10, 20), (11, 20), (12, 20), (9, 21), (10, 21), (11, 21),
    // R-pentomino
    (41, 15), (42, 15), (40, 16), (41, 16), (41, 17),
];

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::new(r, g, b, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Gruvbox,
    Matrix,
    Midnight,
    Bolus,
}

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Gruvbox,
        Theme::Matrix,
        Theme::Midnight,
        Theme::Bolus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "Default",
            Theme::Gruvbox => "Gruvbox",
            Theme::Matrix => "Matrix",
            Theme::Midnight => "Midnight",
            Theme::Bolus => "BOLUS",
        }
    }

    /// Next theme, wrapping around
    pub fn next(self) -> Theme {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn style(self) -> Style {
        match self {
            Theme::Default | Theme::Bolus => Style {
                bg: rgb(0.0, 0.0, 0.0),
                fg: rgb(1.0, 1.0, 1.0),
                accent: rgb(0.0, 0.894, 0.188),
            },
            Theme::Gruvbox => Style {
                bg: rgb(0.156, 0.156, 0.156),
                fg: rgb(0.921, 0.858, 0.698),
                accent: rgb(0.800, 0.141, 0.113),
            },
            Theme::Matrix => Style {
                bg: rgb(0.074, 0.090, 0.129),
                fg: rgb(0.196, 0.776, 0.011),
                accent: rgb(0.0, 0.474, 0.945),
            },
            Theme::Midnight => Style {
                bg: rgb(0.0, 0.0, 0.0),
                fg: rgb(0.784, 0.784, 0.784),
                accent: rgb(0.0, 0.474, 0.945),
            },
        }
    }
}

/// Toroidal cell grid; row-major
#[derive(Debug, Clone, PartialEq)]
struct Grid {
    cells: Vec<bool>,
    scratch: Vec<bool>,
}

impl Grid {
    fn seeded() -> Self {
        let mut grid = Self {
            cells: vec![false; GRID_W * GRID_H],
            scratch: vec![false; GRID_W * GRID_H],
        };
        for &(x, y) in SEED {
            grid.set(x, y, true);
        }
        grid
    }

    fn index(x: usize, y: usize) -> usize {
        (y % GRID_H) * GRID_W + (x % GRID_W)
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.cells[Self::index(x, y)]
    }

    fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.cells[Self::index(x, y)] = alive;
    }

    fn toggle(&mut self, x: usize, y: usize) {
        let i = Self::index(x, y);
        self.cells[i] = !self.cells[i];
    }

    fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn randomize(&mut self) {
        for cell in &mut self.cells {
            *cell = rand::rand() & 1 == 0;
        }
    }

    fn alive(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    fn neighbours(&self, x: usize, y: usize) -> u8 {
        let mut n = 0;
        for dy in [GRID_H - 1, 0, 1] {
            for dx in [GRID_W - 1, 0, 1] {
                if (dx, dy) != (0, 0) && self.get(x + dx, y + dy) {
                    n += 1;
                }
            }
        }
        n
    }

    fn tick(&mut self) {
        for y in 0..GRID_H {
            for x in 0..GRID_W {
                let next = matches!((self.get(x, y), self.neighbours(x, y)), (true, 2 | 3) | (false, 3));
                self.scratch[Self::index(x, y)] = next;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LifeState {
    grid: Grid,
    generation: u64,
    /// Time carried over towards the next generation
    acc: f32,
    paused: bool,
    theme: Theme,
    /// Cell under the mouse
    hover: Option<(usize, usize)>,
}

impl LifeState {
    fn initial() -> Self {
        Self {
            grid: Grid::seeded(),
            generation: 0,
            acc: 0.0,
            paused: false,
            theme: Theme::default(),
            hover: None,
        }
    }
}

/// Grid cell under a surface point, if any
fn cell_at(vp: &Viewport, p: Vec2) -> Option<(usize, usize)> {
    let a = vp.to_arena(p);
    if a.x < 0.0 || a.y < 0.0 || a.x >= ARENA.x || a.y >= ARENA.y {
        return None;
    }
    Some(((a.x / CELL) as usize, (a.y / CELL) as usize))
}

pub struct Life<B: Backend> {
    state: LifeState,
    icon: B::Target,
}

impl<B: Backend> Life<B> {
    pub fn new(backend: &mut B) -> Result<Self, GameError> {
        let icon = icon_target(backend, TITLE)?;
        let life = Self {
            state: LifeState::initial(),
            icon,
        };
        render_icon(backend, &life);
        Ok(life)
    }
}

impl<B: Backend> Game<B> for Life<B> {
    fn title(&self) -> &str {
        TITLE
    }

    fn update(&mut self, input: &FrameInput) -> Result<Control, FrameError> {
        if input.pressed(Action::Back) {
            return Ok(Control::Switch(GameKind::Launcher));
        }
        if input.pressed(Action::Restart) {
            self.reset();
            return Ok(Control::Continue);
        }

        let s = &mut self.state;
        if input.pressed(Action::Pause) {
            s.paused = !s.paused;
        }
        if input.pressed(Action::Clear) {
            s.grid.clear();
        }
        if input.pressed(Action::Randomize) {
            s.grid.randomize();
        }
        if input.pressed(Action::CycleTheme) {
            s.theme = s.theme.next();
        }

        let vp = Viewport::fit(ARENA, input.screen);
        s.hover = cell_at(&vp, input.mouse.pos());
        if input.mouse.left_pressed {
            if let Some((x, y)) = s.hover {
                s.grid.toggle(x, y);
            }
        }

        if !s.paused {
            s.acc += input.dt.max(0.0);
            let mut ticks = 0;
            while s.acc >= TICK && ticks < MAX_TICKS_PER_FRAME {
                s.grid.tick();
                s.generation += 1;
                s.acc -= TICK;
                ticks += 1;
            }
            // Drop whatever a long stall left over
            if ticks == MAX_TICKS_PER_FRAME {
                s.acc = s.acc.min(TICK);
            }
        }
        Ok(Control::Continue)
    }

    fn draw(&self, canvas: &mut B::Canvas) {
        let s = &self.state;
        let style = s.theme.style();
        let vp = Viewport::fit(ARENA, canvas.size());
        let cell = vp.len(CELL);

        canvas.clear(style.bg);

        for y in 0..GRID_H {
            for x in 0..GRID_W {
                if s.grid.get(x, y) {
                    let p = vp.point(vec2(x as f32 * CELL, y as f32 * CELL));
                    canvas.rect(Rect::new(p.x, p.y, cell, cell), style.fg);
                }
            }
        }

        if let Some((x, y)) = s.hover {
            let p = vp.point(vec2(x as f32 * CELL, y as f32 * CELL));
            canvas.rect_lines(Rect::new(p.x, p.y, cell, cell), 2.0, style.accent);
        }

        let hud = vp.len(16.0).max(8.0);
        let mut status = format!(
            "Gen {}  Alive {}  {}",
            s.generation,
            s.grid.alive(),
            s.theme.name()
        );
        if s.paused {
            status.push_str("  Paused");
        }
        let origin = vp.point(vec2(4.0, 16.0));
        canvas.text(&status, origin.x, origin.y, hud, style.accent);
    }

    fn reset(&mut self) {
        self.state = LifeState::initial();
    }

    fn icon(&self) -> &B::Target {
        &self.icon
    }
}
