//! Breakout
//!
//! Clear the wall of bricks with a ball. Three lives; the ball is lost when
//! it falls past the paddle.

use macroquad::color::{Color, BLACK, WHITE};
use macroquad::math::{vec2, Vec2};

use super::ball::Ball;
use super::GameKind;
use crate::backend::{Backend, Canvas};
use crate::game::{icon_target, render_icon, Control, FrameError, Game, GameError};
use crate::input::{Action, FrameInput};
use crate::ui::{banner, theme, Rect, Viewport};

pub const TITLE: &str = "Breakout";

const ARENA: Vec2 = Vec2::new(800.0, 500.0);

const BRICK_ROWS: usize = 5;
const BRICK_COLS: usize = 10;
const BRICK_H: f32 = 20.0;
const BRICK_SPACING: f32 = 8.0;
const BRICK_TOP: f32 = 40.0;

const PADDLE_W: f32 = 100.0;
const PADDLE_H: f32 = 12.0;
const PADDLE_BOTTOM_GAP: f32 = 30.0;
const PADDLE_SPEED: f32 = 420.0;

const BALL_RADIUS: f32 = 6.0;
const BALL_VEL: Vec2 = Vec2::new(220.0, -260.0);
const MAX_BALL_SPEED: f32 = 650.0;

const LIVES: u32 = 3;
const MAX_DT: f32 = 1.0 / 20.0;

/// One color per brick row, top to bottom
const ROW_COLORS: [Color; BRICK_ROWS] = [
    Color::new(0.90, 0.30, 0.30, 1.0),
    Color::new(0.95, 0.60, 0.25, 1.0),
    Color::new(0.95, 0.85, 0.30, 1.0),
    Color::new(0.40, 0.80, 0.40, 1.0),
    Color::new(0.35, 0.60, 0.95, 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Brick {
    rect: Rect,
    row: usize,
    alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq)]
struct BreakoutState {
    bricks: Vec<Brick>,
    paddle_x: f32,
    ball: Ball,
    lives: u32,
    score: u32,
    paused: bool,
    phase: Phase,
}

fn build_wall() -> Vec<Brick> {
    let brick_w = (ARENA.x - BRICK_SPACING * (BRICK_COLS as f32 + 1.0)) / BRICK_COLS as f32;
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            let x = BRICK_SPACING + col as f32 * (brick_w + BRICK_SPACING);
            let y = BRICK_TOP + row as f32 * (BRICK_H + BRICK_SPACING);
            bricks.push(Brick {
                rect: Rect::new(x, y, brick_w, BRICK_H),
                row,
                alive: true,
            });
        }
    }
    bricks
}

fn paddle_y() -> f32 {
    ARENA.y - PADDLE_BOTTOM_GAP - PADDLE_H
}

/// Ball resting just above the paddle centre
fn serve(paddle_x: f32) -> Ball {
    Ball::new(
        vec2(paddle_x + PADDLE_W * 0.5, paddle_y() - BALL_RADIUS - 1.0),
        BALL_VEL,
        BALL_RADIUS,
    )
}

impl BreakoutState {
    fn initial() -> Self {
        let paddle_x = (ARENA.x - PADDLE_W) * 0.5;
        Self {
            bricks: build_wall(),
            paddle_x,
            ball: serve(paddle_x),
            lives: LIVES,
            score: 0,
            paused: false,
            phase: Phase::Playing,
        }
    }

    fn paddle(&self) -> Rect {
        Rect::new(self.paddle_x, paddle_y(), PADDLE_W, PADDLE_H)
    }

    fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}

pub struct Breakout<B: Backend> {
    state: BreakoutState,
    icon: B::Target,
}

impl<B: Backend> Breakout<B> {
    pub fn new(backend: &mut B) -> Result<Self, GameError> {
        let icon = icon_target(backend, TITLE)?;
        let breakout = Self {
            state: BreakoutState::initial(),
            icon,
        };
        render_icon(backend, &breakout);
        Ok(breakout)
    }

    fn step(&mut self, input: &FrameInput) {
        let dt = input.dt.clamp(0.0, MAX_DT);
        let s = &mut self.state;

        let dir = input.axis(Action::MoveLeft, Action::MoveRight);
        s.paddle_x = (s.paddle_x + dir * PADDLE_SPEED * dt).clamp(0.0, ARENA.x - PADDLE_W);

        s.ball.step(dt);
        s.ball.bounce_horizontal(ARENA.x);
        if s.ball.top() <= 0.0 && s.ball.vel.y < 0.0 {
            s.ball.pos.y = s.ball.radius;
            s.ball.vel.y = -s.ball.vel.y;
        }

        let paddle = s.paddle();
        if s.ball.vel.y > 0.0 && paddle.overlaps_circle(s.ball.pos, s.ball.radius) {
            s.ball.pos.y = paddle.y - s.ball.radius;
            // Angle depends on where the ball lands on the paddle
            let offset = ((s.ball.pos.x - paddle.center_x()) / (PADDLE_W * 0.5)).clamp(-1.0, 1.0);
            let speed = s.ball.vel.length();
            s.ball.vel = vec2(offset * 0.8, -1.0).normalize() * speed;
        }

        // At most one brick per frame
        if let Some(brick) = s
            .bricks
            .iter_mut()
            .find(|b| b.alive && b.rect.overlaps_circle(s.ball.pos, s.ball.radius))
        {
            brick.alive = false;
            s.score += 1;

            let r = brick.rect;
            let from_side = s.ball.pos.y > r.y && s.ball.pos.y < r.bottom();
            if from_side {
                s.ball.vel.x = -s.ball.vel.x;
            } else {
                s.ball.vel.y = -s.ball.vel.y;
            }
            s.ball.speed_up(1.02, MAX_BALL_SPEED);
        }

        if s.bricks_left() == 0 {
            s.phase = Phase::Won;
        } else if s.ball.top() > ARENA.y {
            s.lives = s.lives.saturating_sub(1);
            if s.lives == 0 {
                s.phase = Phase::Lost;
            } else {
                s.ball = serve(s.paddle_x);
            }
        }
    }
}

impl<B: Backend> Game<B> for Breakout<B> {
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
        if self.state.phase != Phase::Playing {
            return Ok(Control::Continue);
        }
        if input.pressed(Action::Pause) {
            self.state.paused = !self.state.paused;
        }
        if !self.state.paused {
            self.step(input);
        }
        Ok(Control::Continue)
    }

    fn draw(&self, canvas: &mut B::Canvas) {
        let s = &self.state;
        let vp = Viewport::fit(ARENA, canvas.size());

        canvas.clear(BLACK);
        canvas.rect_lines(vp.rect(Rect::screen(ARENA.x, ARENA.y)), 1.0, theme::CARD_BORDER);

        for brick in s.bricks.iter().filter(|b| b.alive) {
            canvas.rect(vp.rect(brick.rect), ROW_COLORS[brick.row]);
        }
        canvas.rect(vp.rect(s.paddle()), WHITE);
        canvas.circle(vp.point(s.ball.pos), vp.len(s.ball.radius), WHITE);

        let hud_size = vp.len(20.0);
        let hud_y = vp.point(vec2(0.0, 24.0)).y;
        canvas.text(
            &format!("Score {}", s.score),
            vp.point(vec2(10.0, 0.0)).x,
            hud_y,
            hud_size,
            theme::TEXT_COLOR,
        );
        let lives = format!("Lives {}", s.lives);
        let lives_w = canvas.measure_text(&lives, hud_size).x;
        canvas.text(
            &lives,
            vp.point(vec2(ARENA.x - 10.0, 0.0)).x - lives_w,
            hud_y,
            hud_size,
            theme::TEXT_COLOR,
        );

        match s.phase {
            Phase::Won => banner(canvas, "Cleared!", "R to play again, Esc for menu"),
            Phase::Lost => banner(canvas, "Game over", "R to play again, Esc for menu"),
            Phase::Playing if s.paused => banner(canvas, "Paused", "P to resume"),
            Phase::Playing => {}
        }
    }

    fn reset(&mut self) {
        self.state = BreakoutState::initial();
    }

    fn icon(&self) -> &B::Target {
        &self.icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{DrawOp, Event, RecordingBackend, Surface};

    fn input(dt: f32) -> FrameInput {
        FrameInput::idle(dt, vec2(800.0, 600.0))
    }

    fn game() -> (RecordingBackend, Breakout<RecordingBackend>) {
        let mut backend = RecordingBackend::new();
        let breakout = Breakout::new(&mut backend).unwrap();
        (backend, breakout)
    }

    #[test]
    fn test_wall_layout() {
        let wall = build_wall();
        assert_eq!(wall.len(), BRICK_ROWS * BRICK_COLS);
        let last = wall[wall.len() - 1].rect;
        assert!((last.right() - (ARENA.x - BRICK_SPACING)).abs() < 0.01);
        assert!(wall.iter().all(|b| b.alive));
    }

    #[test]
    fn test_icon_shows_full_wall() {
        let (backend, breakout) = game();
        let journal = backend.journal();
        let id = breakout.icon().id;
        let rects = journal
            .draws_on(Surface::Target(id))
            .into_iter()
            .filter(|op| matches!(op, DrawOp::Rect(..)))
            .count();
        // Every brick plus the paddle
        assert_eq!(rects, BRICK_ROWS * BRICK_COLS + 1);
        assert_eq!(journal.count(&Event::RenderTo(id)), 1);
    }

    #[test]
    fn test_brick_hit_removes_brick_and_reflects() {
        let (_backend, mut breakout) = game();
        let target = breakout.state.bricks[0].rect;
        breakout.state.ball = Ball::new(
            vec2(target.center_x(), target.bottom() + 4.0),
            vec2(0.0, -200.0),
            BALL_RADIUS,
        );

        breakout.update(&input(0.016)).unwrap();
        assert!(!breakout.state.bricks[0].alive);
        assert_eq!(breakout.state.score, 1);
        assert!(breakout.state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_losing_all_lives_ends_game() {
        let (_backend, mut breakout) = game();
        for expected in (0..LIVES).rev() {
            breakout.state.ball = Ball::new(vec2(400.0, ARENA.y + 20.0), vec2(0.0, 200.0), BALL_RADIUS);
            breakout.update(&input(0.016)).unwrap();
            assert_eq!(breakout.state.lives, expected);
        }
        assert_eq!(breakout.state.phase, Phase::Lost);

        // Frozen until restart
        let frozen = breakout.state.clone();
        breakout.update(&input(0.016).with_down(Action::MoveLeft)).unwrap();
        assert_eq!(breakout.state, frozen);
    }

    #[test]
    fn test_last_brick_wins() {
        let (_backend, mut breakout) = game();
        for brick in breakout.state.bricks.iter_mut().skip(1) {
            brick.alive = false;
        }
        let target = breakout.state.bricks[0].rect;
        breakout.state.ball = Ball::new(
            vec2(target.center_x(), target.bottom() + 4.0),
            vec2(0.0, -200.0),
            BALL_RADIUS,
        );
        breakout.update(&input(0.016)).unwrap();
        assert_eq!(breakout.state.phase, Phase::Won);
    }

    #[test]
    fn test_reset_rebuilds_wall() {
        let (mut backend, mut breakout) = game();
        let fresh = backend.capture(|c| breakout.draw(c));

        breakout.state.bricks[3].alive = false;
        breakout.state.lives = 1;
        breakout.reset();
        breakout.reset();

        assert_eq!(breakout.state, BreakoutState::initial());
        assert_eq!(backend.capture(|c| breakout.draw(c)), fresh);
    }

    #[test]
    fn test_back_returns_to_launcher() {
        let (_backend, mut breakout) = game();
        let control = breakout.update(&input(0.016).with_pressed(Action::Back)).unwrap();
        assert_eq!(control, Control::Switch(GameKind::Launcher));
    }
}
