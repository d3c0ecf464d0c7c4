//! Pong
//!
//! Player paddle on the left (W/S or arrows) against a computer paddle that
//! chases the ball at a capped speed. First to `WIN_SCORE` wins.

use macroquad::color::{Color, BLACK, GRAY, WHITE};
use macroquad::math::{vec2, Vec2};

use super::ball::Ball;
use super::GameKind;
use crate::backend::{Backend, Canvas};
use crate::game::{icon_target, render_icon, Control, FrameError, Game, GameError};
use crate::input::{Action, FrameInput};
use crate::ui::{banner, centered_text, Rect, Viewport};

pub const TITLE: &str = "Pong";

const ARENA: Vec2 = Vec2::new(800.0, 400.0);
const PADDLE_W: f32 = 12.0;
const PADDLE_H: f32 = 70.0;
const PADDLE_MARGIN: f32 = 24.0;
const PLAYER_SPEED: f32 = 380.0;
const CPU_SPEED: f32 = 260.0;
const BALL_RADIUS: f32 = 7.0;
const SERVE_VEL: Vec2 = Vec2::new(300.0, 180.0);
const HIT_SPEEDUP: f32 = 1.05;
const MAX_BALL_SPEED: f32 = 720.0;
/// Vertical velocity added when the ball hits a paddle edge
const PADDLE_ENGLISH: f32 = 120.0;
const WIN_SCORE: u32 = 7;
/// Frame time cap so a stall can't tunnel the ball through a paddle
const MAX_DT: f32 = 1.0 / 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Player,
    Cpu,
}

/// Everything `draw` reads; compared in tests to check `reset`
#[derive(Debug, Clone, PartialEq)]
struct PongState {
    ball: Ball,
    /// Paddle top edges
    player_y: f32,
    cpu_y: f32,
    player_score: u32,
    cpu_score: u32,
    paused: bool,
    winner: Option<Side>,
}

impl PongState {
    fn initial() -> Self {
        let paddle_y = (ARENA.y - PADDLE_H) * 0.5;
        Self {
            ball: serve_towards(Side::Cpu),
            player_y: paddle_y,
            cpu_y: paddle_y,
            player_score: 0,
            cpu_score: 0,
            paused: false,
            winner: None,
        }
    }

    fn player_rect(&self) -> Rect {
        Rect::new(PADDLE_MARGIN, self.player_y, PADDLE_W, PADDLE_H)
    }

    fn cpu_rect(&self) -> Rect {
        Rect::new(ARENA.x - PADDLE_MARGIN - PADDLE_W, self.cpu_y, PADDLE_W, PADDLE_H)
    }
}

/// Ball at the centre, heading for `side`
fn serve_towards(side: Side) -> Ball {
    let dir = match side {
        Side::Player => -1.0,
        Side::Cpu => 1.0,
    };
    Ball::new(ARENA * 0.5, vec2(SERVE_VEL.x * dir, SERVE_VEL.y), BALL_RADIUS)
}

/// Reflect the ball off a paddle, steering by where it hit
fn deflect(ball: &mut Ball, paddle: Rect, towards_right: bool) {
    ball.pos.x = if towards_right {
        paddle.right() + ball.radius
    } else {
        paddle.x - ball.radius
    };
    ball.vel.x = if towards_right { ball.vel.x.abs() } else { -ball.vel.x.abs() };

    let offset = ((ball.pos.y - paddle.center_y()) / (PADDLE_H * 0.5)).clamp(-1.0, 1.0);
    ball.vel.y += offset * PADDLE_ENGLISH;
    ball.speed_up(HIT_SPEEDUP, MAX_BALL_SPEED);
}

pub struct Pong<B: Backend> {
    state: PongState,
    icon: B::Target,
}

impl<B: Backend> Pong<B> {
    pub fn new(backend: &mut B) -> Result<Self, GameError> {
        let icon = icon_target(backend, TITLE)?;
        let pong = Self {
            state: PongState::initial(),
            icon,
        };
        render_icon(backend, &pong);
        Ok(pong)
    }

    fn step(&mut self, input: &FrameInput) {
        let dt = input.dt.clamp(0.0, MAX_DT);
        let s = &mut self.state;

        let max_y = ARENA.y - PADDLE_H;
        let dir = input.axis(Action::MoveUp, Action::MoveDown);
        s.player_y = (s.player_y + dir * PLAYER_SPEED * dt).clamp(0.0, max_y);

        let chase = s.ball.pos.y - (s.cpu_y + PADDLE_H * 0.5);
        let limit = CPU_SPEED * dt;
        s.cpu_y = (s.cpu_y + chase.clamp(-limit, limit)).clamp(0.0, max_y);

        s.ball.step(dt);
        s.ball.bounce_vertical(ARENA.y);

        if s.ball.vel.x < 0.0 && s.player_rect().overlaps_circle(s.ball.pos, s.ball.radius) {
            let paddle = s.player_rect();
            deflect(&mut s.ball, paddle, true);
        } else if s.ball.vel.x > 0.0 && s.cpu_rect().overlaps_circle(s.ball.pos, s.ball.radius) {
            let paddle = s.cpu_rect();
            deflect(&mut s.ball, paddle, false);
        }

        if s.ball.right() < 0.0 {
            s.cpu_score += 1;
            s.ball = serve_towards(Side::Player);
        } else if s.ball.left() > ARENA.x {
            s.player_score += 1;
            s.ball = serve_towards(Side::Cpu);
        }

        if s.player_score >= WIN_SCORE {
            s.winner = Some(Side::Player);
        } else if s.cpu_score >= WIN_SCORE {
            s.winner = Some(Side::Cpu);
        }
    }
}

impl<B: Backend> Game<B> for Pong<B> {
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
        if self.state.winner.is_some() {
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
        const NET: Color = GRAY;
        const SCORE_SIZE: f32 = 48.0;

        let s = &self.state;
        let vp = Viewport::fit(ARENA, canvas.size());

        canvas.clear(BLACK);

        // Dashed net
        let net_x = ARENA.x * 0.5;
        let dash = 20.0;
        let mut y = 0.0;
        while y < ARENA.y {
            let from = vp.point(vec2(net_x, y));
            let to = vp.point(vec2(net_x, (y + dash * 0.5).min(ARENA.y)));
            canvas.line(from, to, vp.len(3.0).max(1.0), NET);
            y += dash;
        }

        let score_size = vp.len(SCORE_SIZE);
        let score_y = vp.point(vec2(0.0, SCORE_SIZE + 8.0)).y;
        centered_text(
            canvas,
            &s.player_score.to_string(),
            vp.point(vec2(ARENA.x * 0.25, 0.0)).x,
            score_y,
            score_size,
            GRAY,
        );
        centered_text(
            canvas,
            &s.cpu_score.to_string(),
            vp.point(vec2(ARENA.x * 0.75, 0.0)).x,
            score_y,
            score_size,
            GRAY,
        );

        canvas.rect(vp.rect(s.player_rect()), WHITE);
        canvas.rect(vp.rect(s.cpu_rect()), WHITE);
        canvas.circle(vp.point(s.ball.pos), vp.len(s.ball.radius), WHITE);

        match s.winner {
            Some(Side::Player) => banner(canvas, "You win!", "R to play again, Esc for menu"),
            Some(Side::Cpu) => banner(canvas, "CPU wins", "R to play again, Esc for menu"),
            None if s.paused => banner(canvas, "Paused", "P to resume"),
            None => {}
        }
    }

    fn reset(&mut self) {
        self.state = PongState::initial();
    }

    fn icon(&self) -> &B::Target {
        &self.icon
    }
}
