//! Ball shared by Pong and Breakout

use macroquad::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub const fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn step(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Reflect off the top and bottom of an arena of height `h`.
    /// Returns true if a bounce happened.
    pub fn bounce_vertical(&mut self, h: f32) -> bool {
        if self.top() <= 0.0 && self.vel.y < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
            true
        } else if self.bottom() >= h && self.vel.y > 0.0 {
            self.pos.y = h - self.radius;
            self.vel.y = -self.vel.y;
            true
        } else {
            false
        }
    }

    /// Reflect off the left and right sides of an arena of width `w`
    pub fn bounce_horizontal(&mut self, w: f32) -> bool {
        if self.left() <= 0.0 && self.vel.x < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
            true
        } else if self.right() >= w && self.vel.x > 0.0 {
            self.pos.x = w - self.radius;
            self.vel.x = -self.vel.x;
            true
        } else {
            false
        }
    }

    /// Scale speed by `factor`, capped at `max`
    pub fn speed_up(&mut self, factor: f32, max: f32) {
        let speed = (self.vel.length() * factor).min(max);
        self.vel = self.vel.normalize_or_zero() * speed;
    }
}
