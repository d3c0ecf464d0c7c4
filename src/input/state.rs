//! Per-frame input snapshot
//!
//! The backend polls macroquad once per frame into a `FrameInput`, which is
//! then handed to `Game::update`. Games never call macroquad's input functions
//! themselves, which keeps them testable without a window.

use std::collections::HashSet;

use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position,
    MouseButton,
};
use macroquad::math::{vec2, Vec2};
use macroquad::time::{get_fps, get_frame_time};
use macroquad::window::{screen_height, screen_width};

use super::Action;
use crate::ui::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
}

impl MouseState {
    pub fn pos(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Everything a game may read during one `update`
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
    pub fps: i32,
    /// Window size in logical pixels
    pub screen: Vec2,
    pub mouse: MouseState,
    down: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl FrameInput {
    /// Idle input: nothing held, nothing pressed
    #[cfg(test)]
    pub fn idle(dt: f32, screen: Vec2) -> Self {
        Self {
            dt,
            screen,
            ..Default::default()
        }
    }

    /// Read the current macroquad input state
    pub fn poll() -> Self {
        let (mx, my) = mouse_position();
        let mut input = Self {
            dt: get_frame_time(),
            fps: get_fps(),
            screen: vec2(screen_width(), screen_height()),
            mouse: MouseState {
                x: mx,
                y: my,
                left_down: is_mouse_button_down(MouseButton::Left),
                left_pressed: is_mouse_button_pressed(MouseButton::Left),
            },
            ..Default::default()
        };

        for action in Action::ALL {
            let keys = action.keys();
            if keys.iter().any(|k| is_key_down(*k)) {
                input.down.insert(action);
            }
            if keys.iter().any(|k| is_key_pressed(*k)) {
                input.pressed.insert(action);
            }
        }
        input
    }

    /// Mark an action as held this frame
    #[cfg(test)]
    pub fn with_down(mut self, action: Action) -> Self {
        self.down.insert(action);
        self
    }

    /// Mark an action as pressed this frame (implies held)
    #[cfg(test)]
    pub fn with_pressed(mut self, action: Action) -> Self {
        self.down.insert(action);
        self.pressed.insert(action);
        self
    }

    #[cfg(test)]
    pub fn with_mouse(mut self, mouse: MouseState) -> Self {
        self.mouse = mouse;
        self
    }

    /// Check if action is currently held down
    pub fn down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    /// Check if action was just pressed this frame
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// -1, 0 or 1 from a pair of opposing actions
    pub fn axis(&self, negative: Action, positive: Action) -> f32 {
        let mut v = 0.0;
        if self.down(negative) {
            v -= 1.0;
        }
        if self.down(positive) {
            v += 1.0;
        }
        v
    }
}
