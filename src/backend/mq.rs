//! macroquad implementation of the render backend
//!
//! macroquad keeps its window and GL context in global state, so the canvas
//! is just a size plus free-function calls. Binding a render target means
//! switching the active camera; `render_to` always switches back.

use std::future::Future;

use macroquad::camera::{set_camera, set_default_camera, Camera2D};
use macroquad::color::{Color, WHITE};
use macroquad::input::{is_quit_requested, prevent_quit};
use macroquad::math::{vec2, Vec2};
use macroquad::shapes::{draw_circle, draw_line, draw_rectangle, draw_rectangle_lines};
use macroquad::text::{draw_text, measure_text};
use macroquad::texture::{
    draw_texture_ex, render_target, DrawTextureParams, FilterMode, RenderTarget,
};
use macroquad::window::{clear_background, next_frame, screen_height, screen_width};

use super::{
    check_allocated, validate_target_size, validate_window_size, Backend, BackendError, Canvas,
};
use crate::config::WindowConfig;
use crate::input::FrameInput;
use crate::ui::Rect;

/// Canvas over macroquad's immediate-mode drawing functions
pub struct MacroquadCanvas {
    size: Vec2,
}

impl Canvas for MacroquadCanvas {
    type Target = RenderTarget;

    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        draw_text(text, x, y, size, color);
    }

    fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        let dims = measure_text(text, None, size.max(1.0) as u16, 1.0);
        vec2(dims.width, dims.height)
    }

    fn texture(&mut self, target: &RenderTarget, dest: Rect) {
        draw_texture_ex(
            &target.texture,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        );
    }
}

/// The window created by `macroquad::Window::from_config`
pub struct MacroquadBackend {
    canvas: MacroquadCanvas,
}

impl MacroquadBackend {
    /// Take ownership of the already-open macroquad window.
    ///
    /// Close requests are intercepted so the loop can drop the active game
    /// before the window goes away.
    pub fn new(config: &WindowConfig) -> Result<Self, BackendError> {
        validate_window_size(config.width as i64, config.height as i64)?;
        prevent_quit();
        log::info!(
            "window \"{}\" {}x{} ready",
            config.title,
            screen_width(),
            screen_height()
        );
        Ok(Self {
            canvas: MacroquadCanvas {
                size: vec2(screen_width(), screen_height()),
            },
        })
    }
}

impl Backend for MacroquadBackend {
    type Target = RenderTarget;
    type Canvas = MacroquadCanvas;

    fn should_close(&mut self) -> bool {
        is_quit_requested()
    }

    fn poll_input(&mut self) -> FrameInput {
        FrameInput::poll()
    }

    fn begin_frame(&mut self) -> &mut MacroquadCanvas {
        set_default_camera();
        self.canvas.size = vec2(screen_width(), screen_height());
        &mut self.canvas
    }

    fn end_frame(&mut self) -> impl Future<Output = ()> {
        next_frame()
    }

    fn create_target(&mut self, width: u32, height: u32) -> Result<RenderTarget, BackendError> {
        validate_target_size(width, height)?;
        let target = render_target(width, height);
        check_allocated(width, height, target.texture.size())?;
        target.texture.set_filter(FilterMode::Linear);
        Ok(target)
    }

    fn render_to<F>(&mut self, target: &RenderTarget, draw: F)
    where
        F: FnOnce(&mut MacroquadCanvas),
    {
        let size = target.texture.size();
        let camera = Camera2D {
            target: size * 0.5,
            zoom: vec2(2.0 / size.x, 2.0 / size.y),
            render_target: Some(target.clone()),
            ..Default::default()
        };
        set_camera(&camera);

        let mut canvas = MacroquadCanvas { size };
        draw(&mut canvas);

        set_default_camera();
    }
}
