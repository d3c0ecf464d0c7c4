//! Recording backend for tests
//!
//! Journals every backend call, draw command, and target release into a
//! shared `Journal`, so tests can assert on ordering (update before draw,
//! game dropped before window) without a GPU.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::{ready, Future};
use std::rc::Rc;

use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};

use super::{validate_target_size, Backend, BackendError, Canvas};
use crate::input::FrameInput;
use crate::ui::Rect;

pub type TargetId = usize;

/// Which surface a draw command landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Window,
    Target(TargetId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Rect(Rect, Color),
    RectLines(Rect, f32, Color),
    Circle(Vec2, f32, Color),
    Line(Vec2, Vec2, f32, Color),
    Text(String, Vec2, f32, Color),
    Texture(TargetId, Rect),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ShouldClose(bool),
    PollInput,
    BeginFrame,
    EndFrame,
    CreateTarget(TargetId),
    RenderTo(TargetId),
    ReleaseTarget(TargetId),
    Draw(Surface, DrawOp),
    /// Written by test games
    Update(&'static str),
    DrawGame(&'static str),
    GameDropped(&'static str),
    BackendDropped,
}

/// Shared, append-only event log
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, event: &Event) -> usize {
        self.0.borrow().iter().filter(|e| *e == event).count()
    }

    /// Draw commands that landed on `surface`, in order
    pub fn draws_on(&self, surface: Surface) -> Vec<DrawOp> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Draw(s, op) if *s == surface => Some(op.clone()),
                _ => None,
            })
            .collect()
    }

    /// Position of the first matching event
    pub fn position(&self, event: &Event) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == event)
    }
}

/// Render target handle; journals its own release
#[derive(Debug)]
pub struct RecordingTarget {
    pub id: TargetId,
    pub size: Vec2,
    journal: Journal,
}

impl Drop for RecordingTarget {
    fn drop(&mut self) {
        self.journal.push(Event::ReleaseTarget(self.id));
    }
}

pub struct RecordingCanvas {
    surface: Surface,
    size: Vec2,
    journal: Journal,
}

impl RecordingCanvas {
    fn record(&self, op: DrawOp) {
        self.journal.push(Event::Draw(self.surface, op));
    }
}

impl Canvas for RecordingCanvas {
    type Target = RecordingTarget;

    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.record(DrawOp::Clear(color));
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawOp::Rect(rect, color));
    }

    fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.record(DrawOp::RectLines(rect, thickness, color));
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.record(DrawOp::Circle(center, radius, color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.record(DrawOp::Line(from, to, thickness, color));
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.record(DrawOp::Text(text.to_string(), vec2(x, y), size, color));
    }

    fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        vec2(text.chars().count() as f32 * size * 0.5, size * 0.75)
    }

    fn texture(&mut self, target: &RecordingTarget, dest: Rect) {
        self.record(DrawOp::Texture(target.id, dest));
    }
}

/// Scripted backend: close requests and input are queued up front
pub struct RecordingBackend {
    journal: Journal,
    window: RecordingCanvas,
    closes: VecDeque<bool>,
    inputs: VecDeque<FrameInput>,
    next_target: TargetId,
    /// Make every `create_target` fail
    pub fail_targets: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::with_size(800.0, 600.0)
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        let journal = Journal::default();
        Self {
            window: RecordingCanvas {
                surface: Surface::Window,
                size: vec2(width, height),
                journal: journal.clone(),
            },
            journal,
            closes: VecDeque::new(),
            inputs: VecDeque::new(),
            next_target: 0,
            fail_targets: false,
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Queue the answers for the next `should_close` calls (default `false`)
    pub fn script_closes(&mut self, closes: &[bool]) {
        self.closes.extend(closes.iter().copied());
    }

    /// Queue input for the next `poll_input` calls (default idle)
    pub fn script_input(&mut self, input: FrameInput) {
        self.inputs.push_back(input);
    }

    /// Draw something straight onto the window and return what was recorded
    pub fn capture<F>(&mut self, draw: F) -> Vec<DrawOp>
    where
        F: FnOnce(&mut RecordingCanvas),
    {
        let before = self.journal.events().len();
        draw(&mut self.window);
        self.journal.events()[before..]
            .iter()
            .filter_map(|e| match e {
                Event::Draw(_, op) => Some(op.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RecordingBackend {
    fn drop(&mut self) {
        self.journal.push(Event::BackendDropped);
    }
}

impl Backend for RecordingBackend {
    type Target = RecordingTarget;
    type Canvas = RecordingCanvas;

    fn should_close(&mut self) -> bool {
        let close = self.closes.pop_front().unwrap_or(false);
        self.journal.push(Event::ShouldClose(close));
        close
    }

    fn poll_input(&mut self) -> FrameInput {
        self.journal.push(Event::PollInput);
        self.inputs
            .pop_front()
            .unwrap_or_else(|| FrameInput::idle(1.0 / 60.0, self.window.size))
    }

    fn begin_frame(&mut self) -> &mut RecordingCanvas {
        self.journal.push(Event::BeginFrame);
        &mut self.window
    }

    fn end_frame(&mut self) -> impl Future<Output = ()> {
        self.journal.push(Event::EndFrame);
        ready(())
    }

    fn create_target(&mut self, width: u32, height: u32) -> Result<RecordingTarget, BackendError> {
        validate_target_size(width, height)?;
        if self.fail_targets {
            return Err(BackendError::TargetAllocation("scripted failure".to_string()));
        }
        let id = self.next_target;
        self.next_target += 1;
        self.journal.push(Event::CreateTarget(id));
        Ok(RecordingTarget {
            id,
            size: vec2(width as f32, height as f32),
            journal: self.journal.clone(),
        })
    }

    fn render_to<F>(&mut self, target: &RecordingTarget, draw: F)
    where
        F: FnOnce(&mut RecordingCanvas),
    {
        self.journal.push(Event::RenderTo(target.id));
        let mut canvas = RecordingCanvas {
            surface: Surface::Target(target.id),
            size: target.size,
            journal: self.journal.clone(),
        };
        draw(&mut canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_released_once_on_drop() {
        let mut backend = RecordingBackend::new();
        let journal = backend.journal();
        let target = backend.create_target(500, 250).unwrap();
        let id = target.id;
        assert_eq!(journal.count(&Event::ReleaseTarget(id)), 0);
        drop(target);
        assert_eq!(journal.count(&Event::ReleaseTarget(id)), 1);
    }

    #[test]
    fn test_render_to_records_on_target_surface() {
        let mut backend = RecordingBackend::new();
        let journal = backend.journal();
        let target = backend.create_target(10, 10).unwrap();
        backend.render_to(&target, |c| c.clear(Color::new(0.0, 0.0, 0.0, 1.0)));
        assert_eq!(journal.draws_on(Surface::Target(target.id)).len(), 1);
        assert!(journal.draws_on(Surface::Window).is_empty());
    }

    #[test]
    fn test_scripted_closes_then_default() {
        let mut backend = RecordingBackend::new();
        backend.script_closes(&[false, true]);
        assert!(!backend.should_close());
        assert!(backend.should_close());
        assert!(!backend.should_close());
    }
}
