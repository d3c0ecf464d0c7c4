//! Arena-to-surface mapping
//!
//! Every game simulates in a fixed logical arena. Drawing goes through a
//! `Viewport` that scales the arena uniformly into whatever surface is bound
//! (the window, or a thumbnail render target) and centers it, so the same
//! draw code produces both the full view and the icon.

use macroquad::math::{vec2, Vec2};
use super::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: Vec2,
    pub scale: f32,
}

impl Viewport {
    /// Fit `arena` inside `surface`, preserving aspect ratio
    pub fn fit(arena: Vec2, surface: Vec2) -> Self {
        if arena.x <= 0.0 || arena.y <= 0.0 {
            return Self { offset: Vec2::ZERO, scale: 1.0 };
        }
        let scale = (surface.x / arena.x).min(surface.y / arena.y).max(0.0);
        let offset = (surface - arena * scale) * 0.5;
        Self { offset, scale }
    }

    /// Arena point to surface point
    pub fn point(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    /// Arena length to surface length
    pub fn len(&self, l: f32) -> f32 {
        l * self.scale
    }

    pub fn rect(&self, r: Rect) -> Rect {
        let p = self.point(vec2(r.x, r.y));
        Rect::new(p.x, p.y, r.w * self.scale, r.h * self.scale)
    }

    /// Surface point back to arena space (mouse picking)
    pub fn to_arena(&self, p: Vec2) -> Vec2 {
        if self.scale == 0.0 {
            return Vec2::ZERO;
        }
        (p - self.offset) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_letterboxes_wide_surface() {
        let vp = Viewport::fit(vec2(800.0, 400.0), vec2(1000.0, 400.0));
        assert!((vp.scale - 1.0).abs() < 0.001);
        assert!((vp.offset.x - 100.0).abs() < 0.001);
        assert!(vp.offset.y.abs() < 0.001);
    }

    #[test]
    fn test_fit_thumbnail() {
        // 2:1 arena into a 2:1 thumbnail fills it exactly
        let vp = Viewport::fit(vec2(800.0, 400.0), vec2(500.0, 250.0));
        assert!((vp.scale - 0.625).abs() < 0.001);
        assert_eq!(vp.offset, Vec2::ZERO);
        let r = vp.rect(Rect::new(0.0, 0.0, 800.0, 400.0));
        assert!((r.w - 500.0).abs() < 0.001);
        assert!((r.h - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_to_arena_inverts_point() {
        let vp = Viewport::fit(vec2(640.0, 320.0), vec2(800.0, 600.0));
        let p = vec2(123.0, 45.0);
        let back = vp.to_arena(vp.point(p));
        assert!((back - p).length() < 0.001);
    }
}
