//! Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the launcher and the in-game overlays.

use macroquad::color::Color;

// =============================================================================
// Base Colors
// =============================================================================

/// Launcher background
pub const BG_COLOR: Color = Color::new(0.11, 0.12, 0.12, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.5, 0.5, 0.5, 1.0);

/// Accent color (selection highlight)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

// =============================================================================
// Game Cards
// =============================================================================

/// Card body behind the thumbnail
pub const CARD_BG: Color = Color::new(0.1, 0.1, 0.1, 1.0);

/// Card title strip
pub const CARD_TITLE_BG: Color = Color::new(0.05, 0.05, 0.05, 1.0);

/// Card border
pub const CARD_BORDER: Color = Color::new(0.92, 0.85, 0.86, 1.0);

// =============================================================================
// Overlays
// =============================================================================

/// Dim layer behind banners (game over, paused)
pub const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.5);

// =============================================================================
// Font Sizes
// =============================================================================

/// Card title text size
pub const FONT_SIZE_CARD: f32 = 20.0;

/// Debug overlay text size
pub const FONT_SIZE_DEBUG: f32 = 20.0;

/// Version subtext size
pub const FONT_SIZE_SMALL: f32 = 15.0;
