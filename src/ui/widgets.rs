//! Basic drawing widgets shared by the launcher and the games

use macroquad::color::{Color, WHITE};
use macroquad::math::vec2;

use super::{theme, Rect};
use crate::backend::Canvas;

/// Draw text horizontally centered on `center_x`, baseline at `y`
pub fn centered_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    text: &str,
    center_x: f32,
    y: f32,
    size: f32,
    color: Color,
) {
    let dims = canvas.measure_text(text, size);
    canvas.text(text, (center_x - dims.x * 0.5).round(), y.round(), size, color);
}

/// Dim the whole canvas and show a title with an optional hint line
pub fn banner<C: Canvas + ?Sized>(canvas: &mut C, title: &str, hint: &str) {
    let size = canvas.size();
    canvas.rect(Rect::screen(size.x, size.y), theme::OVERLAY);

    let title_size = (size.x / 10.0).clamp(16.0, 80.0);
    let center = vec2(size.x * 0.5, size.y * 0.5);
    centered_text(canvas, title, center.x, center.y, title_size, WHITE);

    if !hint.is_empty() {
        let hint_size = (title_size * 0.4).max(10.0);
        centered_text(
            canvas,
            hint,
            center.x,
            center.y + title_size * 0.8,
            hint_size,
            theme::TEXT_COLOR,
        );
    }
}

/// Draw a game card: thumbnail on top, title strip below.
/// `selected` draws the accent border instead of the plain one.
pub fn card<C: Canvas + ?Sized>(
    canvas: &mut C,
    rect: Rect,
    title: &str,
    icon: &C::Target,
    selected: bool,
) {
    const BORDER_THICK: f32 = 1.0;

    canvas.rect(rect, theme::CARD_BG);

    let title_bar = rect.slice_bottom(theme::FONT_SIZE_CARD);
    canvas.rect(title_bar, theme::CARD_TITLE_BG);
    canvas.text(
        title,
        title_bar.x + BORDER_THICK * 4.0,
        title_bar.y + theme::FONT_SIZE_CARD / 1.5,
        theme::FONT_SIZE_CARD,
        WHITE,
    );

    let thumb = rect
        .remaining_after_bottom(theme::FONT_SIZE_CARD)
        .pad(BORDER_THICK * 2.0);
    canvas.texture(icon, thumb);

    if selected {
        canvas.rect_lines(rect, BORDER_THICK * 3.0, theme::ACCENT_COLOR);
    } else {
        canvas.rect_lines(rect, BORDER_THICK, theme::CARD_BORDER);
    }
}
