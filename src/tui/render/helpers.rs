use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
pub(super) fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// One row of `area`, or an empty rect if `offset` is past its bottom
pub(super) fn row(area: Rect, offset: u16) -> Rect {
    if offset >= area.height {
        return Rect::new(area.x, area.bottom(), area.width, 0);
    }
    Rect::new(area.x, area.y + offset, area.width, 1)
}

/// Show the terminal cursor `col` cells into `area`, clamped to its last cell
pub(super) fn set_cursor_at(frame: &mut Frame, area: Rect, col: usize) {
    if area.is_empty() {
        return;
    }
    let col = col.min(area.width.saturating_sub(1) as usize) as u16;
    frame.set_cursor_position(Position::new(area.x + col, area.y));
}
