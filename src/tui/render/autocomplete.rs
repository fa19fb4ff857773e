use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::edit_modal::EditModal;
use crate::tui::theme::{Theme, pill_style};
use crate::util::unicode::{display_width, truncate_to_width};

/// Maximum number of visible entries in the dropdown
pub const MAX_VISIBLE: usize = 8;

/// What the dropdown occupies on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownHit {
    /// Whole popup including its border
    pub area: Rect,
    /// One rect per suggestion, indexed like the suggestion list.
    /// Entries scrolled out of view get an empty rect.
    pub entries: Vec<Rect>,
}

/// Render the tag suggestions floating below the tag input row. Returns
/// None when the dropdown is closed or has nothing to offer.
pub fn render_tag_dropdown(
    frame: &mut Frame,
    theme: &Theme,
    modal: &EditModal,
    input_row: Rect,
) -> Option<DropdownHit> {
    let suggestions = modal.tags.visible_suggestions(modal.attached());
    if suggestions.is_empty() {
        return None;
    }

    let bg = theme.background;
    let count = suggestions.len().min(MAX_VISIBLE);
    let term = frame.area();
    let popup_w = input_row.width.max(16).min(term.width);
    let popup_h = count as u16 + 2;

    // Below the input if it fits, otherwise above
    let y = if input_row.bottom() + popup_h <= term.bottom() {
        input_row.bottom()
    } else {
        input_row.y.saturating_sub(popup_h)
    };
    let x = input_row.x.min(term.width.saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(term);

    // Scroll window around the highlighted entry
    let highlighted = modal.tags.highlighted();
    let scroll_start = match highlighted {
        Some(h) if h >= MAX_VISIBLE => h + 1 - MAX_VISIBLE,
        _ => 0,
    };

    let inner_w = popup_w.saturating_sub(2) as usize;
    let mut entries = vec![Rect::default(); suggestions.len()];
    let mut lines: Vec<Line> = Vec::new();
    for (i, tag) in suggestions
        .iter()
        .enumerate()
        .skip(scroll_start)
        .take(MAX_VISIBLE)
    {
        let is_selected = highlighted == Some(i);
        let row_style = if is_selected {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(bg)
        };
        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let name = truncate_to_width(&tag.name, inner_w.saturating_sub(5));
        let used = 3 + display_width(&name) + 2;
        lines.push(Line::from(vec![
            Span::styled(prefix, row_style),
            Span::styled(format!(" {} ", name), pill_style(tag.color)),
            Span::styled(" ".repeat(inner_w.saturating_sub(used)), row_style),
        ]));
        entries[i] = Rect::new(
            popup_area.x + 1,
            popup_area.y + 1 + (i - scroll_start) as u16,
            inner_w as u16,
            1,
        )
        .intersection(term);
    }

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        popup_area,
    );

    Some(DropdownHit {
        area: popup_area,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::model::{Color, Project, Tag};
    use pretty_assertions::assert_eq;

    fn modal_with(catalog: &[Tag]) -> EditModal {
        EditModal::open(&Project::local(1, "zt", "/zt", 0), catalog, Color::default())
    }

    #[test]
    fn closed_dropdown_draws_nothing() {
        let theme = Theme::default();
        let modal = modal_with(&[Tag::new(1, "rust", Color::default())]);
        let mut hit = None;
        let output = render_to_string(40, 12, |frame, _| {
            hit = render_tag_dropdown(frame, &theme, &modal, Rect::new(2, 2, 30, 1));
        });
        assert!(hit.is_none());
        assert_eq!(output, "");
    }

    #[test]
    fn open_dropdown_marks_highlight() {
        let theme = Theme::default();
        let mut modal = modal_with(&[
            Tag::new(1, "rust", Color::default()),
            Tag::new(2, "web", Color::default()),
        ]);
        modal.tag_arrow_down();
        modal.tag_arrow_down();
        modal.tag_arrow_down();
        let mut hit = None;
        let output = render_to_string(40, 12, |frame, _| {
            hit = render_tag_dropdown(frame, &theme, &modal, Rect::new(2, 2, 30, 1));
        });
        let hit = hit.unwrap();
        assert!(output.contains("\u{25B8}  web"));
        assert_eq!(hit.area, Rect::new(2, 3, 30, 4));
        assert_eq!(hit.entries, vec![Rect::new(3, 4, 28, 1), Rect::new(3, 5, 28, 1)]);
    }

    #[test]
    fn flips_above_near_bottom() {
        let theme = Theme::default();
        let mut modal = modal_with(&[Tag::new(1, "rust", Color::default())]);
        modal.tag_arrow_down();
        let mut hit = None;
        render_to_string(40, 10, |frame, _| {
            hit = render_tag_dropdown(frame, &theme, &modal, Rect::new(2, 8, 30, 1));
        });
        assert_eq!(hit.unwrap().area, Rect::new(2, 5, 30, 3));
    }

    #[test]
    fn long_lists_scroll_with_highlight() {
        let theme = Theme::default();
        let catalog: Vec<Tag> = (1..=12)
            .map(|i| Tag::new(i, format!("t{:02}", i), Color::default()))
            .collect();
        let mut modal = modal_with(&catalog);
        for _ in 0..11 {
            modal.tag_arrow_down();
        }
        assert_eq!(modal.tags.highlighted(), Some(9));
        let mut hit = None;
        let output = render_to_string(40, 20, |frame, _| {
            hit = render_tag_dropdown(frame, &theme, &modal, Rect::new(0, 0, 30, 1));
        });
        let hit = hit.unwrap();
        assert!(hit.entries[0].is_empty());
        assert!(!hit.entries[2].is_empty());
        assert!(output.contains("t10"));
        assert!(!output.contains("t01"));
    }
}
