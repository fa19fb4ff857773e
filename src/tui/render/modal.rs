use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, ModalHit};
use crate::tui::edit_modal::{EditModal, ModalField};
use crate::tui::text_field::TextField;
use crate::tui::theme::{Theme, pill_style, rgb};
use crate::util::unicode::{display_col_to_byte_offset, display_width, truncate_to_width};

use super::autocomplete::render_tag_dropdown;
use super::helpers::{centered, row, set_cursor_at};

const MODAL_W: u16 = 64;
const MODAL_H: u16 = 13;

/// Render the edit modal centered over `area` and record its hit areas.
pub fn render_modal(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(modal) = app.modal.as_ref() else {
        return;
    };
    let hit = draw_modal(frame, &app.theme, modal, area);
    app.hits.modal = Some(hit);
}

fn draw_modal(frame: &mut Frame, theme: &Theme, modal: &EditModal, area: Rect) -> ModalHit {
    let bg = theme.background;
    let modal_area = centered(MODAL_W, MODAL_H, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(
            " Edit project ",
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let body = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    );
    let label = Style::default().fg(theme.dim).bg(bg);

    // Name
    frame.render_widget(Paragraph::new(Span::styled("Name", label)), row(body, 0));
    let name_row = row(body, 1);
    draw_field(frame, theme, &modal.name, name_row, modal.focus == ModalField::Name, "");

    // Description
    frame.render_widget(
        Paragraph::new(Span::styled("Description", label)),
        row(body, 2),
    );
    let description_row = row(body, 3);
    draw_field(
        frame,
        theme,
        &modal.description,
        description_row,
        modal.focus == ModalField::Description,
        "",
    );

    // Location is not editable
    let location = truncate_to_width(modal.location(), body.width as usize);
    frame.render_widget(Paragraph::new(Span::styled(location, label)), row(body, 4));

    // Tags header with the swatch new tags will get
    let swatch = modal.tags.swatch;
    let mut header = vec![Span::styled("Tags", label)];
    let swatch_text = format!("new tag color {} \u{2190}/\u{2192}", swatch.to_hex());
    let pad = (body.width as usize)
        .saturating_sub(4 + display_width(&swatch_text) + 3);
    header.push(Span::styled(" ".repeat(pad), label));
    header.push(Span::styled("new tag color ", label));
    header.push(Span::styled("  ", Style::default().bg(rgb(swatch))));
    header.push(Span::styled(
        format!(" {} \u{2190}/\u{2192}", swatch.to_hex()),
        label,
    ));
    frame.render_widget(Paragraph::new(Line::from(header)), row(body, 6));

    // Attached pills
    let pills_row = row(body, 7);
    let attached = draw_attached(frame, theme, modal, pills_row);

    // Tag input
    let input_row = row(body, 8);
    draw_field(
        frame,
        theme,
        &modal.tags.input,
        input_row,
        modal.focus == ModalField::TagInput,
        "type to add a tag",
    );

    // Buttons
    let buttons_row = row(body, 10);
    let (save, cancel) = draw_buttons(frame, theme, modal.focus, buttons_row);

    // Dropdown last so it floats over the buttons
    let mut combobox = input_row;
    let mut suggestions = Vec::new();
    if let Some(dropdown) = render_tag_dropdown(frame, theme, modal, input_row) {
        combobox = combobox.union(dropdown.area);
        suggestions = dropdown.entries;
    }

    ModalHit {
        area: modal_area,
        name: name_row,
        description: description_row,
        combobox,
        suggestions,
        attached,
        save,
        cancel,
    }
}

/// One-line input. The text scrolls so the cursor stays in view.
fn draw_field(
    frame: &mut Frame,
    theme: &Theme,
    field: &TextField,
    area: Rect,
    focused: bool,
    placeholder: &str,
) {
    if area.is_empty() {
        return;
    }
    let bg = if focused {
        theme.selection_bg
    } else {
        theme.background
    };
    let width = area.width as usize;
    let cursor_col = field.cursor_col();
    let start_col = cursor_col.saturating_sub(width.saturating_sub(1));
    let start = display_col_to_byte_offset(field.text(), start_col);
    let visible = &field.text()[start..];

    let span = if field.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(theme.dim).bg(bg))
    } else {
        Span::styled(
            truncate_to_width(visible, width),
            Style::default().fg(theme.text_bright).bg(bg),
        )
    };
    frame.render_widget(Paragraph::new(span).style(Style::default().bg(bg)), area);

    if focused {
        set_cursor_at(frame, area, cursor_col - start_col);
    }
}

/// Attached tags as removable pills. Returns each pill's area.
fn draw_attached(
    frame: &mut Frame,
    theme: &Theme,
    modal: &EditModal,
    area: Rect,
) -> Vec<(u32, Rect)> {
    let bg = theme.background;
    let focused = modal.focus == ModalField::AttachedTags;
    let mut spans = Vec::new();
    let mut hits = Vec::new();
    let mut x = area.x;

    if modal.attached().is_empty() {
        let style = if focused {
            Style::default().fg(theme.text).bg(theme.selection_bg)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        spans.push(Span::styled("no tags", style));
    }
    for (i, tag) in modal.attached().iter().enumerate() {
        let text = format!(" {} \u{00D7} ", tag.name);
        let w = display_width(&text) as u16;
        if x + w > area.right() {
            spans.push(Span::styled("\u{2026}", Style::default().fg(theme.dim).bg(bg)));
            break;
        }
        let mut style = pill_style(tag.color);
        if focused && i == modal.tag_cursor {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(text, style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        hits.push((tag.id, Rect::new(x, area.y, w, 1)));
        x += w + 1;
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    hits
}

fn draw_buttons(frame: &mut Frame, theme: &Theme, focus: ModalField, area: Rect) -> (Rect, Rect) {
    let style = |active: bool| {
        if active {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        }
    };
    let save_text = "[ Save ]";
    let cancel_text = "[ Cancel ]";
    let save = Rect::new(area.x, area.y, save_text.len() as u16, area.height).intersection(area);
    let cancel = Rect::new(
        area.x + save_text.len() as u16 + 2,
        area.y,
        cancel_text.len() as u16,
        area.height,
    )
    .intersection(area);

    let line = Line::from(vec![
        Span::styled(save_text, style(focus == ModalField::Save)),
        Span::styled("  ", Style::default().bg(theme.background)),
        Span::styled(cancel_text, style(focus == ModalField::Cancel)),
        Span::styled(
            "   Esc saves",
            Style::default().fg(theme.dim).bg(theme.background),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
    (save, cancel)
}
