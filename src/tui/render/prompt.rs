use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_col_to_byte_offset, truncate_to_width};

use super::helpers::{centered, row, set_cursor_at};

/// Small centered box for adding a link or confirming a picked folder
pub fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let (title, body, hint) = match app.mode {
        Mode::LinkInput => (" Add link ", None, "Enter add  Esc cancel"),
        Mode::ConfirmFolder => (
            " Add folder ",
            app.pending_folder.as_deref(),
            "Enter add  Esc discard",
        ),
        _ => return,
    };

    let bg = app.theme.background;
    let prompt_area = centered(60, 5, area);
    frame.render_widget(Clear, prompt_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(prompt_area);
    frame.render_widget(block, prompt_area);

    let inner = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height);
    let width = inner.width as usize;
    let input_row = row(inner, 0);

    match body {
        Some(path) => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    truncate_to_width(path, width),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                )),
                input_row,
            );
        }
        None => {
            let prefix = "URL ";
            let field = &app.link_input;
            let room = width.saturating_sub(prefix.len() + 1);
            let text = field.text();
            let shown = if field.cursor_col() > room {
                let skip = field.cursor_col() - room;
                let start = display_col_to_byte_offset(text, skip);
                &text[start..]
            } else {
                text
            };
            let line = Line::from(vec![
                Span::styled(prefix, Style::default().fg(app.theme.dim).bg(bg)),
                Span::styled(
                    truncate_to_width(shown, room + 1),
                    Style::default().fg(app.theme.text_bright).bg(app.theme.selection_bg),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), input_row);
            let col = field.cursor_col().min(room) + prefix.len();
            set_cursor_at(frame, input_row, col);
        }
    }

    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg))),
        row(inner, 2),
    );
}
