use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);

    let (spans, hint) = match app.mode {
        Mode::Navigate => {
            let spans = if app.search.is_empty() {
                Vec::new()
            } else {
                vec![Span::styled(format!("/{}", app.search.text()), dim)]
            };
            (spans, "/ search  m move  e edit  f folder  a link  ? help")
        }
        Mode::Search => (
            vec![
                Span::styled(format!("/{}", app.search.text()), bright),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ],
            "Enter keep  Esc clear",
        ),
        Mode::Move => {
            let name = |id: Option<i64>| {
                id.and_then(|id| app.project(id))
                    .map(|p| p.name.clone())
            };
            let dragged = name(app.drag.dragged_id()).unwrap_or_default();
            let target = name(app.drag.drop_target())
                .unwrap_or_else(|| "pick a card".to_string());
            (
                vec![
                    Span::styled("move ", dim),
                    Span::styled(dragged, bright),
                    Span::styled(" \u{21C4} ", dim),
                    Span::styled(target, bright),
                ],
                "Enter swap  Esc cancel",
            )
        }
        Mode::Edit => (
            Vec::new(),
            "Tab field  \u{2193} suggestions  Ctrl+S save  Esc close/save",
        ),
        Mode::LinkInput | Mode::ConfirmFolder => (Vec::new(), ""),
    };

    let mut spans = spans;
    let width = area.width as usize;
    if app.show_key_hints && !hint.is_empty() {
        let used = spans_width(&spans);
        let hint_width = display_width(hint);
        if used + hint_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - hint_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hint, dim));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::tui::text_field::TextField;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn search_prompt_and_hint() {
        let mut app = loaded_app();
        app.mode = Mode::Search;
        app.search = TextField::new("alp");
        let output = render(&app);
        assert!(output.starts_with("/alp\u{258C}"));
        assert!(output.ends_with("Esc clear"));
    }

    #[test]
    fn move_mode_names_both_cards() {
        let mut app = loaded_app();
        app.mode = Mode::Move;
        app.drag.start(1);
        assert!(render(&app).contains("move alpha \u{21C4} pick a card"));
        app.drag.drag_over(3);
        assert!(render(&app).contains("move alpha \u{21C4} gamma"));
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = loaded_app();
        app.show_key_hints = false;
        assert_eq!(render(&app), "");
    }
}
