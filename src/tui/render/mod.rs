pub mod autocomplete;
pub mod grid;
pub mod header;
pub mod help_overlay;
pub mod helpers;
pub mod modal;
pub mod prompt;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use super::app::{App, Mode};

/// Main render function: draws the screen and records hit areas for the mouse
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | cards | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    app.hits.modal = None;
    if app.projects.is_some() {
        grid::render_grid(frame, app, chunks[1]);
    } else {
        app.hits.cards.clear();
        render_loading(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays, drawn on top of everything
    match app.mode {
        Mode::Edit => modal::render_modal(frame, app, area),
        Mode::LinkInput | Mode::ConfirmFolder => prompt::render_prompt(frame, app, area),
        _ => {}
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let y = area.y + area.height / 2;
    let row = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    let text = Paragraph::new("Loading projects\u{2026}")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(text, row);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::host::HostReply;
    use crate::ops::search::search_regex;
    use ratatui::style::Color;

    #[test]
    fn loading_until_first_fetch() {
        let mut app = empty_app();
        let output = render_app(&mut app);
        assert!(output.contains("Loading projects"));
        assert!(app.hits.cards.is_empty());

        app.apply_reply(HostReply::Projects(sample_projects()));
        let output = render_app(&mut app);
        assert!(!output.contains("Loading projects"));
        assert!(output.contains("alpha"));
    }

    #[test]
    fn highlighted_spans_split_at_matches() {
        let re = search_regex("al");
        let mut spans = Vec::new();
        let base = Style::default();
        let hl = Style::default().bg(Color::Red);
        push_highlighted_spans(&mut spans, "Alpha dial", base, hl, re.as_ref());
        let parts: Vec<(&str, bool)> = spans
            .iter()
            .map(|s| (s.content.as_ref(), s.style == hl))
            .collect();
        assert_eq!(
            parts,
            vec![("Al", true), ("pha di", false), ("al", true)]
        );
    }

    #[test]
    fn no_regex_is_one_span() {
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "beta", Style::default(), Style::default(), None);
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn modal_and_prompt_overlays() {
        let mut app = loaded_app();
        app.open_edit(1);
        let output = render_app(&mut app);
        assert!(output.contains("Edit project"));
        assert!(app.hits.modal.is_some());

        app.cancel_edit();
        app.mode = Mode::LinkInput;
        let output = render_app(&mut app);
        assert!(output.contains("Add link"));
        assert!(app.hits.modal.is_none());
    }
}
