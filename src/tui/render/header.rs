use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::search::SortKey;
use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the title row (name, project count, sort) with a separator below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" \u{25B6} ", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            "ztouch",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(projects) = &app.projects {
        let shown = app.displayed().len();
        let count = if shown == projects.len() {
            format!("  {} projects", projects.len())
        } else {
            format!("  {} of {} projects", shown, projects.len())
        };
        spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let key = match app.sort.key {
        SortKey::Name => "name",
        SortKey::Order => "order",
    };
    let sort = format!("sort: {} {} ", key, app.sort.direction.arrow());
    let used = spans_width(&spans);
    let sort_width = crate::util::unicode::display_width(&sort);
    if used + sort_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - sort_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(sort, Style::default().fg(app.theme.text).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        chunks[0],
    );

    let separator = "\u{2500}".repeat(width);
    frame.render_widget(
        Paragraph::new(separator).style(Style::default().fg(app.theme.dim).bg(bg)),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::tui::text_field::TextField;

    #[test]
    fn shows_count_and_sort() {
        let mut app = loaded_app();
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.contains("ztouch  3 projects"));
        assert!(output.contains("sort: order \u{2191}"));

        app.search = TextField::new("gam");
        app.sort.toggle(SortKey::Name);
        app.sort.toggle(SortKey::Name);
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.contains("1 of 3 projects"));
        assert!(output.contains("sort: name \u{2193}"));
    }
}
