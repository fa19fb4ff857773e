use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Projects",
        &[
            (" \u{2190}\u{2191}\u{2193}\u{2192}/hjkl", "Move between cards"),
            (" g/G", "First / last card"),
            (" o", "Open folder or link"),
            (" Enter/e", "Edit project"),
            (" f", "Add a folder"),
            (" a", "Add a link"),
            (" /", "Search names and tags"),
            (" N / O", "Sort by name / order (again flips)"),
            (" Esc", "Clear search"),
        ],
    ),
    (
        "Reorder",
        &[
            (" m", "Pick up card, arrows choose target"),
            (" Enter", "Swap with target"),
            (" mouse drag", "Drag a card onto another"),
        ],
    ),
    (
        "Edit",
        &[
            (" Tab/S-Tab", "Next / previous field"),
            (" \u{2193}\u{2191} Enter", "Pick or create a tag"),
            (" \u{2190}/\u{2192}", "New tag color"),
            (" Esc", "Close suggestions, then save"),
        ],
    ),
    (
        "Window",
        &[
            (" Ctrl+R", "Reload"),
            (" Ctrl+M", "Minimize"),
            (" Ctrl+W", "Close"),
            (" Ctrl+Q / q", "Quit"),
        ],
    ),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(format!(" {}", title), header_style)));
        for (key, desc) in *bindings {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    }
    lines.pop();

    let height = lines.len() as u16 + 2;
    let overlay_area = centered(56, height, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Key Bindings ", header_style))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<16}", key);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
