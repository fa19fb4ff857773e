use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::host::{HostHandle, HostReply};
use crate::model::{Color, Project, Tag};
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen at the default test size.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// alpha (folder, tagged rust), beta (link), gamma (folder)
pub fn sample_projects() -> Vec<Project> {
    let mut alpha = Project::local(1, "alpha", "/code/alpha", 0);
    alpha.tags = vec![rust_tag()];
    alpha.description = "first".into();
    vec![
        alpha,
        Project::link(2, "beta", "https://example.com/beta", 1),
        Project::local(3, "gamma", "/code/gamma", 2),
    ]
}

pub fn rust_tag() -> Tag {
    Tag::new(1, "rust", Color::new(0xFF, 0x44, 0x44))
}

/// An App whose host has not answered yet. Requests go nowhere.
pub fn empty_app() -> App {
    let (handle, _rx) = HostHandle::detached();
    App::new(handle, Theme::default(), Color::default())
}

/// An App holding `sample_projects` and a one-tag catalog.
pub fn loaded_app() -> App {
    let mut app = empty_app();
    app.apply_reply(HostReply::Projects(sample_projects()));
    app.apply_reply(HostReply::Tags(vec![rust_tag()]));
    app
}
