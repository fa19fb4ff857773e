use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use regex::Regex;

use crate::model::{Location, Project, Tag};
use crate::tui::app::{App, CardHit, Mode};
use crate::tui::theme::pill_style;
use crate::util::unicode::{display_width, truncate_to_width};

use super::push_highlighted_spans;

/// Narrowest a card may get before the grid drops a column
const CARD_MIN_W: u16 = 28;
/// Border + name, location, description, tags
const CARD_H: u16 = 6;
const GAP: u16 = 1;

/// How one card should be drawn
#[derive(Debug, Clone, Copy, Default)]
struct CardState {
    selected: bool,
    dragged: bool,
    drop_target: bool,
}

/// Number of card columns that fit in `width`
pub fn grid_columns(width: u16) -> usize {
    ((width + GAP) / (CARD_MIN_W + GAP)).max(1) as usize
}

/// Render the card grid, scrolled so the cursor stays visible. Records each
/// card's screen area in `app.hits`.
pub fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = grid_columns(area.width);
    let visible_rows = (area.height / CARD_H).max(1) as usize;
    app.columns = columns;
    app.clamp_cursor();

    let cursor_row = app.cursor / columns;
    if cursor_row < app.scroll_row {
        app.scroll_row = cursor_row;
    } else if cursor_row >= app.scroll_row + visible_rows {
        app.scroll_row = cursor_row + 1 - visible_rows;
    }

    let mut hits = Vec::new();
    {
        let app = &*app;
        let displayed = app.displayed();
        if displayed.is_empty() {
            render_empty(frame, app, area);
        }

        let gaps = GAP * (columns as u16 - 1);
        let card_w = area.width.saturating_sub(gaps) / columns as u16;
        let re = app.search_re();
        let show_cursor = matches!(app.mode, Mode::Navigate | Mode::Move | Mode::Edit);

        let first = app.scroll_row * columns;
        let last = (first + visible_rows * columns).min(displayed.len());
        for (i, project) in displayed.iter().enumerate().take(last).skip(first) {
            let slot = i - first;
            let col = (slot % columns) as u16;
            let row = (slot / columns) as u16;
            let card = Rect::new(
                area.x + col * (card_w + GAP),
                area.y + row * CARD_H,
                card_w,
                CARD_H,
            )
            .intersection(area);

            let state = CardState {
                selected: show_cursor && i == app.cursor,
                dragged: app.drag.dragged_id() == Some(project.id),
                drop_target: app.drag.drop_target() == Some(project.id),
            };
            hits.push(render_card(frame, app, project, card, state, re.as_ref()));
        }
    }
    app.hits.cards = hits;
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let message = match app.projects.as_deref() {
        Some([]) => "No projects yet. Press f to add a folder or a to add a link.".to_string(),
        _ => format!("No projects match \u{201C}{}\u{201D}", app.search.text()),
    };
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1).intersection(area);
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background)),
        row,
    );
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    project: &Project,
    area: Rect,
    state: CardState,
    search_re: Option<&Regex>,
) -> CardHit {
    let theme = &app.theme;
    let bg = if state.selected {
        theme.selection_bg
    } else {
        theme.background
    };

    let (border_color, border_type) = if state.drop_target {
        (theme.drop_target, BorderType::Thick)
    } else if state.dragged {
        (theme.highlight, BorderType::Double)
    } else if state.selected {
        (theme.selection_border, BorderType::Rounded)
    } else {
        (theme.card_border, BorderType::Rounded)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    if state.dragged {
        block = block.title(Span::styled(" moving ", Style::default().fg(theme.highlight).bg(bg)));
    } else if state.drop_target {
        block = block.title(Span::styled(" swap ", Style::default().fg(theme.drop_target).bg(bg)));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let name = truncate_to_width(&project.name, width);
    let name_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let mut name_spans = Vec::new();
    push_highlighted_spans(&mut name_spans, &name, name_style, match_style, search_re);

    let location = match project.location() {
        Some(Location::Folder(path)) => path.to_string(),
        Some(Location::Link(url)) => format!("\u{2197} {}", url),
        None => String::new(),
    };

    let lines = vec![
        Line::from(name_spans),
        Line::from(Span::styled(
            truncate_to_width(&location, width),
            Style::default().fg(theme.dim).bg(bg),
        )),
        Line::from(Span::styled(
            truncate_to_width(&project.description, width),
            Style::default().fg(theme.text).bg(bg),
        )),
        tag_pills(&project.tags, width, Style::default().fg(theme.dim).bg(bg)),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);

    let name_w = display_width(&name).min(width) as u16;
    CardHit {
        project_id: project.id,
        area,
        name_area: Rect::new(inner.x, inner.y, name_w, inner.height.min(1)),
    }
}

/// Tag pills that fit in `width`, then `+N` for the rest
fn tag_pills(tags: &[Tag], width: usize, rest_style: Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;
    for (i, tag) in tags.iter().enumerate() {
        let pill = format!(" {} ", tag.name);
        let pill_w = display_width(&pill);
        let remaining = tags.len() - i - 1;
        let reserve = if remaining > 0 { 4 } else { 0 };
        if used + pill_w + reserve > width {
            spans.push(Span::styled(format!("+{}", tags.len() - i), rest_style));
            break;
        }
        spans.push(Span::styled(pill, pill_style(tag.color)));
        spans.push(Span::styled(" ", rest_style));
        used += pill_w + 1;
    }
    Line::from(spans)
}
