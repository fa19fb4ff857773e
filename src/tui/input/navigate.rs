use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::host::HostRequest;
use crate::ops::search::SortKey;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay: any of these closes it, everything else is swallowed
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
        ) {
            app.show_help = false;
        }
        return;
    }

    let columns = app.columns.max(1) as isize;
    match (key.modifiers, key.code) {
        (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => app.move_cursor(-1),
        (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => app.move_cursor(1),
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_cursor(-columns),
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_cursor(columns),
        (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => app.cursor = 0,
        (_, KeyCode::End) | (_, KeyCode::Char('G')) => {
            app.cursor = app.displayed().len().saturating_sub(1);
        }

        // Edit / open
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('e')) => {
            if let Some(id) = app.selected_id() {
                app.open_edit(id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('o')) => {
            if let Some(id) = app.selected_id() {
                app.open_project(id);
            }
        }

        // Search and sort
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,
        (_, KeyCode::Char('N')) => app.toggle_sort(SortKey::Name),
        (_, KeyCode::Char('O')) => app.toggle_sort(SortKey::Order),
        (_, KeyCode::Esc) => {
            if !app.search.is_empty() {
                app.search.clear();
                app.search_changed();
            }
        }

        // Keyboard drag
        (KeyModifiers::NONE, KeyCode::Char('m')) => {
            if let Some(id) = app.selected_id() {
                app.drag.start(id);
                app.mode = Mode::Move;
            }
        }

        // Add projects
        (KeyModifiers::NONE, KeyCode::Char('f')) => app.request_folder(),
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.link_input.clear();
            app.mode = Mode::LinkInput;
        }

        (_, KeyCode::Char('?')) => app.show_help = true,
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.host.send(HostRequest::Quit),
        _ => {}
    }
}
