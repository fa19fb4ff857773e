use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel search: clears the term
        KeyCode::Esc => {
            app.search.clear();
            app.search_changed();
            app.mode = Mode::Navigate;
        }
        // Keep the term and go back to the grid
        KeyCode::Enter | KeyCode::Down => app.mode = Mode::Navigate,
        _ => {
            if edit_field(&mut app.search, key) {
                app.search_changed();
            }
        }
    }
}
