use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

/// A folder came back from the picker: Enter adds it, Esc drops it.
pub(super) fn handle_confirm_folder(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => app.confirm_folder(),
        KeyCode::Esc | KeyCode::Char('n') => app.discard_folder(),
        _ => {}
    }
}

pub(super) fn handle_link_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_link(),
        KeyCode::Esc => {
            app.link_input.clear();
            app.mode = Mode::Navigate;
        }
        _ => {
            edit_field(&mut app.link_input, key);
        }
    }
}
