mod common;
mod confirm;
mod edit;
mod mouse;
mod move_mode;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use move_mode::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let key = normalize_key(key);

    // Window shortcuts win over every mode
    if handle_root_shortcut(app, key) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Move => handle_move(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::LinkInput => handle_link_input(app, key),
        Mode::ConfirmFolder => handle_confirm_folder(app, key),
    }
}

/// Handle a bracketed paste event. Inserts into whichever text field has focus.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::Search => {
            app.search.insert_str(text);
            app.search_changed();
        }
        Mode::LinkInput => app.link_input.insert_str(text.trim()),
        Mode::Edit => {
            if let Some(modal) = &mut app.modal {
                paste_into_modal(modal, text);
            }
        }
        _ => {}
    }
}
