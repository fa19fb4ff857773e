use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::host::HostRequest;
use crate::tui::app::App;
use crate::tui::text_field::TextField;

/// Map a shifted base symbol to its shifted form (US layout)
fn shift_symbol(c: char) -> Option<char> {
    match c {
        '/' => Some('?'),
        ',' => Some('<'),
        '.' => Some('>'),
        _ => None,
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol.
///
/// Kitty sends `Char(lowercase) + SHIFT` where legacy terminals send
/// `Char(UPPERCASE) + SHIFT`, and the base symbol where they send the
/// shifted one. Already-normalized events pass through unchanged.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Ctrl/Cmd accelerators for the window: close, quit, reload, minimize.
/// Returns true if the key was consumed.
pub(super) fn handle_root_shortcut(app: &mut App, key: KeyEvent) -> bool {
    if !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
    {
        return false;
    }
    let KeyCode::Char(c) = key.code else {
        return false;
    };
    let request = match c.to_ascii_lowercase() {
        'w' => HostRequest::Close,
        'q' => HostRequest::Quit,
        'm' => HostRequest::Minimize,
        'r' => {
            app.reload();
            return true;
        }
        _ => return false,
    };
    app.host.send(request);
    true
}

/// Plain character input: no Ctrl, Alt or Cmd held
pub(super) fn is_plain(key: &KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

/// Apply a line-editing key to a text field. Returns true if the text changed.
pub(super) fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (_, KeyCode::Backspace) => field.backspace(),
        (_, KeyCode::Delete) => field.delete(),
        (_, KeyCode::Left) => {
            field.move_left();
            false
        }
        (_, KeyCode::Right) => {
            field.move_right();
            false
        }
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
            field.home();
            false
        }
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            field.end();
            false
        }
        (_, KeyCode::Char(c)) if is_plain(&key) => {
            field.insert_char(c);
            true
        }
        _ => false,
    }
}
