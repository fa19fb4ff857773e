use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::tui::edit_modal::{EditModal, ModalAction, ModalField};

use super::*;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.modal.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    let action = modal_key(modal, key);
    finish_edit(app, action);
}

/// Carry out what the modal asked for.
pub(super) fn finish_edit(app: &mut App, action: ModalAction) {
    match action {
        ModalAction::Save => app.commit_edit(),
        ModalAction::Cancel => app.cancel_edit(),
        ModalAction::Stay => {}
    }
}

fn modal_key(modal: &mut EditModal, key: KeyEvent) -> ModalAction {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => return modal.escape(),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => return ModalAction::Save,
        (_, KeyCode::Tab) => {
            modal.focus_next();
            return ModalAction::Stay;
        }
        (_, KeyCode::BackTab) => {
            modal.focus_prev();
            return ModalAction::Stay;
        }
        _ => {}
    }

    match modal.focus {
        ModalField::Name | ModalField::Description => {
            if key.code == KeyCode::Enter {
                return ModalAction::Save;
            }
            let field = if modal.focus == ModalField::Name {
                &mut modal.name
            } else {
                &mut modal.description
            };
            edit_field(field, key);
        }
        ModalField::TagInput => match key.code {
            KeyCode::Down => modal.tag_arrow_down(),
            KeyCode::Up => modal.tag_arrow_up(),
            KeyCode::Enter => {
                if let Some(tag) = modal.tag_enter() {
                    tracing::debug!(id = tag.id, name = %tag.name, "tag attached");
                }
            }
            KeyCode::Left => modal.cycle_swatch(-1),
            KeyCode::Right => modal.cycle_swatch(1),
            KeyCode::Backspace => modal.tag_backspace(),
            KeyCode::Char(c) if is_plain(&key) => modal.tag_type(c),
            _ => {}
        },
        ModalField::AttachedTags => match key.code {
            KeyCode::Left => modal.tag_cursor = modal.tag_cursor.saturating_sub(1),
            KeyCode::Right => {
                let last = modal.attached().len().saturating_sub(1);
                modal.tag_cursor = (modal.tag_cursor + 1).min(last);
            }
            KeyCode::Delete | KeyCode::Backspace => {
                modal.remove_focused_tag();
            }
            _ => {}
        },
        ModalField::Save => {
            if key.code == KeyCode::Enter {
                return ModalAction::Save;
            }
        }
        ModalField::Cancel => {
            if key.code == KeyCode::Enter {
                return ModalAction::Cancel;
            }
        }
    }
    ModalAction::Stay
}

/// Paste into the focused modal field
pub(super) fn paste_into_modal(modal: &mut EditModal, text: &str) {
    match modal.focus {
        ModalField::Name => modal.name.insert_str(text),
        ModalField::Description => modal.description.insert_str(text),
        ModalField::TagInput => modal.tag_paste(text),
        _ => {}
    }
}
