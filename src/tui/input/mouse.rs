use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tui::app::{App, Mode, PendingPress};
use crate::tui::edit_modal::{ModalAction, ModalField};

use super::edit::finish_edit;

/// Handle a mouse event: card drags and clicks, and clicks in the edit modal
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match app.mode {
        Mode::Edit => handle_modal_mouse(app, mouse),
        Mode::Navigate | Mode::Search => handle_grid_mouse(app, mouse),
        _ => {}
    }
}

fn card_under(app: &App, mouse: &MouseEvent) -> Option<i64> {
    app.hits
        .card_at(mouse.column, mouse.row)
        .map(|c| c.project_id)
}

fn handle_grid_mouse(app: &mut App, mouse: MouseEvent) {
    let columns = app.columns.max(1) as isize;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let pos = Position::new(mouse.column, mouse.row);
            app.press = app.hits.card_at(mouse.column, mouse.row).map(|c| PendingPress {
                project_id: c.project_id,
                on_name: c.name_area.contains(pos),
            });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !app.drag.is_dragging() {
                match app.press {
                    Some(press) => app.drag.start(press.project_id),
                    None => return,
                }
            }
            app.drag.drag_leave();
            if let Some(id) = card_under(app, &mouse) {
                app.drag.drag_over(id);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let press = app.press.take();
            let over = card_under(app, &mouse);
            if app.drag.is_dragging() {
                match over {
                    Some(target) => app.drop_on(target),
                    None => app.drag.end(),
                }
            } else if let Some(press) = press
                && over == Some(press.project_id)
            {
                app.focus_project(press.project_id);
                if press.on_name {
                    app.open_project(press.project_id);
                } else {
                    app.open_edit(press.project_id);
                }
            }
        }
        MouseEventKind::ScrollDown => app.move_cursor(columns),
        MouseEventKind::ScrollUp => app.move_cursor(-columns),
        _ => {}
    }
}

fn handle_modal_mouse(app: &mut App, mouse: MouseEvent) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let Some(hit) = app.hits.modal.clone() else {
        return;
    };
    let Some(modal) = app.modal.as_mut() else {
        return;
    };
    let pos = Position::new(mouse.column, mouse.row);

    if let Some(index) = hit.suggestions.iter().position(|r| r.contains(pos)) {
        modal.choose_suggestion(index);
        return;
    }
    if hit.combobox.contains(pos) {
        modal.set_focus(ModalField::TagInput);
        return;
    }

    modal.tags.click_outside();
    let action = if hit.save.contains(pos) {
        ModalAction::Save
    } else if hit.cancel.contains(pos) {
        ModalAction::Cancel
    } else {
        if let Some((tag_id, _)) = hit.attached.iter().find(|(_, r)| r.contains(pos)) {
            modal.remove_tag(*tag_id);
        } else if hit.name.contains(pos) {
            modal.set_focus(ModalField::Name);
        } else if hit.description.contains(pos) {
            modal.set_focus(ModalField::Description);
        }
        ModalAction::Stay
    };
    finish_edit(app, action);
}
