use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let columns = app.columns.max(1) as isize;
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => hover(app, -1),
        KeyCode::Right | KeyCode::Char('l') => hover(app, 1),
        KeyCode::Up | KeyCode::Char('k') => hover(app, -columns),
        KeyCode::Down | KeyCode::Char('j') => hover(app, columns),
        KeyCode::Enter | KeyCode::Char('m') => {
            match app.drag.drop_target() {
                Some(target) => app.drop_on(target),
                None => app.drag.end(),
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            let dragged = app.drag.dragged_id();
            app.drag.end();
            if let Some(id) = dragged {
                app.focus_project(id);
            }
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

/// Move the cursor and make the card under it the drop target.
fn hover(app: &mut App, delta: isize) {
    app.move_cursor(delta);
    app.drag.drag_leave();
    if let Some(id) = app.selected_id() {
        app.drag.drag_over(id);
    }
}
