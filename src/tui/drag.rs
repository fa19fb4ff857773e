use crate::model::Project;
use crate::ops::reorder::{Reorder, plan_swap};

/// Ephemeral state of a card drag. Mouse drags and keyboard "move" mode
/// both drive this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        dragged_id: i64,
        /// Card currently hovered, if any
        drop_target: Option<i64>,
    },
}

impl DragSession {
    /// Pick up a card. Restarts any drag already in progress.
    pub fn start(&mut self, project_id: i64) {
        *self = DragSession::Dragging {
            dragged_id: project_id,
            drop_target: None,
        };
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<i64> {
        match self {
            DragSession::Dragging { dragged_id, .. } => Some(*dragged_id),
            DragSession::Idle => None,
        }
    }

    pub fn drop_target(&self) -> Option<i64> {
        match self {
            DragSession::Dragging { drop_target, .. } => *drop_target,
            DragSession::Idle => None,
        }
    }

    /// Hover over a card. Hovering the dragged card itself changes nothing.
    pub fn drag_over(&mut self, target_id: i64) {
        if let DragSession::Dragging {
            dragged_id,
            drop_target,
        } = self
            && *dragged_id != target_id
        {
            *drop_target = Some(target_id);
        }
    }

    /// The pointer left the hovered card. The drag itself continues.
    pub fn drag_leave(&mut self) {
        if let DragSession::Dragging { drop_target, .. } = self {
            *drop_target = None;
        }
    }

    /// Drop onto `target_id` and end the session. Indices are read from
    /// `projects` now, not from when the drag started. None means nothing
    /// should change: a self-drop, an unknown card, or no drag at all.
    pub fn drop_on(&mut self, projects: &[Project], target_id: i64) -> Option<Reorder> {
        let dragged_id = self.dragged_id()?;
        *self = DragSession::Idle;
        plan_swap(projects, dragged_id, target_id)
    }

    /// Drop onto whatever is hovered.
    pub fn drop_on_target(&mut self, projects: &[Project]) -> Option<Reorder> {
        match self.drop_target() {
            Some(target_id) => self.drop_on(projects, target_id),
            None => {
                self.end();
                None
            }
        }
    }

    /// Cancel without dropping.
    pub fn end(&mut self) {
        *self = DragSession::Idle;
    }
}
