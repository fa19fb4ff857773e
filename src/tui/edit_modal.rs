use crate::model::{Color, Project, Tag};

use super::autocomplete::{EscapeOutcome, TagCombobox};
use super::text_field::TextField;
use super::theme::cycle_swatch;

/// Focusable parts of the edit modal, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalField {
    Name,
    Description,
    TagInput,
    AttachedTags,
    Save,
    Cancel,
}

const FOCUS_ORDER: [ModalField; 6] = [
    ModalField::Name,
    ModalField::Description,
    ModalField::TagInput,
    ModalField::AttachedTags,
    ModalField::Save,
    ModalField::Cancel,
];

/// What the modal wants the app to do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Stay,
    Save,
    Cancel,
}

/// Editing session for one project. Works on a copy, so nothing shows in
/// the project grid until the session is saved.
#[derive(Debug, Clone)]
pub struct EditModal {
    /// Working copy. Name and description are read from the fields.
    project: Project,
    pub name: TextField,
    pub description: TextField,
    pub tags: TagCombobox,
    pub focus: ModalField,
    /// Selected entry in the attached-tag list
    pub tag_cursor: usize,
}

impl EditModal {
    pub fn open(project: &Project, catalog: &[Tag], swatch: Color) -> Self {
        EditModal {
            name: TextField::new(project.name.clone()),
            description: TextField::new(project.description.clone()),
            tags: TagCombobox::new(catalog.to_vec(), swatch),
            project: project.clone(),
            focus: ModalField::Name,
            tag_cursor: 0,
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project.id
    }

    /// Location shown read-only
    pub fn location(&self) -> &str {
        self.project.location().map_or("", |l| l.as_str())
    }

    pub fn attached(&self) -> &[Tag] {
        &self.project.tags
    }

    /// The project as it would be saved right now
    pub fn working_copy(&self) -> Project {
        Project {
            name: self.name.text().to_string(),
            description: self.description.text().to_string(),
            ..self.project.clone()
        }
    }

    /// Catalog including tags created in this session
    pub fn session_catalog(&self) -> &[Tag] {
        self.tags.catalog()
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(FOCUS_ORDER.len() - 1);
    }

    fn step_focus(&mut self, step: usize) {
        let pos = FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.set_focus(FOCUS_ORDER[(pos + step) % FOCUS_ORDER.len()]);
    }

    /// Move focus. Leaving the tag input closes its dropdown.
    pub fn set_focus(&mut self, field: ModalField) {
        if self.focus == ModalField::TagInput && field != ModalField::TagInput {
            self.tags.click_outside();
        }
        self.focus = field;
    }

    /// Escape anywhere in the modal: close the dropdown if it is open,
    /// otherwise save.
    pub fn escape(&mut self) -> ModalAction {
        match self.tags.escape() {
            EscapeOutcome::Closed => ModalAction::Stay,
            EscapeOutcome::Save => ModalAction::Save,
        }
    }

    pub fn tag_arrow_down(&mut self) {
        self.tags.arrow_down(&self.project.tags);
    }

    pub fn tag_arrow_up(&mut self) {
        self.tags.arrow_up();
    }

    /// Enter in the tag input. Returns the tag that was attached, if any.
    pub fn tag_enter(&mut self) -> Option<Tag> {
        self.tags.enter(&mut self.project.tags)
    }

    pub fn tag_type(&mut self, c: char) {
        self.tags.type_char(c, &self.project.tags);
    }

    pub fn tag_backspace(&mut self) {
        self.tags.backspace(&self.project.tags);
    }

    pub fn tag_paste(&mut self, text: &str) {
        self.tags.input.insert_str(text);
        self.tags.input_changed(&self.project.tags);
    }

    /// Mouse pick of the `index`th visible suggestion
    pub fn choose_suggestion(&mut self, index: usize) -> Option<Tag> {
        self.tags.choose(&mut self.project.tags, index)
    }

    pub fn remove_tag(&mut self, tag_id: u32) -> Option<Tag> {
        let removed = self.tags.detach(&mut self.project.tags, tag_id);
        self.tag_cursor = self
            .tag_cursor
            .min(self.project.tags.len().saturating_sub(1));
        removed
    }

    pub fn remove_focused_tag(&mut self) -> Option<Tag> {
        let id = self.project.tags.get(self.tag_cursor)?.id;
        self.remove_tag(id)
    }

    pub fn cycle_swatch(&mut self, step: isize) {
        self.tags.swatch = cycle_swatch(self.tags.swatch, step);
    }
}
