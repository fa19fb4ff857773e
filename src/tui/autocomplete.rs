use crate::model::{Color, Tag};
use crate::ops::tag_ops::{smallest_free_id, unused_tags};

use super::text_field::TextField;

/// What Escape did inside the tag combobox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// The dropdown was open and is now closed
    Closed,
    /// The dropdown was already closed; the editing session should be saved
    Save,
}

/// Tag combobox: an input line plus a filtered, keyboard-navigable list of
/// catalog tags not yet attached to the project being edited.
///
/// The combobox keeps its own copy of the catalog for the editing session.
/// Tags created here are appended to that copy (as a fresh `Vec`) and get
/// the smallest positive id nothing in the session catalog uses.
#[derive(Debug, Clone)]
pub struct TagCombobox {
    pub input: TextField,
    open: bool,
    highlighted: Option<usize>,
    /// Color given to tags created from typed text
    pub swatch: Color,
    catalog: Vec<Tag>,
    /// Ids of tags created in this session, in creation order
    created: Vec<u32>,
    next_free_id: u32,
}

impl TagCombobox {
    pub fn new(catalog: Vec<Tag>, swatch: Color) -> Self {
        let next_free_id = smallest_free_id(&catalog);
        TagCombobox {
            input: TextField::default(),
            open: false,
            highlighted: None,
            swatch,
            catalog,
            created: Vec::new(),
            next_free_id,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The session catalog, including tags created in this session
    pub fn catalog(&self) -> &[Tag] {
        &self.catalog
    }

    /// Id the next created tag will get
    pub fn next_free_id(&self) -> u32 {
        self.next_free_id
    }

    /// Was this tag created during the current session?
    pub fn is_created(&self, tag_id: u32) -> bool {
        self.created.contains(&tag_id)
    }

    /// Unused catalog tags whose name contains the input (case-insensitive).
    /// An empty input matches every unused tag.
    pub fn suggestions(&self, attached: &[Tag]) -> Vec<&Tag> {
        let needle = self.input.text().to_lowercase();
        unused_tags(&self.catalog, attached)
            .into_iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Suggestions that are actually on screen: none while closed.
    pub fn visible_suggestions(&self, attached: &[Tag]) -> Vec<&Tag> {
        if self.open {
            self.suggestions(attached)
        } else {
            Vec::new()
        }
    }

    /// Open if closed; otherwise move the highlight down, stopping at the
    /// last suggestion.
    pub fn arrow_down(&mut self, attached: &[Tag]) {
        if !self.open {
            self.open = true;
            return;
        }
        let count = self.suggestions(attached).len();
        if count == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(count - 1),
        });
    }

    /// Move the highlight up. Moving up from the first suggestion clears it.
    pub fn arrow_up(&mut self) {
        self.highlighted = match self.highlighted {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Attach the highlighted suggestion, or create a tag from the typed
    /// text. Returns the attached tag, or None if Enter had nothing to do.
    pub fn enter(&mut self, attached: &mut Vec<Tag>) -> Option<Tag> {
        let picked = self
            .highlighted
            .filter(|_| self.open)
            .and_then(|i| self.suggestions(attached).get(i).map(|t| (*t).clone()));
        if let Some(tag) = picked {
            self.attach(attached, tag.clone());
            return Some(tag);
        }

        let name = self.input.text().trim().to_string();
        if name.is_empty() {
            return None;
        }
        let tag = Tag::new(self.next_free_id, name, self.swatch);
        self.catalog = self
            .catalog
            .iter()
            .cloned()
            .chain(std::iter::once(tag.clone()))
            .collect();
        self.created.push(tag.id);
        self.attach(attached, tag.clone());
        Some(tag)
    }

    /// Attach the `index`th visible suggestion (mouse pick).
    pub fn choose(&mut self, attached: &mut Vec<Tag>, index: usize) -> Option<Tag> {
        let tag = self
            .visible_suggestions(attached)
            .get(index)
            .map(|t| (*t).clone())?;
        self.attach(attached, tag.clone());
        Some(tag)
    }

    /// Remove a tag from the project. A tag created in this session that is
    /// detached again leaves the session catalog, so its id is free for
    /// the next creation.
    pub fn detach(&mut self, attached: &mut Vec<Tag>, tag_id: u32) -> Option<Tag> {
        let pos = attached.iter().position(|t| t.id == tag_id)?;
        let removed = attached.remove(pos);
        if self.is_created(tag_id) {
            self.created.retain(|&id| id != tag_id);
            self.catalog = self
                .catalog
                .iter()
                .filter(|t| t.id != tag_id)
                .cloned()
                .collect();
        }
        self.next_free_id = smallest_free_id(&self.catalog);
        self.highlighted = None;
        Some(removed)
    }

    /// Escape closes an open dropdown. With the dropdown already closed it
    /// asks for the whole edit to be saved.
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.open {
            self.close();
            EscapeOutcome::Closed
        } else {
            EscapeOutcome::Save
        }
    }

    /// Call after every change to the input text.
    pub fn input_changed(&mut self, attached: &[Tag]) {
        self.open = !unused_tags(&self.catalog, attached).is_empty();
        self.highlighted = None;
    }

    pub fn type_char(&mut self, c: char, attached: &[Tag]) {
        self.input.insert_char(c);
        self.input_changed(attached);
    }

    pub fn backspace(&mut self, attached: &[Tag]) {
        if self.input.backspace() {
            self.input_changed(attached);
        }
    }

    /// A click landed outside the combobox.
    pub fn click_outside(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    fn attach(&mut self, attached: &mut Vec<Tag>, tag: Tag) {
        if !attached.iter().any(|t| t.id == tag.id) {
            attached.push(tag);
        }
        self.input.clear();
        self.close();
        self.next_free_id = smallest_free_id(&self.catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(id: u32, name: &str) -> Tag {
        Tag::new(id, name, Color::default())
    }

    fn catalog() -> Vec<Tag> {
        vec![tag(1, "rust"), tag(2, "web"), tag(3, "webdev"), tag(4, "cli")]
    }

    fn names(tags: &[&Tag]) -> Vec<String> {
        tags.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn suggestions_exclude_attached_and_filter_by_input() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        let attached = vec![tag(2, "web")];
        assert_eq!(
            names(&combo.suggestions(&attached)),
            vec!["rust", "webdev", "cli"]
        );
        combo.type_char('W', &attached);
        combo.type_char('e', &attached);
        assert_eq!(names(&combo.suggestions(&attached)), vec!["webdev"]);
    }

    #[test]
    fn arrow_down_opens_then_advances_and_clamps() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        let attached = vec![tag(1, "rust"), tag(4, "cli")];
        combo.arrow_down(&attached);
        assert!(combo.is_open());
        assert_eq!(combo.highlighted(), None);
        combo.arrow_down(&attached);
        assert_eq!(combo.highlighted(), Some(0));
        combo.arrow_down(&attached);
        combo.arrow_down(&attached);
        combo.arrow_down(&attached);
        assert_eq!(combo.highlighted(), Some(1));
    }

    #[test]
    fn arrow_up_stops_at_none() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        combo.arrow_down(&[]);
        combo.arrow_down(&[]);
        combo.arrow_down(&[]);
        assert_eq!(combo.highlighted(), Some(1));
        combo.arrow_up();
        combo.arrow_up();
        assert_eq!(combo.highlighted(), None);
        combo.arrow_up();
        assert_eq!(combo.highlighted(), None);
    }

    #[test]
    fn arrow_down_with_nothing_to_suggest() {
        let mut combo = TagCombobox::new(vec![], Color::default());
        combo.arrow_down(&[]);
        assert!(combo.is_open());
        combo.arrow_down(&[]);
        assert_eq!(combo.highlighted(), None);
        assert!(combo.visible_suggestions(&[]).is_empty());
        combo.click_outside();
        assert!(!combo.is_open());
        assert_eq!(combo.highlighted(), None);
    }

    #[test]
    fn enter_attaches_highlighted_suggestion() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        let mut attached = vec![tag(1, "rust")];
        combo.arrow_down(&attached);
        combo.arrow_down(&attached);
        combo.arrow_down(&attached);
        assert_eq!(combo.enter(&mut attached), Some(tag(3, "webdev")));
        assert_eq!(attached, vec![tag(1, "rust"), tag(3, "webdev")]);
        assert!(!combo.is_open());
        assert_eq!(combo.highlighted(), None);
        assert!(combo.input.is_empty());
        // Catalog is untouched by attaching an existing tag
        assert_eq!(combo.catalog().len(), 4);
    }

    #[test]
    fn enter_creates_tag_in_first_gap() {
        let swatch = Color::new(0xFF, 0x44, 0x44);
        let mut combo = TagCombobox::new(
            vec![tag(1, "rust"), tag(3, "web"), tag(4, "cli")],
            swatch,
        );
        assert_eq!(combo.next_free_id(), 2);
        let mut attached = Vec::new();
        for c in "  infra ".chars() {
            combo.type_char(c, &attached);
        }
        // Typing resets the highlight, so Enter creates
        let created = combo.enter(&mut attached).unwrap();
        assert_eq!(created, Tag::new(2, "infra", swatch));
        assert_eq!(attached, vec![created.clone()]);
        assert!(combo.catalog().contains(&created));
        assert_eq!(combo.next_free_id(), 5);
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        let mut attached = Vec::new();
        combo.type_char(' ', &attached);
        assert_eq!(combo.enter(&mut attached), None);
        assert!(attached.is_empty());
        assert_eq!(combo.catalog().len(), 4);
    }

    #[test]
    fn consecutive_creations_never_collide() {
        let mut combo = TagCombobox::new(vec![tag(2, "web")], Color::default());
        let mut attached = Vec::new();
        for name in ["a", "b", "c"] {
            combo.type_char(name.chars().next().unwrap(), &attached);
            combo.enter(&mut attached);
        }
        let ids: Vec<u32> = attached.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn detaching_a_created_tag_frees_its_id() {
        let mut combo = TagCombobox::new(vec![tag(1, "rust")], Color::default());
        let mut attached = Vec::new();
        combo.type_char('x', &attached);
        combo.enter(&mut attached);
        combo.type_char('y', &attached);
        combo.enter(&mut attached);
        assert_eq!(combo.next_free_id(), 4);

        combo.detach(&mut attached, 2);
        assert_eq!(combo.next_free_id(), 2);
        assert!(!combo.catalog().iter().any(|t| t.id == 2));

        combo.type_char('z', &attached);
        let reused = combo.enter(&mut attached).unwrap();
        assert_eq!(reused.id, 2);
        assert_eq!(reused.name, "z");
    }

    #[test]
    fn detaching_a_catalog_tag_keeps_it_in_the_catalog() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        let mut attached = vec![tag(2, "web")];
        assert_eq!(combo.detach(&mut attached, 2), Some(tag(2, "web")));
        assert!(attached.is_empty());
        assert_eq!(combo.next_free_id(), 5);
        assert_eq!(combo.detach(&mut attached, 2), None);
    }

    #[test]
    fn escape_closes_then_saves() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        combo.arrow_down(&[]);
        combo.arrow_down(&[]);
        assert_eq!(combo.escape(), EscapeOutcome::Closed);
        assert_eq!(combo.highlighted(), None);
        assert_eq!(combo.escape(), EscapeOutcome::Save);
    }

    #[test]
    fn input_opens_only_when_something_is_unused() {
        let mut combo = TagCombobox::new(vec![tag(1, "rust")], Color::default());
        combo.type_char('r', &[tag(1, "rust")]);
        assert!(!combo.is_open());
        combo.type_char('u', &[]);
        assert!(combo.is_open());
        combo.arrow_down(&[]);
        assert_eq!(combo.highlighted(), Some(0));
        combo.backspace(&[]);
        assert_eq!(combo.highlighted(), None);
    }

    #[test]
    fn mouse_choose_attaches_visible_suggestion() {
        let mut combo = TagCombobox::new(catalog(), Color::default());
        let mut attached = Vec::new();
        assert_eq!(combo.choose(&mut attached, 0), None);
        combo.arrow_down(&attached);
        assert_eq!(combo.choose(&mut attached, 1), Some(tag(2, "web")));
        assert_eq!(attached, vec![tag(2, "web")]);
    }
}
