use crate::util::unicode::{
    byte_offset_to_display_col, next_grapheme_boundary, prev_grapheme_boundary,
};

/// Single-line editable text with a grapheme-aware cursor (byte offset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    /// A field holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextField { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        byte_offset_to_display_col(&self.text, self.cursor)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text; line breaks become spaces.
    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s
            .chars()
            .filter(|&c| c != '\r')
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    /// Delete the grapheme before the cursor. False if nothing was deleted.
    pub fn backspace(&mut self) -> bool {
        match prev_grapheme_boundary(&self.text, self.cursor) {
            Some(start) => {
                self.text.replace_range(start..self.cursor, "");
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    /// Delete the grapheme under the cursor. False if nothing was deleted.
    pub fn delete(&mut self) -> bool {
        match next_grapheme_boundary(&self.text, self.cursor) {
            Some(end) => {
                self.text.replace_range(self.cursor..end, "");
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) {
        if let Some(pos) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = pos;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(pos) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = pos;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_deleting() {
        let mut field = TextField::default();
        for c in "webdev".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.text(), "webdev");
        assert!(field.backspace());
        assert!(field.backspace());
        assert_eq!(field.text(), "webd");
        field.home();
        assert!(!field.backspace());
        assert!(field.delete());
        assert_eq!(field.text(), "ebd");
        assert_eq!(field.cursor_col(), 0);
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut field = TextField::new("cafe\u{301}!");
        field.move_left();
        field.move_left();
        assert_eq!(field.cursor_col(), 3);
        field.insert_char('x');
        assert_eq!(field.text(), "cafxe\u{301}!");
        field.end();
        field.move_right();
        assert_eq!(field.cursor_col(), 6);
    }

    #[test]
    fn paste_flattens_lines() {
        let mut field = TextField::new("a");
        field.insert_str("b\r\nc");
        assert_eq!(field.text(), "ab c");
        field.clear();
        assert!(field.is_empty());
    }
}
