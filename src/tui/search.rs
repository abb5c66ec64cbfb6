/// Search input state for the TUI.
///
/// The text itself lives in the session (it is persisted); this only tracks
/// the cursor, as a byte offset on a char boundary, and focus.
pub struct SearchInput {
    pub cursor_pos: usize,
    pub focused: bool,
}

impl SearchInput {
    pub fn new(term: &str) -> Self {
        Self {
            cursor_pos: term.len(),
            focused: true,
        }
    }

    pub fn insert(&mut self, text: &mut String, c: char) {
        self.clamp(text);
        text.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor_pos > 0 {
            let prev = prev_boundary(text, self.cursor_pos);
            text.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn delete(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor_pos < text.len() {
            text.remove(self.cursor_pos);
        }
    }

    pub fn clear(&mut self, text: &mut String) {
        text.clear();
        self.cursor_pos = 0;
    }

    pub fn left(&mut self, text: &str) {
        if self.cursor_pos > 0 {
            self.cursor_pos = prev_boundary(text, self.cursor_pos);
        }
    }

    pub fn right(&mut self, text: &str) {
        if self.cursor_pos < text.len() {
            self.cursor_pos = text[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(text.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self, text: &str) {
        self.cursor_pos = text.len();
    }

    /// Display column of the cursor
    pub fn cursor_column(&self, text: &str) -> usize {
        let end = self.cursor_pos.min(text.len());
        unicode_width::UnicodeWidthStr::width(&text[..end])
    }

    fn clamp(&mut self, text: &str) {
        if self.cursor_pos > text.len() {
            self.cursor_pos = text.len();
        }
    }
}

fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}
