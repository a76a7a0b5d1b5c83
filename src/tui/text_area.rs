//! Multi-line text editing for the memo panel.
//!
//! Cursor positions are (line, column) in characters. Lines are split on
//! `'\n'` so a trailing newline yields a trailing empty line.

/// Editable multi-line text with a cursor and a vertical scroll offset.
#[derive(Clone, Debug, Default)]
pub struct TextArea {
    text: String,
    cursor_x: usize,
    cursor_y: usize,
    scroll_y: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `text` with the cursor placed after its last character.
    pub fn from_text(text: &str) -> Self {
        let last = text.split('\n').last().unwrap_or("");
        TextArea {
            text: text.to_string(),
            cursor_y: text.matches('\n').count(),
            cursor_x: last.chars().count(),
            scroll_y: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_y, self.cursor_x)
    }

    fn line_len(&self, y: usize) -> usize {
        self.lines().get(y).map_or(0, |l| l.chars().count())
    }

    /// Byte offset of the cursor within the text.
    fn cursor_offset(&self) -> usize {
        let mut offset = 0;
        for (i, line) in self.text.split('\n').enumerate() {
            if i == self.cursor_y {
                return offset
                    + line
                        .char_indices()
                        .nth(self.cursor_x)
                        .map(|(b, _)| b)
                        .unwrap_or(line.len());
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let at = self.cursor_offset();
        self.text.insert(at, c);
        self.cursor_x += 1;
    }

    pub fn insert_newline(&mut self) {
        let at = self.cursor_offset();
        self.text.insert(at, '\n');
        self.cursor_y += 1;
        self.cursor_x = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_x == 0 && self.cursor_y == 0 {
            return;
        }
        let at = self.cursor_offset();
        let prev = self.text[..at].chars().next_back().map_or(0, |c| c.len_utf8());
        if self.cursor_x > 0 {
            self.cursor_x -= 1;
        } else {
            self.cursor_y -= 1;
            self.cursor_x = self.line_len(self.cursor_y);
        }
        self.text.remove(at - prev);
    }

    pub fn delete(&mut self) {
        let at = self.cursor_offset();
        if at < self.text.len() {
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_x > 0 {
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = self.line_len(self.cursor_y);
        }
    }

    pub fn move_right(&mut self) {
        let line_count = self.lines().len();
        if self.cursor_x < self.line_len(self.cursor_y) {
            self.cursor_x += 1;
        } else if self.cursor_y + 1 < line_count {
            self.cursor_y += 1;
            self.cursor_x = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = self.cursor_x.min(self.line_len(self.cursor_y));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_y + 1 < self.lines().len() {
            self.cursor_y += 1;
            self.cursor_x = self.cursor_x.min(self.line_len(self.cursor_y));
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_x = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_x = self.line_len(self.cursor_y);
    }

    /// Adjust the scroll offset so the cursor line is inside a viewport of
    /// `height` lines, and return the offset.
    pub fn scroll_to_cursor(&mut self, height: usize) -> usize {
        if height == 0 {
            return self.scroll_y;
        }
        if self.cursor_y >= self.scroll_y + height {
            self.scroll_y = self.cursor_y + 1 - height;
        } else if self.cursor_y < self.scroll_y {
            self.scroll_y = self.cursor_y;
        }
        self.scroll_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_newlines_build_text() {
        let mut area = TextArea::new();
        for c in "ab".chars() {
            area.insert_char(c);
        }
        area.insert_newline();
        area.insert_char('c');
        assert_eq!(area.text(), "ab\nc");
        assert_eq!(area.cursor(), (1, 1));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut area = TextArea::from_text("ab\ncd");
        area.move_home();
        area.backspace();
        assert_eq!(area.text(), "abcd");
        assert_eq!(area.cursor(), (0, 2));
    }

    #[test]
    fn from_text_places_cursor_at_end() {
        let area = TextArea::from_text("one\ntwo\n");
        assert_eq!(area.cursor(), (2, 0));
        let area = TextArea::from_text("");
        assert_eq!(area.cursor(), (0, 0));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut area = TextArea::from_text("long line\nab");
        area.move_up();
        area.move_end();
        assert_eq!(area.cursor(), (0, 9));
        area.move_down();
        assert_eq!(area.cursor(), (1, 2));
    }

    #[test]
    fn multibyte_edits() {
        let mut area = TextArea::from_text("비타민");
        area.move_left();
        area.delete();
        assert_eq!(area.text(), "비타");
        area.backspace();
        assert_eq!(area.text(), "비");
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut area = TextArea::from_text("1\n2\n3\n4\n5");
        assert_eq!(area.scroll_to_cursor(2), 3);
        for _ in 0..4 {
            area.move_up();
        }
        assert_eq!(area.scroll_to_cursor(2), 0);
    }
}
