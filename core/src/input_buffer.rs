//! Text buffer with cursor tracking for keyboard input.
//!
//! The input buffer stores the text of the focused field (e.g., "안녕") and
//! tracks the cursor position within it. Composers never touch the buffer
//! directly; they splice it through the [`TextBuffer`] trait, which only
//! exposes the character immediately before the insertion point.

/// Minimal splice interface a composer needs from the text it edits.
///
/// All operations act on the "last" character, i.e. the character right
/// before the insertion point. For a plain `String` that is the end of the
/// string; for [`InputBuffer`] it is the character before the cursor.
pub trait TextBuffer {
    /// Append a character at the insertion point.
    fn push_char(&mut self, ch: char);

    /// Remove and return the character before the insertion point.
    fn pop_char(&mut self) -> Option<char>;

    /// Character before the insertion point, if any.
    fn last_char(&self) -> Option<char>;

    /// Replace the character before the insertion point.
    ///
    /// Appends instead when the buffer has nothing to replace.
    fn replace_last(&mut self, ch: char) {
        self.pop_char();
        self.push_char(ch);
    }
}

impl TextBuffer for String {
    fn push_char(&mut self, ch: char) {
        self.push(ch);
    }

    fn pop_char(&mut self) -> Option<char> {
        self.pop()
    }

    fn last_char(&self) -> Option<char> {
        self.chars().next_back()
    }
}

/// Input buffer tracking field text and cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize, // Byte offset, not char offset
}

impl InputBuffer {
    /// Create a new empty input buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Create a buffer holding `text` with the cursor at the end.
    pub fn from_text<T: Into<String>>(text: T) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Get the buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the cursor position (byte offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Number of characters in the buffer.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clear the buffer and reset cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the whole text, leaving the cursor at the end.
    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Take the text out of the buffer, leaving it empty.
    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    /// Returns the deleted character.
    pub fn delete_before(&mut self) -> Option<char> {
        let prev = self.prev_boundary()?;
        let ch = self.text.remove(prev);
        self.cursor = prev;
        Some(ch)
    }

    /// Delete the character after the cursor (delete key).
    /// Returns the deleted character.
    pub fn delete_after(&mut self) -> Option<char> {
        if self.cursor >= self.text.len() {
            return None;
        }
        Some(self.text.remove(self.cursor))
    }

    /// Character immediately before the cursor.
    pub fn char_before_cursor(&self) -> Option<char> {
        self.text[..self.cursor].chars().next_back()
    }

    /// Move cursor to the left by one character.
    /// Returns true if cursor moved.
    pub fn move_left(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Move cursor to the right by one character.
    /// Returns true if cursor moved.
    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(ch) => {
                self.cursor += ch.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Move cursor to the beginning.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Set the cursor position (must be at a character boundary).
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        if pos <= self.text.len() && self.text.is_char_boundary(pos) {
            self.cursor = pos;
            true
        } else {
            false
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.char_before_cursor()
            .map(|ch| self.cursor - ch.len_utf8())
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for InputBuffer {
    fn push_char(&mut self, ch: char) {
        self.insert_char(ch);
    }

    fn pop_char(&mut self) -> Option<char> {
        self.delete_before()
    }

    fn last_char(&self) -> Option<char> {
        self.char_before_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut buf = InputBuffer::new();
        buf.insert_char('가');
        buf.insert_char('a');
        assert_eq!(buf.text(), "가a");
        assert_eq!(buf.cursor(), 4); // 3 + 1 bytes
        assert_eq!(buf.char_count(), 2);

        assert_eq!(buf.delete_before(), Some('a'));
        assert_eq!(buf.delete_before(), Some('가'));
        assert_eq!(buf.delete_before(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_cursor_movement_respects_char_boundaries() {
        let mut buf = InputBuffer::from_text("한글");
        assert_eq!(buf.cursor(), 6);

        assert!(buf.move_left());
        assert_eq!(buf.cursor(), 3);
        assert_eq!(buf.char_before_cursor(), Some('한'));

        assert!(buf.move_left());
        assert!(!buf.move_left());
        assert_eq!(buf.char_before_cursor(), None);

        assert!(buf.move_right());
        assert!(buf.move_right());
        assert!(!buf.move_right());
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = InputBuffer::from_text("한글");
        buf.move_left();
        buf.insert_str("국어 ");
        assert_eq!(buf.text(), "한국어 글");
        assert_eq!(buf.char_before_cursor(), Some(' '));
    }

    #[test]
    fn test_delete_after() {
        let mut buf = InputBuffer::from_text("ab");
        buf.move_to_start();
        assert_eq!(buf.delete_after(), Some('a'));
        assert_eq!(buf.text(), "b");
        buf.move_to_end();
        assert_eq!(buf.delete_after(), None);
    }

    #[test]
    fn test_set_cursor_rejects_mid_char() {
        let mut buf = InputBuffer::from_text("가");
        assert!(!buf.set_cursor(1));
        assert!(buf.set_cursor(0));
        assert!(!buf.set_cursor(10));
    }

    #[test]
    fn test_text_buffer_ops_follow_cursor() {
        let mut buf = InputBuffer::from_text("xy");
        buf.move_left();

        buf.push_char('ㄱ');
        assert_eq!(buf.text(), "xㄱy");
        assert_eq!(buf.last_char(), Some('ㄱ'));

        buf.replace_last('가');
        assert_eq!(buf.text(), "x가y");

        assert_eq!(buf.pop_char(), Some('가'));
        assert_eq!(buf.text(), "xy");
    }

    #[test]
    fn test_string_text_buffer() {
        let mut s = String::from("간");
        s.replace_last('가');
        s.push_char('나');
        assert_eq!(s, "가나");
        assert_eq!(s.last_char(), Some('나'));
        assert_eq!(s.pop_char(), Some('나'));
    }

    #[test]
    fn test_replace_last_on_empty_appends() {
        let mut s = String::new();
        s.replace_last('ㄱ');
        assert_eq!(s, "ㄱ");
    }

    #[test]
    fn test_take_text() {
        let mut buf = InputBuffer::from_text("안녕");
        assert_eq!(buf.take_text(), "안녕");
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }
}
