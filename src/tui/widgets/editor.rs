use ratatui::layout::Rect;
use std::cmp;

/// Multi-line text editing state for form fields. Rendering is done by the
/// form widget; this only tracks content, cursor and scroll.
#[derive(Debug, Clone)]
pub struct Editor {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub scroll_offset: usize, // Vertical scroll (line offset)
    pub scroll_col: usize,    // Horizontal scroll (column offset)
}

impl Editor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            scroll_offset: 0,
            scroll_col: 0,
        }
    }

    pub fn from_string(content: &str) -> Self {
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(|s| s.to_string()).collect()
        };
        let cursor_line = lines.len().saturating_sub(1);
        // chars().count() for UTF-8 safe character count, not byte count
        let cursor_col = lines.last().map(|l| l.chars().count()).unwrap_or(0);
        Self {
            lines,
            cursor_line,
            cursor_col,
            scroll_offset: 0,
            scroll_col: 0,
        }
    }

    /// Ensure cursor_line is within valid bounds
    fn ensure_cursor_valid(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        if self.cursor_line >= self.lines.len() {
            self.cursor_line = self.lines.len().saturating_sub(1);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.ensure_cursor_valid();
        let line = &mut self.lines[self.cursor_line];
        let col = cmp::min(self.cursor_col, line.chars().count());
        let mut chars: Vec<char> = line.chars().collect();
        chars.insert(col, ch);
        *line = chars.into_iter().collect();
        self.cursor_col = col + 1;
    }

    /// Insert a string at the cursor (used for Tab-as-spaces in the code field).
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    /// Delete the character before the cursor, merging lines at column zero.
    pub fn delete_char(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let col = cmp::min(self.cursor_col, line.chars().count());
            if col > 0 {
                let mut chars: Vec<char> = line.chars().collect();
                chars.remove(col - 1);
                *line = chars.into_iter().collect();
                self.cursor_col = col - 1;
            }
        } else if self.cursor_line > 0 {
            let current_line = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            let prev_line = &mut self.lines[self.cursor_line];
            self.cursor_col = prev_line.chars().count();
            prev_line.push_str(&current_line);
        }
    }

    pub fn insert_newline(&mut self) {
        self.ensure_cursor_valid();
        let line = &mut self.lines[self.cursor_line];
        let col = cmp::min(self.cursor_col, line.chars().count());
        let mut chars: Vec<char> = line.chars().collect();
        let remainder: String = chars.split_off(col).into_iter().collect();
        *line = chars.into_iter().collect();
        self.lines.insert(self.cursor_line + 1, remainder);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            let line_len = self.line_len(self.cursor_line);
            self.cursor_col = cmp::min(self.cursor_col, line_len);
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_line < self.lines.len().saturating_sub(1) {
            self.cursor_line += 1;
            let line_len = self.line_len(self.cursor_line);
            self.cursor_col = cmp::min(self.cursor_col, line_len);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_line) {
            self.cursor_col += 1;
        } else if self.cursor_line < self.lines.len().saturating_sub(1) {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_line);
    }

    pub fn move_cursor_word_left(&mut self) {
        if self.cursor_col == 0 {
            // At start of line, move to end of previous line
            if self.cursor_line > 0 {
                self.cursor_line -= 1;
                self.cursor_col = self.line_len(self.cursor_line);
            }
            return;
        }

        let chars: Vec<char> = self.lines[self.cursor_line].chars().collect();
        let mut pos = cmp::min(self.cursor_col, chars.len());

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }

        self.cursor_col = pos;
    }

    pub fn move_cursor_word_right(&mut self) {
        let line_len = self.line_len(self.cursor_line);
        if self.cursor_col >= line_len {
            // At end of line, move to start of next line
            if self.cursor_line < self.lines.len().saturating_sub(1) {
                self.cursor_line += 1;
                self.cursor_col = 0;
            }
            return;
        }

        let chars: Vec<char> = self.lines[self.cursor_line].chars().collect();
        let mut pos = self.cursor_col;

        while pos < chars.len() && is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }

        self.cursor_col = pos;
    }

    fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Visible lines for a viewport, applying vertical and horizontal scroll.
    /// Returns the first visible line index and the clipped line contents.
    pub fn get_visible_lines(&self, viewport_height: usize, viewport_width: usize) -> (usize, Vec<String>) {
        let start = cmp::min(self.scroll_offset, self.lines.len());
        let end = cmp::min(start + viewport_height, self.lines.len());
        let effective_width = viewport_width.saturating_sub(2);

        let visible: Vec<String> = self.lines[start..end]
            .iter()
            .map(|line| {
                let chars: Vec<char> = line.chars().collect();
                if self.scroll_col >= chars.len() {
                    String::new() // Line is scrolled past
                } else {
                    let start_idx = self.scroll_col;
                    let end_idx = cmp::min(start_idx + effective_width, chars.len());
                    chars[start_idx..end_idx].iter().collect()
                }
            })
            .collect();

        (start, visible)
    }

    pub fn update_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        } else if self.cursor_line >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor_line.saturating_sub(viewport_height - 1);
        }
    }

    pub fn update_horizontal_scroll(&mut self, viewport_width: usize) {
        // viewport_width is the full field width; borders take 2 columns
        let effective_width = viewport_width.saturating_sub(2);
        if effective_width == 0 {
            return;
        }
        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + effective_width {
            self.scroll_col = self.cursor_col.saturating_sub(effective_width - 1);
        }
    }

    pub fn to_string(&self) -> String {
        self.lines.join("\n")
    }

    /// The first line, used by single-line fields.
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    /// Screen position of the cursor inside a bordered field area, or None
    /// when the cursor is scrolled out of view.
    pub fn get_cursor_screen_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let viewport_height = area.height.saturating_sub(2) as usize;
        if self.cursor_line < self.scroll_offset
            || self.cursor_line >= self.scroll_offset + viewport_height
        {
            return None;
        }
        let line_y = (self.cursor_line - self.scroll_offset) as u16;

        let line = self.lines.get(self.cursor_line)?;
        let col = cmp::min(self.cursor_col, line.chars().count());
        if col < self.scroll_col {
            return None;
        }
        let visible_col = col - self.scroll_col;

        let max_x = area.width.saturating_sub(2);
        if visible_col >= max_x as usize {
            return None;
        }

        let screen_x = area.x + 1 + visible_col as u16;
        let screen_y = area.y + 1 + line_y;
        if screen_x >= area.x + area.width || screen_y >= area.y + area.height {
            return None;
        }

        Some((screen_x, screen_y))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_round_trip() {
        let mut e = Editor::new();
        e.insert_str("two sum");
        assert_eq!(e.to_string(), "two sum");
        e.delete_char();
        e.delete_char();
        assert_eq!(e.to_string(), "two s");
    }

    #[test]
    fn newline_splits_and_backspace_merges() {
        let mut e = Editor::from_string("hello world");
        e.cursor_col = 5;
        e.insert_newline();
        assert_eq!(e.lines, vec!["hello", " world"]);
        assert_eq!((e.cursor_line, e.cursor_col), (1, 0));
        e.delete_char();
        assert_eq!(e.to_string(), "hello world");
    }

    #[test]
    fn word_movement_skips_words() {
        let mut e = Editor::from_string("def two_sum(nums):");
        e.move_cursor_home();
        e.move_cursor_word_right();
        assert_eq!(e.cursor_col, 4); // after "def "
        e.move_cursor_end();
        e.move_cursor_word_left();
        assert!(e.cursor_col < 18);
    }

    #[test]
    fn scroll_follows_cursor() {
        let content = (0..30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut e = Editor::from_string(&content);
        e.update_scroll(10);
        assert_eq!(e.scroll_offset, 20); // cursor on line 29, viewport 10

        e.cursor_line = 0;
        e.update_scroll(10);
        assert_eq!(e.scroll_offset, 0);
    }

    #[test]
    fn tab_inserts_four_spaces() {
        let mut e = Editor::from_string("x");
        e.insert_str("    ");
        assert_eq!(e.to_string(), "x    ");
        assert_eq!(e.cursor_col, 5);
    }
}
