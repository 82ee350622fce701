use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line prompt editor.
///
/// The cursor is a character index, so editing never splits a multi-byte
/// character. Text wider than the box scrolls horizontally to keep the
/// cursor visible.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    /// Cursor position in characters
    cursor_position: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `char_index` (or the end).
    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor. Newlines are flattened to spaces.
    pub fn insert_char(&mut self, c: char) {
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        let at = self.byte_offset(self.cursor_position);
        self.content.insert(at, c);
        self.cursor_position += 1;
    }

    /// Insert pasted text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Delete the character under the cursor (Delete key)
    pub fn delete_char(&mut self) {
        if self.cursor_position < self.char_count() {
            let at = self.byte_offset(self.cursor_position);
            self.content.remove(at);
        }
    }

    /// Delete the character before the cursor (Backspace key)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_offset(self.cursor_position);
            self.content.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Replace the text and put the cursor at the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor_position = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// First character shown so the cursor fits in `width` columns.
    fn scroll_offset(&self, width: usize) -> usize {
        if width == 0 {
            return self.cursor_position;
        }
        // Reserve one column for the cursor block.
        let mut used = 1;
        let mut start = self.cursor_position;
        let chars: Vec<char> = self.content.chars().take(self.cursor_position).collect();
        for c in chars.iter().rev() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }
        start
    }

    pub fn render_with_title(
        &self,
        area: Rect,
        buf: &mut Buffer,
        title: &str,
        focused: bool,
        placeholder: Option<&str>,
    ) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title.to_string());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;

        if self.content.is_empty() {
            if let Some(placeholder) = placeholder {
                buf.set_stringn(
                    inner.x,
                    inner.y,
                    placeholder,
                    width,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                );
            }
        }

        let text_style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let offset = self.scroll_offset(width);
        let mut x = 0usize;
        let mut cursor_x = None;
        for (i, c) in self.content.chars().enumerate().skip(offset) {
            let w = c.width().unwrap_or(0);
            if x + w > width {
                break;
            }
            if i == self.cursor_position {
                cursor_x = Some((x, c));
            }
            buf.set_string(inner.x + x as u16, inner.y, c.to_string(), text_style);
            x += w;
        }
        if self.cursor_position >= self.char_count() && x < width {
            cursor_x = Some((x, ' '));
        }

        if focused {
            if let Some((cx, c)) = cursor_x {
                buf.set_string(
                    inner.x + cx as u16,
                    inner.y,
                    c.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Magenta),
                );
            }
        }
    }
}

/// A renderable wrapper for InputBox that implements the Widget trait
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    title: &'a str,
    focused: bool,
    placeholder: Option<&'a str>,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, title: &'a str, focused: bool) -> Self {
        Self {
            input_box,
            title,
            focused,
            placeholder: None,
        }
    }

    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = Some(text);
        self
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box
            .render_with_title(area, buf, self.title, self.focused, self.placeholder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_input_box() {
        let input = InputBox::new();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), 0);
        assert_eq!(input.content(), "");
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = InputBox::new();
        for c in "héllo✓".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.cursor_position(), 6);
        input.backspace();
        assert_eq!(input.content(), "héllo");
        input.move_cursor_home();
        input.move_cursor_right();
        input.delete_char();
        assert_eq!(input.content(), "hllo");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = InputBox::new();
        input.set_content("日本");
        input.move_cursor_left();
        input.insert_char('x');
        assert_eq!(input.content(), "日x本");
        assert_eq!(input.cursor_position(), 2);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputBox::new();
        input.insert_char('X');
        input.move_cursor_home();
        input.move_cursor_left();
        assert_eq!(input.cursor_position(), 0);
        input.move_cursor_end();
        input.move_cursor_right();
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.insert_str("a\nb");
        assert_eq!(input.content(), "a b");
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let mut input = InputBox::new();
        input.set_content("abcdefghij");
        assert_eq!(input.scroll_offset(4), 7);
        input.move_cursor_home();
        assert_eq!(input.scroll_offset(4), 0);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let input = InputBox::new();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        InputBoxWidget::new(&input, "Prompt", false)
            .placeholder("Type here")
            .render(area, &mut buf);
        let row: String = buf.content()[21..30]
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert_eq!(row, "Type here");
    }
}
