//! Text layout helpers shared by the transcript and panels.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spinner frames for the status line, advanced by the tick counter.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Ticks per spinner frame (about 100ms at 60fps).
const SPINNER_TICKS_PER_FRAME: u64 = 6;

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[((tick / SPINNER_TICKS_PER_FRAME) % SPINNER_FRAMES.len() as u64) as usize]
}

/// Wrap text to `width` display columns.
///
/// Breaks at spaces where possible and hard-breaks words that are wider
/// than a whole line. Explicit newlines always start a new line, and empty
/// lines are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.split('\n') {
        let raw_line = raw_line.trim_end_matches('\r');
        if raw_line.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0usize;

        for word in split_keep_spaces(raw_line) {
            let word_width = word.width();

            if current_width + word_width <= width {
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if word.trim().is_empty() {
                // A space that would overflow ends the line instead.
                out.push(std::mem::take(&mut current));
                current_width = 0;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }

        out.push(current);
    }

    out
}

/// Split into alternating runs of non-space and single spaces.
fn split_keep_spaces(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in line.char_indices() {
        if c == ' ' {
            if start < i {
                parts.push(&line[start..i]);
            }
            parts.push(&line[i..i + 1]);
            start = i + 1;
        }
    }
    if start < line.len() {
        parts.push(&line[start..]);
    }
    parts
}

/// Pad a line with spaces to exactly `width` columns.
pub fn pad_line(mut line: Line<'static>, width: usize) -> Line<'static> {
    let current = line.width();
    if current < width {
        line.spans.push(Span::raw(" ".repeat(width - current)));
    }
    line
}
