//! Message and key handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::controller::{apply_update, TurnUpdate};
use crate::models::ChatMode;

use super::{App, AppMessage};

/// Lines moved per PageUp/PageDown.
const PAGE_SCROLL: usize = 10;
/// Lines moved per mouse wheel notch.
const WHEEL_SCROLL: usize = 3;

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        let update = TurnUpdate::from(msg);
        apply_update(&mut self.session, &update);

        // Follow new output unless the user scrolled away
        if !self.user_has_scrolled {
            self.scroll_offset = 0;
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if self.confirm_clear {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_clear(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel_clear(),
                _ => {}
            }
            return;
        }

        self.notice = None;

        match key.code {
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_clear();
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_input(ChatMode::MultiAgent);
            }
            KeyCode::Enter => self.submit_input(ChatMode::Normal),
            KeyCode::PageUp => self.scroll_up(PAGE_SCROLL),
            KeyCode::PageDown => self.scroll_down(PAGE_SCROLL),
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_to_bottom();
            }
            // The input box is disabled while a reply streams
            _ if self.is_streaming() => {}
            KeyCode::Tab => self.cycle_sample_prompt(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                self.input.insert_char(c);
            }
            _ => {}
        }
    }

    /// Insert pasted text into the input box.
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_streaming() || self.confirm_clear {
            return;
        }
        self.input.insert_str(text);
        self.mark_dirty();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_SCROLL),
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_SCROLL),
            _ => {}
        }
    }
}
