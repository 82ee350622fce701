//! Application state for the terminal chat client.
//!
//! The event loop in `main` owns an [`App`], draws it with [`crate::ui::render`],
//! and feeds it key events and [`AppMessage`]s from the turn task. All
//! session mutation happens on the event loop.

mod handlers;
mod messages;
mod stream;

pub use messages::AppMessage;

use tokio::sync::mpsc;

use crate::client::ChatClient;
use crate::models::ChatMode;
use crate::state::Session;
use crate::ui::RegionCache;
use crate::widgets::InputBox;

/// Sample prompts offered on the welcome screen.
pub const SAMPLE_PROMPTS: [&str; 4] = [
    "Explain how HTTP chunked transfer encoding works",
    "Should our team adopt a four-day work week?",
    "What are the trade-offs of microservices versus a monolith?",
    "Summarize the pros and cons of remote work",
];

/// Main application state
pub struct App {
    /// Conversation transcript and turn state
    pub session: Session,
    /// Backend client (cloned into each turn task)
    pub client: ChatClient,
    /// Prompt editor
    pub input: InputBox,
    /// Receiver for turn updates (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for turn updates (cloned into each turn task)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Tick counter for animations (spinner, cursor blink)
    pub tick_count: u64,
    /// Dirty flag: set on state changes, cleared after each draw
    pub needs_redraw: bool,
    pub should_quit: bool,
    /// Lines scrolled up from the bottom of the transcript
    pub scroll_offset: usize,
    /// Largest valid scroll offset, computed during render
    pub max_scroll: usize,
    /// Set when the user scrolls away from the bottom; disables follow mode
    pub user_has_scrolled: bool,
    /// Wrapped region lines, keyed by message and version
    pub region_cache: RegionCache,
    /// A clear is waiting for y/n
    pub confirm_clear: bool,
    /// Next sample prompt Tab inserts
    pub sample_index: usize,
    /// One-line notice shown in the status bar until the next key press
    pub notice: Option<String>,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl App {
    pub fn new(client: ChatClient, session_id: impl Into<String>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(session_id),
            client,
            input: InputBox::new(),
            message_rx: Some(message_rx),
            message_tx,
            tick_count: 0,
            needs_redraw: true,
            should_quit: false,
            scroll_offset: 0,
            max_scroll: 0,
            user_has_scrolled: false,
            region_cache: RegionCache::new(),
            confirm_clear: false,
            sample_index: 0,
            notice: None,
            terminal_width: 80,
            terminal_height: 24,
        }
    }

    /// Advance animations. Only marks the UI dirty when something animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_streaming() {
            self.mark_dirty();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// True while a turn is in flight.
    pub fn is_streaming(&self) -> bool {
        self.session.is_busy()
    }

    /// Mode of the turn in flight, if any.
    pub fn active_mode(&self) -> Option<ChatMode> {
        self.session.active_message().map(|m| m.mode)
    }

    pub fn update_terminal_dimensions(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.mark_dirty();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
        self.user_has_scrolled = self.scroll_offset > 0;
        self.mark_dirty();
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.user_has_scrolled = self.scroll_offset > 0;
        self.mark_dirty();
    }

    /// Jump to the newest line and follow new output again.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.user_has_scrolled = false;
        self.mark_dirty();
    }

    /// Put the next sample prompt into the empty input box.
    pub fn cycle_sample_prompt(&mut self) {
        if !self.input.is_empty() && !SAMPLE_PROMPTS.contains(&self.input.content()) {
            return;
        }
        self.input.set_content(SAMPLE_PROMPTS[self.sample_index]);
        self.sample_index = (self.sample_index + 1) % SAMPLE_PROMPTS.len();
        self.mark_dirty();
    }
}
