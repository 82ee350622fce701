//! UI rendering for the chat screen.
//!
//! Layout, top to bottom: header, transcript (or the welcome view while the
//! transcript is empty), status line, input box, keybind footer.

mod cache;
mod helpers;
mod messages;
mod status;
mod theme;
mod welcome;

pub use cache::RegionCache;
pub use helpers::{spinner_frame, wrap_text, SPINNER_FRAMES};
pub use messages::{
    message_height, render_message, render_transcript, render_transcript_window, TranscriptWindow,
    CURSOR_GLYPH, SIDE_BY_SIDE_MIN_WIDTH,
};
pub use status::{CONFIRM_CLEAR, MULTI_AGENT_THINKING, THINKING};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::widgets::InputBoxWidget;
use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

const INPUT_PLACEHOLDER: &str = "Ask anything... (Tab for an example)";
const INPUT_BUSY_PLACEHOLDER: &str = "Waiting for the reply...";

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Transcript
            Constraint::Length(1), // Status
            Constraint::Length(3), // Input
            Constraint::Length(1), // Keybinds
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    if app.session.messages().is_empty() {
        welcome::render_welcome(frame, chunks[1]);
        app.max_scroll = 0;
    } else {
        render_transcript_area(frame, chunks[1], app);
    }
    status::render_status(frame, chunks[2], app);
    render_input(frame, chunks[3], app);
    status::render_footer(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Line::from(vec![
        Span::styled(
            " roundtable ",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}  session {}", app.client.base_url(), app.session.session_id()),
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Draw the transcript scrolled `app.scroll_offset` lines up from the bottom.
fn render_transcript_area(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = usize::from(inner.height);
    let window = render_transcript_window(
        app.session.messages().iter(),
        inner.width,
        app.tick_count,
        &mut app.region_cache,
        height,
        app.scroll_offset,
    );

    app.max_scroll = window.max_offset(height);
    app.scroll_offset = window.offset;
    frame.render_widget(Paragraph::new(window.lines), inner);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let busy = app.is_streaming();
    let (title, placeholder) = if busy {
        (" Input (busy) ", INPUT_BUSY_PLACEHOLDER)
    } else {
        (" Input ", INPUT_PLACEHOLDER)
    };
    let focused = !busy && !app.confirm_clear;
    let widget = InputBoxWidget::new(&app.input, title, focused).placeholder(placeholder);
    frame.render_widget(widget, area);

    if app.user_has_scrolled && area.width > 20 {
        let hint = " ↓ newer (Ctrl+End) ";
        let x = area.x + area.width.saturating_sub(hint.chars().count() as u16 + 2);
        frame.buffer_mut().set_string(x, area.y, hint, Style::default().fg(COLOR_ACCENT));
    }
}
