//! Status line and keybind footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::spinner_frame;
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_NOTICE};
use crate::app::App;
use crate::models::ChatMode;

pub const THINKING: &str = "Thinking...";
pub const MULTI_AGENT_THINKING: &str = "Multi-agent analysis in progress...";
pub const CONFIRM_CLEAR: &str = "Clear the conversation? (y/n)";

/// Status text for the current app state, most urgent first.
pub(super) fn status_line(app: &App) -> Line<'static> {
    if app.confirm_clear {
        return Line::from(Span::styled(
            CONFIRM_CLEAR,
            Style::default()
                .fg(COLOR_NOTICE)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(mode) = app.active_mode() {
        let label = match mode {
            ChatMode::Normal => THINKING,
            ChatMode::MultiAgent => MULTI_AGENT_THINKING,
        };
        return Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(app.tick_count)),
                Style::default().fg(COLOR_ACCENT),
            ),
            Span::styled(label, Style::default().fg(COLOR_ACCENT)),
        ]);
    }
    if let Some(notice) = &app.notice {
        return Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(COLOR_NOTICE),
        ));
    }
    Line::default()
}

pub(super) fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Paragraph::new(status_line(app)), area);
}

fn keybind(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(COLOR_ACCENT)),
        Span::styled(format!(" {}  ", label), Style::default().fg(COLOR_DIM)),
    ]
}

pub(super) fn render_footer(frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = [
        ("Enter", "send"),
        ("Ctrl+T", "multi-agent"),
        ("Ctrl+L", "clear"),
        ("PgUp/PgDn", "scroll"),
        ("Ctrl+C", "quit"),
    ]
    .into_iter()
    .flat_map(|(key, label)| keybind(key, label))
    .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
