//! Welcome view shown while the transcript is empty.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER};
use crate::app::SAMPLE_PROMPTS;

pub(super) fn welcome_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Welcome to roundtable",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Ask one assistant, or put three agents around the table.",
            Style::default().fg(COLOR_DIM),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Try one of these (Tab to fill):",
            Style::default().fg(COLOR_ACCENT),
        )),
    ];
    lines.extend(
        SAMPLE_PROMPTS
            .iter()
            .map(|p| Line::from(format!("• {}", p))),
    );
    lines
}

pub(super) fn render_welcome(frame: &mut Frame, area: Rect) {
    let welcome = Paragraph::new(welcome_lines())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(welcome, area);
}
