//! Transcript rendering.
//!
//! Each message is a header plus one or more regions. Region bodies come
//! from the [`RegionCache`]; the streaming cursor is added afterwards so it
//! never lands in the cache.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::cache::RegionCache;
use super::helpers::{pad_line, wrap_text};
use super::theme::{
    COLOR_ASSISTANT, COLOR_CRITICAL, COLOR_CURSOR, COLOR_DIM, COLOR_ERROR, COLOR_POSITIVE,
    COLOR_SYNTHESIS, COLOR_USER,
};
use crate::models::{ChatMode, Message, MessageRole, Region};

/// Streaming cursor glyph.
pub const CURSOR_GLYPH: &str = "▊";

/// Minimum width for critical and positive panels to sit side by side.
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 80;

const PANEL_GAP: &str = " │ ";

/// Cursor blink period in ticks (about 500ms on, 500ms off at 60fps).
const CURSOR_BLINK_TICKS: u64 = 30;

fn cursor_visible(tick: u64) -> bool {
    (tick / CURSOR_BLINK_TICKS) % 2 == 0
}

fn region_style(region: Region, role: MessageRole) -> Style {
    match (region, role) {
        (Region::Content, MessageRole::User) => Style::default().fg(COLOR_USER),
        _ => Style::default(),
    }
}

/// Wrap a region's text into styled lines. Error markers are shown in red.
fn wrap_region(text: &str, width: u16, style: Style) -> Vec<Line<'static>> {
    if text.is_empty() {
        return Vec::new();
    }
    wrap_text(text, width as usize)
        .into_iter()
        .map(|line| {
            let style = if line.starts_with("❌ Error:") {
                Style::default().fg(COLOR_ERROR)
            } else {
                style
            };
            Line::from(Span::styled(line, style))
        })
        .collect()
}

fn cached_region<'c>(
    index: usize,
    message: &Message,
    region: Region,
    width: u16,
    cache: &'c mut RegionCache,
) -> &'c [Line<'static>] {
    let version = message.region_version(region);
    let style = region_style(region, message.role);
    cache.lines(index, region, version, width, || {
        wrap_region(message.region_text(region), width, style)
    })
}

/// Row count of [`region_lines`] without copying the cached lines.
fn region_height(
    index: usize,
    message: &Message,
    region: Region,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> usize {
    let streaming = message.region_streaming(region) && cursor_visible(tick);
    let lines = cached_region(index, message, region, width, cache);
    let cursor_row = streaming
        && lines
            .last()
            .map_or(true, |last| last.width() >= width as usize);
    lines.len() + usize::from(cursor_row)
}

/// Lines of one region, with the streaming cursor if it is still streaming.
fn region_lines(
    index: usize,
    message: &Message,
    region: Region,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> Vec<Line<'static>> {
    let mut lines = cached_region(index, message, region, width, cache).to_vec();

    if message.region_streaming(region) && cursor_visible(tick) {
        let cursor = Span::styled(CURSOR_GLYPH, Style::default().fg(COLOR_CURSOR));
        match lines.last_mut() {
            Some(last) if last.width() < width as usize => last.spans.push(cursor),
            _ => lines.push(Line::from(cursor)),
        }
    }
    lines
}

fn header_line(message: &Message) -> Line<'static> {
    let (who, color) = match (message.role, message.mode) {
        (MessageRole::User, _) => ("You", COLOR_USER),
        (MessageRole::Assistant, ChatMode::Normal) => ("Assistant", COLOR_ASSISTANT),
        (MessageRole::Assistant, ChatMode::MultiAgent) => ("Multi-agent", COLOR_ASSISTANT),
    };
    Line::from(vec![
        Span::styled(
            who.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", message.created_at.format("%H:%M")),
            Style::default().fg(COLOR_DIM),
        ),
    ])
}

fn panel_title(region: Region) -> Line<'static> {
    let (label, color) = match region {
        Region::Critical => ("🔍 Critical Analyst", COLOR_CRITICAL),
        Region::Positive => ("✨ Positive Advocate", COLOR_POSITIVE),
        Region::Synthesis => ("🎯 Synthesis", COLOR_SYNTHESIS),
        Region::Content => ("", COLOR_DIM),
    };
    Line::from(Span::styled(
        label.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Title plus body of one agent panel.
fn panel(
    index: usize,
    message: &Message,
    region: Region,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> Vec<Line<'static>> {
    let mut lines = vec![panel_title(region)];
    lines.extend(region_lines(index, message, region, width, tick, cache));
    lines
}

fn agent_lines(
    index: usize,
    message: &Message,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if width >= SIDE_BY_SIDE_MIN_WIDTH {
        let column = (width - PANEL_GAP.width() as u16) / 2;
        let left = panel(index, message, Region::Critical, column, tick, cache);
        let right = panel(index, message, Region::Positive, column, tick, cache);
        let rows = left.len().max(right.len());

        for row in 0..rows {
            let l = left.get(row).cloned().unwrap_or_default();
            let r = right.get(row).cloned().unwrap_or_default();
            let mut spans = pad_line(l, column as usize).spans;
            spans.push(Span::styled(PANEL_GAP, Style::default().fg(COLOR_DIM)));
            spans.extend(r.spans);
            lines.push(Line::from(spans));
        }
    } else {
        lines.extend(panel(index, message, Region::Critical, width, tick, cache));
        lines.push(Line::default());
        lines.extend(panel(index, message, Region::Positive, width, tick, cache));
    }

    if message.synthesis_visible() {
        lines.push(Line::default());
        lines.extend(panel(index, message, Region::Synthesis, width, tick, cache));
    }
    lines
}

fn agent_height(
    index: usize,
    message: &Message,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> usize {
    let mut panel_height =
        |region, width| 1 + region_height(index, message, region, width, tick, cache);

    let mut height = if width >= SIDE_BY_SIDE_MIN_WIDTH {
        let column = (width - PANEL_GAP.width() as u16) / 2;
        panel_height(Region::Critical, column).max(panel_height(Region::Positive, column))
    } else {
        panel_height(Region::Critical, width) + 1 + panel_height(Region::Positive, width)
    };
    if message.synthesis_visible() {
        height += 1 + panel_height(Region::Synthesis, width);
    }
    height
}

/// Number of lines [`render_message`] would produce.
pub fn message_height(
    index: usize,
    message: &Message,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> usize {
    let width = width.max(1);
    let body = match message.panels {
        Some(_) => agent_height(index, message, width, tick, cache),
        None => region_height(index, message, Region::Content, width, tick, cache),
    };
    1 + body
}

/// Render one message to terminal lines.
///
/// `index` is the message's position in the store and keys the cache.
pub fn render_message(
    index: usize,
    message: &Message,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = vec![header_line(message)];

    match message.panels {
        Some(_) => lines.extend(agent_lines(index, message, width, tick, cache)),
        None => lines.extend(region_lines(index, message, Region::Content, width, tick, cache)),
    }
    lines
}

/// Render every message, separated by blank lines.
pub fn render_transcript<'a, I>(
    messages: I,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
) -> Vec<Line<'static>>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut lines = Vec::new();
    for (index, message) in messages.into_iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.extend(render_message(index, message, width, tick, cache));
    }
    lines
}

/// The visible slice of a transcript.
#[derive(Debug, Default)]
pub struct TranscriptWindow {
    pub lines: Vec<Line<'static>>,
    /// Height of the whole transcript in lines
    pub total: usize,
    /// `offset` after clamping to the transcript
    pub offset: usize,
}

impl TranscriptWindow {
    pub fn max_offset(&self, height: usize) -> usize {
        self.total.saturating_sub(height)
    }
}

/// Render the `height` lines that sit `offset` lines above the bottom of the
/// transcript. Only messages that overlap the window are rendered.
pub fn render_transcript_window<'a, I>(
    messages: I,
    width: u16,
    tick: u64,
    cache: &mut RegionCache,
    height: usize,
    offset: usize,
) -> TranscriptWindow
where
    I: IntoIterator<Item = &'a Message>,
{
    let messages: Vec<&Message> = messages.into_iter().collect();
    let heights: Vec<usize> = messages
        .iter()
        .enumerate()
        .map(|(index, message)| message_height(index, message, width, tick, cache))
        .collect();

    // One blank separator between consecutive messages
    let total = heights.iter().sum::<usize>() + heights.len().saturating_sub(1);
    let max_offset = total.saturating_sub(height);
    let offset = offset.min(max_offset);
    let top = max_offset - offset;
    let bottom = top + height;

    let mut lines = Vec::with_capacity(height.min(total));
    let mut y = 0;
    for (index, (message, message_rows)) in messages.iter().zip(&heights).enumerate() {
        if y >= bottom {
            break;
        }
        if index > 0 {
            if y >= top {
                lines.push(Line::default());
            }
            y += 1;
        }
        let end = y + message_rows;
        if end > top && y < bottom {
            let skip = top.saturating_sub(y);
            let take = bottom.min(end) - y.max(top);
            lines.extend(
                render_message(index, message, width, tick, cache)
                    .into_iter()
                    .skip(skip)
                    .take(take),
            );
        }
        y = end;
    }

    TranscriptWindow {
        lines,
        total,
        offset,
    }
}
