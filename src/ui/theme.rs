//! Color theme constants.

use ratatui::style::Color;

pub const COLOR_BORDER: Color = Color::DarkGray;
pub const COLOR_ACCENT: Color = Color::Cyan;
pub const COLOR_HEADER: Color = Color::White;
pub const COLOR_DIM: Color = Color::DarkGray;

/// User message header
pub const COLOR_USER: Color = Color::LightBlue;
/// Assistant message header
pub const COLOR_ASSISTANT: Color = Color::LightGreen;

// ============================================================================
// Agent panels
// ============================================================================

pub const COLOR_CRITICAL: Color = Color::LightRed;
pub const COLOR_POSITIVE: Color = Color::LightGreen;
pub const COLOR_SYNTHESIS: Color = Color::LightMagenta;

/// Inline error marker and notices
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_NOTICE: Color = Color::Yellow;

/// Streaming cursor block
pub const COLOR_CURSOR: Color = Color::Magenta;
