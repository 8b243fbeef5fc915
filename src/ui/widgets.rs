//! UI helper widgets and formatting functions

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

/// Creates a centered rectangle with given width percentage and fixed height
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        area.x + x,
        area.y + y,
        popup_width.min(area.width),
        height.min(area.height),
    )
}

/// Returns style for an input field label based on focus state
pub fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Returns border style for a pane based on focus state
pub fn pane_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Key badge followed by its label, for footers and dialogs
pub fn key_hint(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
        Span::raw(format!(" {}  ", label)),
    ]
}

/// Text cursor shown after the focused input
pub fn cursor_span(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▌", Style::default().fg(Color::White))
    } else {
        Span::raw("")
    }
}
