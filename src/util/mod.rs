//! Utility functions module
//!
//! Contains small layout and color helpers shared by the TUI screens
//! and the confetti renderer.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

/// Parse a `#rrggbb` hex string into a terminal color
///
/// # Examples
/// ```
/// use ratatui::style::Color;
/// use pulsa::util::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#ff9aa2"), Some(Color::Rgb(0xff, 0x9a, 0xa2)));
/// assert_eq!(parse_hex_color("#FFFFFF"), Some(Color::Rgb(255, 255, 255)));
/// assert_eq!(parse_hex_color("ff9aa2"), None);
/// assert_eq!(parse_hex_color("#abc"), None);
/// ```
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Center a rect of the given percentage size inside an area
///
/// # Examples
/// ```
/// use ratatui::layout::Rect;
/// use pulsa::util::centered_rect;
///
/// let area = Rect::new(0, 0, 100, 100);
/// let inner = centered_rect(50, 50, area);
/// assert_eq!(inner, Rect::new(25, 25, 50, 50));
/// ```
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Human-readable duration for hint and log text
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use pulsa::util::brief_duration;
///
/// assert_eq!(brief_duration(Duration::from_secs(2)), "2s");
/// assert_eq!(brief_duration(Duration::from_millis(1500)), "1s 500ms");
/// ```
pub fn brief_duration(d: std::time::Duration) -> String {
    humantime::format_duration(d).to_string()
}

/// Quadratic ease-out: fast start, decelerating finish
///
/// Input outside 0..1 is clamped.
///
/// # Examples
/// ```
/// use pulsa::util::ease_out;
///
/// assert_eq!(ease_out(0.0), 0.0);
/// assert_eq!(ease_out(1.0), 1.0);
/// assert!(ease_out(0.5) > 0.5);
/// ```
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
