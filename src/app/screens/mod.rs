//! TUI screen components
//!
//! One render component per card screen. Rendering is a pure function
//! of the sequencer (plus the confetti burst on the finale): the
//! dispatch below matches on the current screen, so exactly one
//! component draws per frame.

pub mod finale;
pub mod loading;
pub mod space;
pub mod start;

pub use finale::FinaleScreen;
pub use loading::LoadingScreen;
pub use space::SpaceScreen;
pub use start::StartScreen;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::card::{ConfettiBurst, Screen, Sequencer};
use crate::config::CardConfig;

/// Render the screen the sequencer is on
pub fn render_card(
    f: &mut Frame,
    seq: &Sequencer,
    config: &CardConfig,
    confetti: Option<&ConfettiBurst>,
) {
    match seq.screen() {
        Screen::Start => StartScreen::new().render(f, seq, config),
        Screen::Loading => LoadingScreen::new().render(f, seq),
        Screen::Space => SpaceScreen::new().render(f, seq, config),
        Screen::Finale => FinaleScreen::new().render(f, config, confetti),
    }
}

/// Billboard artwork variants shown beside the press surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Billboard {
    /// Waiting for a press
    Initial,
    /// Press in progress
    Pressing,
    /// Target reached
    Success,
}

impl Billboard {
    pub fn art(self) -> &'static [&'static str] {
        match self {
            Billboard::Initial => &[
                r"  .-~~~~~-.  ",
                r" /  o   o  \ ",
                r" |    u    | ",
                r"  `-------'  ",
            ],
            Billboard::Pressing => &[
                r"  .-~~~~~-.  ",
                r" /  >   <  \ ",
                r" |    o    | ",
                r"  `-------'  ",
            ],
            Billboard::Success => &[
                r"  .-~~~~~-.  ",
                r" /  ^   ^  \ ",
                r"\|    v    |/",
                r"  `-------'  ",
            ],
        }
    }
}

/// Draw the billboard artwork centered in an area
pub(crate) fn render_billboard(f: &mut Frame, area: ratatui::layout::Rect, billboard: Billboard) {
    let lines: Vec<Line> = billboard.art().iter().map(|row| Line::from(*row)).collect();
    let widget = Paragraph::new(lines)
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Draw the two thumb indicators at a pressed or unpressed offset
pub(crate) fn render_thumbs(f: &mut Frame, area: ratatui::layout::Rect, pressed: bool) {
    let thumbs = Line::from("▼       ▼");
    let (upper, lower) = if pressed {
        (Line::from(""), thumbs)
    } else {
        (thumbs, Line::from(""))
    };
    let style = if pressed {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let widget = Paragraph::new(vec![upper, lower])
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
