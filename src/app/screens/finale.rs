//! Finale screen implementation
//!
//! The final greeting rendered as a centered block, with the confetti
//! burst drawn over the whole screen while it lasts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{render_billboard, Billboard};
use crate::card::{ConfettiBurst, ConfettiOverlay};
use crate::config::CardConfig;
use crate::util::centered_rect;

/// Alternating accent colors for the greeting lines
const LINE_COLORS: [Color; 3] = [Color::Magenta, Color::Cyan, Color::Yellow];

/// Finale screen component
#[derive(Debug, Default)]
pub struct FinaleScreen;

impl FinaleScreen {
    /// Create a new finale screen
    pub fn new() -> Self {
        Self
    }

    /// Render the finale screen
    pub fn render(&self, f: &mut Frame, config: &CardConfig, confetti: Option<&ConfettiBurst>) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Billboard
                Constraint::Min(10),   // Greeting block
                Constraint::Length(3), // Help text
            ])
            .split(size);

        render_billboard(f, chunks[0], Billboard::Success);
        self.render_greeting(f, chunks[1], config);
        self.render_help(f, chunks[2]);

        // Confetti falls over everything
        if let Some(burst) = confetti {
            f.render_widget(ConfettiOverlay::new(burst), size);
        }
    }

    /// Render the final greeting block
    fn render_greeting(&self, f: &mut Frame, area: ratatui::layout::Rect, config: &CardConfig) {
        let area = centered_rect(70, 100, area);
        let mut lines = vec![Line::from("")];
        for (i, text) in config.final_lines.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(LINE_COLORS[i % LINE_COLORS.len()])
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        let greeting = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );

        f.render_widget(greeting, area);
    }

    /// Render help text
    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "Q",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Salir"),
        ])];

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}
