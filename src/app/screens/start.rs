//! Start screen implementation
//!
//! Title card with the press instruction, the billboard in its initial
//! pose, the attempt indicator, and the thumb markers waiting above
//! the press surface.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{render_billboard, render_thumbs, Billboard};
use crate::card::Sequencer;
use crate::config::CardConfig;

/// Start screen component
#[derive(Debug, Default)]
pub struct StartScreen;

impl StartScreen {
    /// Create a new start screen
    pub fn new() -> Self {
        Self
    }

    /// Render the start screen
    pub fn render(&self, f: &mut Frame, seq: &Sequencer, config: &CardConfig) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Length(5), // Billboard
                Constraint::Min(5),    // Instruction and attempt indicator
                Constraint::Length(3), // Thumb indicators
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        render_billboard(f, chunks[1], Billboard::Initial);
        self.render_instruction(f, chunks[2], seq, config);
        render_thumbs(f, chunks[3], false);
        self.render_help(f, chunks[4]);
    }

    /// Render the title section
    fn render_title(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Main title
                Constraint::Length(2), // Subtitle
            ])
            .split(area);

        let title = Paragraph::new("PULSA")
            .style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Una tarjeta interactiva para ti")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    /// Render the press instruction and the attempt indicator
    fn render_instruction(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        seq: &Sequencer,
        config: &CardConfig,
    ) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                config.hold_instruction.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Intento {} de {}", seq.attempt() + 1, seq.stage_count()),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let instruction = Paragraph::new(lines).alignment(Alignment::Center);
        f.render_widget(instruction, area);
    }

    /// Render the help text
    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "Espacio/Enter/clic",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Mantén presionado  "),
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
