//! Space reveal screen implementation
//!
//! A quiet starfield band over the staged message reveal. Messages
//! appear one at a time on the sequencer's cadence; once the last one
//! is out the tap instruction takes over and the screen waits for the
//! one-shot tap.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::card::Sequencer;
use crate::config::CardConfig;
use crate::util::brief_duration;

/// Space reveal screen component
#[derive(Debug, Default)]
pub struct SpaceScreen;

impl SpaceScreen {
    /// Create a new space screen
    pub fn new() -> Self {
        Self
    }

    /// Render the space screen
    pub fn render(&self, f: &mut Frame, seq: &Sequencer, config: &CardConfig) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Starfield band
                Constraint::Min(9),    // Revealed messages
                Constraint::Length(3), // Tap instruction or cadence hint
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_starfield(f, chunks[0]);
        self.render_messages(f, chunks[1], seq, config);
        self.render_hint(f, chunks[2], seq, config);
        self.render_help(f, chunks[3], seq);
    }

    /// Render a deterministic scatter of stars
    fn render_starfield(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let mut lines = Vec::with_capacity(area.height as usize);
        for y in 0..area.height {
            let mut row = String::with_capacity(area.width as usize);
            for x in 0..area.width {
                // Cheap hash scatter, stable across frames
                let n = (x as u32).wrapping_mul(31).wrapping_add((y as u32).wrapping_mul(17));
                row.push(match n % 23 {
                    0 => '✦',
                    7 | 15 => '·',
                    _ => ' ',
                });
            }
            lines.push(Line::from(row));
        }

        let starfield = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
        f.render_widget(starfield, area);
    }

    /// Render the messages revealed so far
    fn render_messages(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        seq: &Sequencer,
        config: &CardConfig,
    ) {
        let revealed = seq.revealed().min(config.space_messages.len());
        let mut lines = Vec::with_capacity(revealed * 2);
        for (i, message) in config.space_messages[..revealed].iter().enumerate() {
            // Latest message pops, earlier ones recede
            let style = if i + 1 == revealed && !seq.armed() {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(message.clone(), style)));
            lines.push(Line::from(""));
        }

        let messages = Paragraph::new(lines).alignment(Alignment::Center);
        f.render_widget(messages, area);
    }

    /// Render the tap instruction once armed, the cadence hint before
    fn render_hint(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        seq: &Sequencer,
        config: &CardConfig,
    ) {
        let line = if seq.armed() {
            Line::from(Span::styled(
                config.tap_instruction.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                format!(
                    "nuevo mensaje cada {}",
                    brief_duration(seq.reveal_interval())
                ),
                Style::default().fg(Color::DarkGray),
            ))
        };

        let hint = Paragraph::new(vec![Line::from(""), line]).alignment(Alignment::Center);
        f.render_widget(hint, area);
    }

    /// Render help text
    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect, seq: &Sequencer) {
        let help_text = if seq.armed() {
            vec![Line::from(vec![
                Span::styled(
                    "Clic/Espacio",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Presiona  "),
                Span::styled(
                    "Q",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Salir"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::raw("Espera...  "),
                Span::styled(
                    "Q",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Salir"),
            ])]
        };

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
