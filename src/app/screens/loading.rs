//! Loading screen implementation
//!
//! The press-and-hold view: attempt header, billboard reacting to the
//! hold, progress gauge filling toward the stage target, and the
//! status line that flips to the stage message on completion or the
//! retry message on an early release.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::{render_billboard, render_thumbs, Billboard};
use crate::card::{LoadingStatus, Sequencer};

/// Loading screen component
#[derive(Debug, Default)]
pub struct LoadingScreen;

impl LoadingScreen {
    /// Create a new loading screen
    pub fn new() -> Self {
        Self
    }

    /// Render the loading screen
    pub fn render(&self, f: &mut Frame, seq: &Sequencer) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Attempt header
                Constraint::Length(5), // Billboard
                Constraint::Length(3), // Progress gauge
                Constraint::Min(4),    // Status line
                Constraint::Length(3), // Thumb indicators
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_header(f, chunks[0], seq);
        render_billboard(f, chunks[1], self.billboard(seq));
        self.render_gauge(f, chunks[2], seq);
        self.render_status(f, chunks[3], seq);
        render_thumbs(f, chunks[4], seq.pressing());
        self.render_help(f, chunks[5]);
    }

    fn billboard(&self, seq: &Sequencer) -> Billboard {
        match seq.status() {
            LoadingStatus::Holding => Billboard::Pressing,
            LoadingStatus::Complete => Billboard::Success,
            LoadingStatus::Retry => Billboard::Initial,
        }
    }

    /// Render the attempt header
    fn render_header(&self, f: &mut Frame, area: ratatui::layout::Rect, seq: &Sequencer) {
        let color = match seq.status() {
            LoadingStatus::Holding => Color::Cyan,
            LoadingStatus::Complete => Color::Green,
            LoadingStatus::Retry => Color::Yellow,
        };

        let header = Paragraph::new(format!(
            "Intento {} de {}",
            seq.attempt() + 1,
            seq.stage_count()
        ))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        f.render_widget(header, area);
    }

    /// Render the progress gauge
    fn render_gauge(&self, f: &mut Frame, area: ratatui::layout::Rect, seq: &Sequencer) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Progreso")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .ratio((seq.progress() / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", seq.progress()));

        f.render_widget(gauge, area);
    }

    /// Render the status line for the current hold
    fn render_status(&self, f: &mut Frame, area: ratatui::layout::Rect, seq: &Sequencer) {
        let (text, style) = match seq.status() {
            LoadingStatus::Holding => (
                "Sigue presionando...".to_string(),
                Style::default().fg(Color::White),
            ),
            LoadingStatus::Complete => (
                seq.stage().message.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            LoadingStatus::Retry => (
                seq.stage().retry_message.clone(),
                Style::default().fg(Color::Yellow),
            ),
        };

        let status = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
            .alignment(Alignment::Center);

        f.render_widget(status, area);
    }

    /// Render help text
    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "Suelta",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" para reintentar  "),
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
