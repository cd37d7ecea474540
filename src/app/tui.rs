//! Terminal management system
//!
//! Handles crossterm backend initialization, screen management, and
//! event polling for the TUI application. Press gestures need more
//! than the default key stream, so init also enables mouse capture,
//! focus-change reporting, and (where the terminal supports it) the
//! keyboard enhancement that delivers real key release events.

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, terminal,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    enhanced_keys: bool,
    last_frame: Instant,
    frame_rate: Duration,
}

impl Tui {
    /// Create a new TUI instance with crossterm backend
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            enhanced_keys: false,
            last_frame: Instant::now(),
            frame_rate: Duration::from_millis(20), // matches the progress tick
        })
    }

    /// Initialize terminal with proper setup
    pub fn init(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        // Needs raw mode, so probe after enabling it
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced_keys {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        disable_raw_mode()?;
        execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Whether the terminal reports real key release events
    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Get terminal size for responsive layout handling
    pub fn size(&self) -> io::Result<ratatui::layout::Rect> {
        self.terminal.size()
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Poll for the next input event, waiting at most until the next
    /// frame is due. Returns `None` when the wait elapses quietly.
    pub fn poll_event(&mut self) -> io::Result<Option<Event>> {
        let timeout = self
            .frame_rate
            .checked_sub(self.last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        let event = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        if self.last_frame.elapsed() >= self.frame_rate {
            self.last_frame = Instant::now();
        }

        Ok(event)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_creation() {
        // Test that TUI can be created without initializing terminal
        let tui = Tui::new();
        assert!(tui.is_ok());
    }

    #[test]
    fn test_frame_rate_matches_progress_tick() {
        let tui = Tui::new().unwrap();
        assert_eq!(tui.frame_rate, Duration::from_millis(20));
    }

    #[test]
    fn test_enhanced_keys_off_before_init() {
        let tui = Tui::new().unwrap();
        assert!(!tui.enhanced_keys());
    }
}
