//! Main application controller
//!
//! Owns the terminal, the card configuration, the press sequencer,
//! and the confetti burst, and runs the frame loop that ties them
//! together: advance the sequencer, draw the current screen, route
//! inputs.

use crate::{
    app::{
        input::{InputEvent, PressTracker},
        screens,
        tui::Tui,
    },
    card::{ConfettiBurst, Screen, Sequencer},
    config::CardConfig,
    Result,
};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io;
use std::time::Instant;

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Card content and tuning
    config: CardConfig,
    /// The card state machine
    sequencer: Sequencer,
    /// Press gesture recognizer
    tracker: PressTracker,
    /// Live celebration burst, present only while particles fall
    confetti: Option<ConfettiBurst>,
    /// The burst fires once per run
    celebrated: bool,
    rng: SmallRng,
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(config: CardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tui: Tui::new()?,
            sequencer: Sequencer::new(&config),
            tracker: PressTracker::new(false),
            config,
            confetti: None,
            celebrated: false,
            rng: SmallRng::from_entropy(),
            should_quit: false,
        })
    }

    /// Initialize the TUI and pick the press recognition mode the
    /// terminal supports
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| crate::PulsaError::Terminal(format!("failed to initialize: {}", e)))?;
        self.tracker = PressTracker::new(self.tui.enhanced_keys());
        debug!(
            "terminal ready, enhanced key reporting: {}",
            self.tui.enhanced_keys()
        );
        Ok(())
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.sequencer.advance(now);
            self.update_confetti(now);
            self.draw()?;
            self.handle_events()?;
        }
        self.tui.restore()?;
        Ok(())
    }

    /// Spawn the burst on entering the finale, then advance it until
    /// it drains
    fn update_confetti(&mut self, now: Instant) {
        if self.sequencer.screen() == Screen::Finale && !self.celebrated {
            self.celebrated = true;
            self.confetti = Some(ConfettiBurst::spawn(
                &mut self.rng,
                &self.config.confetti,
                now,
            ));
            debug!("confetti burst spawned");
        }
        if let Some(burst) = &mut self.confetti {
            burst.advance(now);
            if burst.is_done() {
                self.confetti = None;
                debug!("confetti burst drained");
            }
        }
    }

    /// Draw the current screen
    fn draw(&mut self) -> io::Result<()> {
        self.tui.draw(|f| {
            screens::render_card(f, &self.sequencer, &self.config, self.confetti.as_ref())
        })
    }

    /// Poll for input and route recognized gestures
    fn handle_events(&mut self) -> Result<()> {
        let event = self.tui.poll_event()?;
        let now = Instant::now();
        if let Some(event) = &event {
            if let Some(input) = self.tracker.handle(event, now) {
                self.apply_input(input, now);
            }
        }
        // Inferred key release in repeat-timeout mode
        if let Some(input) = self.tracker.tick(now) {
            self.apply_input(input, now);
        }
        Ok(())
    }

    /// Route one semantic input by the current screen
    fn apply_input(&mut self, input: InputEvent, now: Instant) {
        match input {
            InputEvent::Quit => self.should_quit = true,
            InputEvent::PressStart => match self.sequencer.screen() {
                Screen::Start | Screen::Loading => self.sequencer.press_start(now),
                Screen::Space => self.sequencer.tap(),
                Screen::Finale => {}
            },
            InputEvent::PressEnd => self.sequencer.press_end(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(CardConfig::default()).unwrap()
    }

    #[test]
    fn test_app_creation() {
        let app = app();
        assert!(!app.should_quit);
        assert_eq!(app.sequencer.screen(), Screen::Start);
        assert!(app.confetti.is_none());
    }

    #[test]
    fn test_quit_input_sets_flag() {
        let mut app = app();
        app.apply_input(InputEvent::Quit, Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_press_routing_on_start() {
        let mut app = app();
        let now = Instant::now();
        app.apply_input(InputEvent::PressStart, now);
        assert_eq!(app.sequencer.screen(), Screen::Loading);
        assert!(app.sequencer.pressing());

        app.apply_input(InputEvent::PressEnd, now);
        assert!(!app.sequencer.pressing());
    }

    #[test]
    fn test_press_on_finale_ignored() {
        let mut app = app();
        // No path mutates the screen directly; drive the machine there
        let mut t = Instant::now();
        while app.sequencer.screen() != Screen::Space {
            app.sequencer.press_start(t);
            loop {
                t += std::time::Duration::from_millis(20);
                app.sequencer.advance(t);
                if app.sequencer.screen() != Screen::Loading
                    || app.sequencer.status() != crate::card::LoadingStatus::Holding
                {
                    break;
                }
            }
            app.sequencer.press_end(t);
            t += std::time::Duration::from_millis(2000);
            app.sequencer.advance(t);
        }
        t += std::time::Duration::from_millis(20_000);
        app.sequencer.advance(t);
        assert!(app.sequencer.armed());

        app.apply_input(InputEvent::PressStart, t);
        assert_eq!(app.sequencer.screen(), Screen::Finale);

        // Confetti fires exactly once
        app.update_confetti(t);
        assert!(app.confetti.is_some());
        assert!(app.celebrated);
        app.apply_input(InputEvent::PressStart, t);
        assert_eq!(app.sequencer.screen(), Screen::Finale);
    }
}
