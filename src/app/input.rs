//! Input recognition
//!
//! Maps raw crossterm events to the semantic inputs the card reacts
//! to. The interesting part is the press gesture: mouse button state
//! maps directly, but a held key only produces a clean press/release
//! pair on terminals with the keyboard enhancement enabled. Everywhere
//! else the terminal sends auto-repeated presses and no release, so
//! the tracker infers the release from a quiet period.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use std::time::{Duration, Instant};

/// Semantic inputs routed to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A press gesture began
    PressStart,
    /// The press gesture ended (release, mouse up, or focus loss)
    PressEnd,
    /// Quit key
    Quit,
}

/// Quiet period after the last auto-repeat before a release is inferred
const REPEAT_TIMEOUT: Duration = Duration::from_millis(600);

/// Turns key, mouse, and focus events into press gestures
///
/// The logical press is the union of the held key and the held mouse
/// button; a gesture is emitted only when that union changes, so
/// overlapping sources cannot double-start or double-end a press.
#[derive(Debug)]
pub struct PressTracker {
    enhanced_keys: bool,
    key_held: bool,
    mouse_held: bool,
    last_key_seen: Option<Instant>,
}

impl PressTracker {
    /// Create a tracker. `enhanced_keys` selects real release events
    /// over the repeat-timeout heuristic.
    pub fn new(enhanced_keys: bool) -> Self {
        Self {
            enhanced_keys,
            key_held: false,
            mouse_held: false,
            last_key_seen: None,
        }
    }

    /// Whether a logical press is currently active
    pub fn pressed(&self) -> bool {
        self.key_held || self.mouse_held
    }

    /// Process one terminal event
    pub fn handle(&mut self, event: &Event, now: Instant) -> Option<InputEvent> {
        let was_pressed = self.pressed();
        match event {
            Event::Key(key) => {
                if is_quit_key(key) {
                    return Some(InputEvent::Quit);
                }
                if !is_hold_key(key.code) {
                    return None;
                }
                if self.enhanced_keys {
                    match key.kind {
                        KeyEventKind::Press => self.key_held = true,
                        KeyEventKind::Release => self.key_held = false,
                        KeyEventKind::Repeat => {}
                    }
                } else {
                    // Without the enhancement every repeat arrives as a
                    // fresh press and no release ever comes
                    self.key_held = true;
                    self.last_key_seen = Some(now);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self.mouse_held = true,
                MouseEventKind::Up(MouseButton::Left) => self.mouse_held = false,
                _ => {}
            },
            // Press-leave: the terminal lost focus mid-hold
            Event::FocusLost => {
                self.key_held = false;
                self.mouse_held = false;
                self.last_key_seen = None;
            }
            _ => {}
        }
        self.gesture(was_pressed)
    }

    /// Called every frame; in repeat-timeout mode a quiet period since
    /// the last auto-repeat ends the key hold.
    pub fn tick(&mut self, now: Instant) -> Option<InputEvent> {
        if self.enhanced_keys || !self.key_held {
            return None;
        }
        let was_pressed = self.pressed();
        if let Some(seen) = self.last_key_seen {
            if now.duration_since(seen) >= REPEAT_TIMEOUT {
                self.key_held = false;
                self.last_key_seen = None;
            }
        }
        self.gesture(was_pressed)
    }

    fn gesture(&self, was_pressed: bool) -> Option<InputEvent> {
        match (was_pressed, self.pressed()) {
            (false, true) => Some(InputEvent::PressStart),
            (true, false) => Some(InputEvent::PressEnd),
            _ => None,
        }
    }
}

fn is_hold_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Enter)
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
