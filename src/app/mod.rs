//! TUI application module
//!
//! Contains the terminal wrapper, the input recognizer, the screen
//! components, and the application controller that ties them to the
//! card state machine.

pub mod app;
pub mod input;
pub mod screens;
pub mod tui;

pub use app::App;
pub use input::{InputEvent, PressTracker};
pub use screens::{FinaleScreen, LoadingScreen, SpaceScreen, StartScreen};
pub use tui::Tui;
