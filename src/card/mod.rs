//! Card choreography module
//!
//! Contains the press sequencer state machine and the confetti burst
//! that celebrates reaching the final screen.

pub mod confetti;
pub mod sequencer;

pub use confetti::{ConfettiBurst, ConfettiOverlay};
pub use sequencer::{LoadingStatus, Screen, Sequencer};
