//! Press sequencer state machine
//!
//! Owns the whole choreography: escalating hold attempts, the staged
//! space reveal, and the one-shot tap into the finale. All state lives
//! in the `Sequencer` value and every time-dependent method takes the
//! current instant, so the machine is deterministic under test.
//!
//! Timers are data, not callbacks: the repeating progress tick is an
//! `Option<Ticker>` that exists only while a hold is filling the bar,
//! and every deferred transition goes through a single `Option<Pending>`
//! slot. Dropping or replacing the slot is the cancellation, so a stale
//! timer can never fire against a newer state.

use std::time::Instant;

use log::debug;

use crate::config::{AttemptStage, CardConfig, Timings};

/// Card screens, exactly one active at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Instruction and press surface
    Start,
    /// Progress bar filling while the press is held
    Loading,
    /// Staged message reveal
    Space,
    /// Final greeting, terminal
    Finale,
}

/// What the loading screen status line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStatus {
    /// Hold in progress; shows the instruction
    Holding,
    /// Target reached; shows the stage message
    Complete,
    /// Released early; shows the retry message
    Retry,
}

/// Repeating progress tick, alive only while a hold is filling the bar
#[derive(Debug)]
struct Ticker {
    next_due: Instant,
}

/// One-shot deferred transition; scheduling a new one replaces the old
#[derive(Debug)]
struct Pending {
    due: Instant,
    action: PendingAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    /// Early release: back to the start screen, same attempt
    RetrySame,
    /// Non-final attempt completed: back to the start screen, one attempt up
    NextAttempt,
    /// Final attempt completed: enter the space screen
    EnterSpace,
    /// Space cadence: reveal the next message, or arm the tap after the last
    RevealNext,
}

/// The card state machine
#[derive(Debug)]
pub struct Sequencer {
    stages: Vec<AttemptStage>,
    timings: Timings,
    base_speed: f64,
    speed_growth: f64,
    space_message_count: usize,
    screen: Screen,
    status: LoadingStatus,
    attempt: usize,
    progress: f64,
    pressing: bool,
    ticker: Option<Ticker>,
    pending: Option<Pending>,
    revealed: usize,
    armed: bool,
}

impl Sequencer {
    /// Create a sequencer at the start screen. The configuration is
    /// expected to have passed [`CardConfig::validate`].
    pub fn new(config: &CardConfig) -> Self {
        Self {
            stages: config.stages.clone(),
            timings: config.timings.clone(),
            base_speed: config.base_speed,
            speed_growth: config.speed_growth,
            space_message_count: config.space_messages.len(),
            screen: Screen::Start,
            status: LoadingStatus::Holding,
            attempt: 0,
            progress: 0.0,
            pressing: false,
            ticker: None,
            pending: None,
            revealed: 0,
            armed: false,
        }
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current loading status line
    pub fn status(&self) -> LoadingStatus {
        self.status
    }

    /// Active attempt index, starting at 0
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// Number of attempts in the table
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The active attempt table entry
    pub fn stage(&self) -> &AttemptStage {
        &self.stages[self.attempt]
    }

    /// Progress toward the active target, in percent
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether a logical press is active
    pub fn pressing(&self) -> bool {
        self.pressing
    }

    /// Number of space messages revealed so far
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Whether the one-shot tap is armed
    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Cadence of the space message reveal
    pub fn reveal_interval(&self) -> std::time::Duration {
        self.timings.reveal_interval
    }

    /// Progress gained per tick at the current attempt
    pub fn increment(&self) -> f64 {
        self.base_speed * (1.0 + self.attempt as f64 * self.speed_growth)
    }

    /// Begin a press gesture. Ignored while a press is already active,
    /// on the space and finale screens, and during the wait for the
    /// space transition. A press during a retry or next-attempt wait
    /// supersedes it: the pending transition is applied immediately and
    /// the new hold starts in the same call.
    pub fn press_start(&mut self, now: Instant) {
        if self.pressing {
            return;
        }
        match self.screen {
            Screen::Start => self.begin_hold(now),
            Screen::Loading => {
                if let Some(pending) = self.pending.take() {
                    match pending.action {
                        PendingAction::RetrySame | PendingAction::NextAttempt => {
                            self.fire(pending.action, now);
                            self.begin_hold(now);
                        }
                        PendingAction::EnterSpace | PendingAction::RevealNext => {
                            self.pending = Some(pending);
                        }
                    }
                }
            }
            Screen::Space | Screen::Finale => {}
        }
    }

    /// End the press gesture. Ignored unless a press is active. Ending
    /// before the target cancels the tick and schedules a retry of the
    /// same attempt; ending after the target leaves the already
    /// scheduled transition alone.
    pub fn press_end(&mut self, now: Instant) {
        if !self.pressing {
            return;
        }
        self.pressing = false;
        if self.ticker.take().is_some() {
            debug!(
                "press ended early at {:.1}% on attempt {}",
                self.progress, self.attempt
            );
            self.status = LoadingStatus::Retry;
            self.schedule(now + self.timings.retry_delay, PendingAction::RetrySame);
        }
    }

    /// Apply elapsed time: run every whole tick that has come due, then
    /// fire the deferred transition if its due time has passed. Late
    /// calls catch up; a fired transition may chain the next one.
    pub fn advance(&mut self, now: Instant) {
        loop {
            let due = match self.ticker.as_mut() {
                Some(ticker) if ticker.next_due <= now => {
                    let due = ticker.next_due;
                    ticker.next_due = due + self.timings.tick;
                    due
                }
                _ => break,
            };
            self.progress += self.increment();
            let target = self.stage().target;
            if self.progress >= target {
                self.progress = target;
                self.ticker = None;
                self.status = LoadingStatus::Complete;
                debug!("attempt {} reached its target of {:.0}%", self.attempt, target);
                let action = if self.attempt + 1 < self.stages.len() {
                    PendingAction::NextAttempt
                } else {
                    PendingAction::EnterSpace
                };
                self.schedule(due + self.timings.advance_delay, action);
            }
        }

        while let Some(pending) = self.pending.take() {
            if pending.due > now {
                self.pending = Some(pending);
                break;
            }
            self.fire(pending.action, pending.due);
        }
    }

    /// The one-shot tap on the armed space screen. Disarms and enters
    /// the finale; ignored anywhere else.
    pub fn tap(&mut self) {
        if self.screen != Screen::Space || !self.armed {
            return;
        }
        self.armed = false;
        self.pending = None;
        self.screen = Screen::Finale;
        debug!("tap fired, showing the finale");
    }

    fn begin_hold(&mut self, now: Instant) {
        debug!(
            "hold started on attempt {} (target {:.0}%)",
            self.attempt,
            self.stage().target
        );
        self.pressing = true;
        self.screen = Screen::Loading;
        self.status = LoadingStatus::Holding;
        self.progress = 0.0;
        self.ticker = Some(Ticker {
            next_due: now + self.timings.tick,
        });
    }

    fn schedule(&mut self, due: Instant, action: PendingAction) {
        self.pending = Some(Pending { due, action });
    }

    fn fire(&mut self, action: PendingAction, at: Instant) {
        match action {
            PendingAction::RetrySame => {
                debug!("retrying attempt {}", self.attempt);
                self.reset_to_start();
            }
            PendingAction::NextAttempt => {
                self.attempt += 1;
                debug!("advancing to attempt {}", self.attempt);
                self.reset_to_start();
            }
            PendingAction::EnterSpace => {
                debug!("entering the space reveal");
                self.pressing = false;
                self.screen = Screen::Space;
                self.revealed = 0;
                self.armed = false;
                self.schedule(at + self.timings.reveal_interval, PendingAction::RevealNext);
            }
            PendingAction::RevealNext => {
                if self.revealed < self.space_message_count {
                    self.revealed += 1;
                    self.schedule(at + self.timings.reveal_interval, PendingAction::RevealNext);
                } else {
                    debug!("reveal finished, tap armed");
                    self.armed = true;
                }
            }
        }
    }

    fn reset_to_start(&mut self) {
        self.pressing = false;
        self.progress = 0.0;
        self.status = LoadingStatus::Holding;
        self.screen = Screen::Start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardConfig;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn new_seq() -> (Sequencer, Instant) {
        (Sequencer::new(&CardConfig::default()), Instant::now())
    }

    /// Press at `from` and tick until the active stage completes,
    /// returning the instant of the completing tick.
    fn hold_until_complete(seq: &mut Sequencer, from: Instant) -> Instant {
        seq.press_start(from);
        let mut t = from;
        for _ in 0..10_000 {
            t += ms(20);
            seq.advance(t);
            assert!(seq.progress() <= seq.stage().target);
            assert!(seq.progress() <= 100.0);
            if seq.status() == LoadingStatus::Complete {
                return t;
            }
        }
        panic!("stage never completed");
    }

    /// Run all stages to completion and return the instant the space
    /// screen was entered.
    fn run_to_space(seq: &mut Sequencer, from: Instant) -> Instant {
        let mut t = from;
        while seq.screen() != Screen::Space {
            let done = hold_until_complete(seq, t);
            t = done + ms(2000);
            seq.advance(t);
        }
        t
    }

    #[test]
    fn test_initial_state() {
        let (seq, _) = new_seq();
        assert_eq!(seq.screen(), Screen::Start);
        assert_eq!(seq.attempt(), 0);
        assert_eq!(seq.progress(), 0.0);
        assert!(!seq.pressing());
        assert!(!seq.armed());
    }

    #[test]
    fn test_press_starts_loading() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);
        assert_eq!(seq.screen(), Screen::Loading);
        assert_eq!(seq.status(), LoadingStatus::Holding);
        assert!(seq.pressing());
        assert_eq!(seq.progress(), 0.0);
    }

    #[test]
    fn test_tick_cadence_and_catchup() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);

        seq.advance(t0 + ms(19));
        assert_eq!(seq.progress(), 0.0);

        seq.advance(t0 + ms(20));
        assert_eq!(seq.progress(), 1.0);

        // Late call applies every elapsed tick
        seq.advance(t0 + ms(200));
        assert_eq!(seq.progress(), 10.0);
    }

    #[test]
    fn test_repeat_press_start_ignored() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);
        seq.advance(t0 + ms(200));
        assert_eq!(seq.progress(), 10.0);

        seq.press_start(t0 + ms(300));
        seq.advance(t0 + ms(400));
        assert_eq!(seq.progress(), 20.0);
    }

    #[test]
    fn test_press_end_without_press_ignored() {
        let (mut seq, t0) = new_seq();
        seq.press_end(t0);
        seq.advance(t0 + ms(10_000));
        assert_eq!(seq.screen(), Screen::Start);
        assert_eq!(seq.attempt(), 0);
    }

    #[test]
    fn test_progress_clamped_at_target() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);

        // Attempt 0 crosses its target of 80 on the 80th tick
        seq.advance(t0 + ms(2000));
        assert_eq!(seq.progress(), 80.0);
        assert_eq!(seq.status(), LoadingStatus::Complete);
        assert_eq!(seq.screen(), Screen::Loading);

        seq.advance(t0 + ms(2500));
        assert_eq!(seq.progress(), 80.0);
    }

    #[test]
    fn test_early_release_schedules_retry() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);
        seq.advance(t0 + ms(400));
        assert_eq!(seq.progress(), 20.0);

        seq.press_end(t0 + ms(400));
        assert!(!seq.pressing());
        assert_eq!(seq.status(), LoadingStatus::Retry);
        assert_eq!(seq.screen(), Screen::Loading);

        seq.advance(t0 + ms(1899));
        assert_eq!(seq.screen(), Screen::Loading);

        seq.advance(t0 + ms(1900));
        assert_eq!(seq.screen(), Screen::Start);
        assert_eq!(seq.attempt(), 0);
        assert_eq!(seq.progress(), 0.0);
    }

    #[test]
    fn test_immediate_release_returns_to_start() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);
        seq.press_end(t0 + ms(5));
        assert_eq!(seq.progress(), 0.0);

        seq.advance(t0 + ms(1505));
        assert_eq!(seq.screen(), Screen::Start);
        assert_eq!(seq.attempt(), 0);
    }

    #[test]
    fn test_completion_advances_attempt() {
        let (mut seq, t0) = new_seq();
        let done = hold_until_complete(&mut seq, t0);
        assert_eq!(done, t0 + ms(1600));
        assert_eq!(seq.progress(), 80.0);

        seq.advance(done + ms(1999));
        assert_eq!(seq.screen(), Screen::Loading);

        seq.advance(done + ms(2000));
        assert_eq!(seq.screen(), Screen::Start);
        assert_eq!(seq.attempt(), 1);
        assert_eq!(seq.progress(), 0.0);
        assert!(!seq.pressing());
    }

    #[test]
    fn test_release_after_complete_keeps_schedule() {
        let (mut seq, t0) = new_seq();
        let done = hold_until_complete(&mut seq, t0);
        assert!(seq.pressing());

        seq.press_end(done + ms(100));
        assert!(!seq.pressing());
        assert_eq!(seq.status(), LoadingStatus::Complete);

        seq.advance(done + ms(2000));
        assert_eq!(seq.screen(), Screen::Start);
        assert_eq!(seq.attempt(), 1);
    }

    #[test]
    fn test_increment_escalates_per_attempt() {
        let (mut seq, t0) = new_seq();
        let mut t = t0;
        let mut increments = Vec::new();
        while seq.screen() != Screen::Space {
            increments.push(seq.increment());
            let done = hold_until_complete(&mut seq, t);
            t = done + ms(2000);
            seq.advance(t);
        }

        assert_eq!(increments.len(), 3);
        for pair in increments.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!((increments[0] - 1.0).abs() < 1e-9);
        assert!((increments[1] - 1.2).abs() < 1e-9);
        assert!((increments[2] - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_full_run_reaches_space() {
        let (mut seq, t0) = new_seq();
        run_to_space(&mut seq, t0);
        assert_eq!(seq.screen(), Screen::Space);
        assert_eq!(seq.revealed(), 0);
        assert!(!seq.armed());
        assert!(!seq.pressing());
    }

    #[test]
    fn test_space_reveal_cadence() {
        let (mut seq, t0) = new_seq();
        let entered = run_to_space(&mut seq, t0);

        seq.advance(entered + ms(1999));
        assert_eq!(seq.revealed(), 0);

        seq.advance(entered + ms(2000));
        assert_eq!(seq.revealed(), 1);

        for i in 2..=7 {
            seq.advance(entered + ms(2000 * i));
            assert_eq!(seq.revealed(), i as usize);
        }
        assert!(!seq.armed());

        // The firing after the last message arms the tap
        seq.advance(entered + ms(16_000));
        assert_eq!(seq.revealed(), 7);
        assert!(seq.armed());
    }

    #[test]
    fn test_space_reveal_catches_up() {
        let (mut seq, t0) = new_seq();
        let entered = run_to_space(&mut seq, t0);
        seq.advance(entered + ms(60_000));
        assert_eq!(seq.revealed(), 7);
        assert!(seq.armed());
    }

    #[test]
    fn test_tap_only_when_armed() {
        let (mut seq, t0) = new_seq();
        let entered = run_to_space(&mut seq, t0);
        seq.advance(entered + ms(6000));
        assert_eq!(seq.revealed(), 3);

        seq.tap();
        assert_eq!(seq.screen(), Screen::Space);

        seq.advance(entered + ms(16_000));
        assert!(seq.armed());
        seq.tap();
        assert_eq!(seq.screen(), Screen::Finale);
        assert!(!seq.armed());

        // Repeated taps change nothing
        seq.tap();
        assert_eq!(seq.screen(), Screen::Finale);
    }

    #[test]
    fn test_repress_during_retry_wait_supersedes() {
        let (mut seq, t0) = new_seq();
        seq.press_start(t0);
        seq.advance(t0 + ms(200));
        seq.press_end(t0 + ms(200));
        assert_eq!(seq.status(), LoadingStatus::Retry);

        // New press before the retry fires: hold restarts immediately
        seq.press_start(t0 + ms(1000));
        assert_eq!(seq.screen(), Screen::Loading);
        assert_eq!(seq.status(), LoadingStatus::Holding);
        assert!(seq.pressing());
        assert_eq!(seq.attempt(), 0);
        assert_eq!(seq.progress(), 0.0);

        // The superseded reset must not fire at its old due time
        seq.advance(t0 + ms(1700));
        assert!(seq.pressing());
        assert_eq!(seq.screen(), Screen::Loading);
        assert_eq!(seq.progress(), 35.0);
    }

    #[test]
    fn test_repress_during_advance_wait_supersedes() {
        let (mut seq, t0) = new_seq();
        let done = hold_until_complete(&mut seq, t0);
        seq.press_end(done + ms(100));

        // New press before the next-attempt reset: it applies at once
        seq.press_start(done + ms(400));
        assert_eq!(seq.attempt(), 1);
        assert_eq!(seq.screen(), Screen::Loading);
        assert!(seq.pressing());
        assert_eq!(seq.progress(), 0.0);

        // Past the old due time the new hold is still running
        seq.advance(done + ms(2000));
        assert_eq!(seq.attempt(), 1);
        assert!(seq.progress() > 0.0);
    }

    #[test]
    fn test_press_during_space_wait_ignored() {
        let (mut seq, t0) = new_seq();
        let mut t = t0;
        for _ in 0..2 {
            let done = hold_until_complete(&mut seq, t);
            t = done + ms(2000);
            seq.advance(t);
        }
        let done = hold_until_complete(&mut seq, t);
        seq.press_end(done + ms(100));

        seq.press_start(done + ms(500));
        assert!(!seq.pressing());
        assert_eq!(seq.screen(), Screen::Loading);
        assert_eq!(seq.status(), LoadingStatus::Complete);

        seq.advance(done + ms(2000));
        assert_eq!(seq.screen(), Screen::Space);
    }

    #[test]
    fn test_enter_space_consumes_press() {
        let (mut seq, t0) = new_seq();
        let mut t = t0;
        for _ in 0..2 {
            let done = hold_until_complete(&mut seq, t);
            t = done + ms(2000);
            seq.advance(t);
        }
        let done = hold_until_complete(&mut seq, t);
        assert!(seq.pressing());

        // Still physically holding when the transition fires
        seq.advance(done + ms(2000));
        assert_eq!(seq.screen(), Screen::Space);
        assert!(!seq.pressing());

        // The eventual release is a no-op
        seq.press_end(done + ms(2500));
        assert_eq!(seq.screen(), Screen::Space);
    }

    #[test]
    fn test_stage_messages_follow_attempt() {
        let (mut seq, t0) = new_seq();
        assert_eq!(seq.stage().target, 80.0);

        let done = hold_until_complete(&mut seq, t0);
        seq.advance(done + ms(2000));
        assert_eq!(seq.stage().target, 70.0);
        assert_eq!(seq.stage().message, "¡Más fuerte por favor!");
    }
}
