//! Session timer state machine

use serde::{Deserialize, Serialize};

use super::SessionMode;

/// Observable phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    /// Paused with time left
    Idle,
    /// Counting down
    Running,
    /// Countdown reached zero
    Expired,
}

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is paused, nothing changed
    Paused,
    /// Remaining time after the decrement
    Counting(u64),
    /// Countdown reached zero; the timer stopped itself
    Completed,
}

/// Countdown state for the current session
#[derive(Debug, Clone)]
pub struct TimerState {
    mode: SessionMode,
    remaining_seconds: u64,
    running: bool,
    /// Bumped on every toggle and mode switch
    epoch: u64,
}

impl TimerState {
    /// Create a paused focus timer loaded with `initial_seconds`
    pub fn new(initial_seconds: u64) -> Self {
        Self {
            mode: SessionMode::Focus,
            remaining_seconds: initial_seconds,
            running: false,
            epoch: 0,
        }
    }

    /// Switch mode, reload its full duration and stop the countdown
    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
        self.remaining_seconds = mode.duration_seconds();
        self.running = false;
        self.epoch += 1;
    }

    /// Flip between running and paused; returns the new running flag
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.epoch += 1;
        self.running
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Paused;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.running = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Counting(self.remaining_seconds)
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> TimerPhase {
        if self.remaining_seconds == 0 {
            TimerPhase::Expired
        } else if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    /// Serializable view of the timer
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            display: format_clock(self.remaining_seconds),
            running: self.running,
            phase: self.phase(),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(SessionMode::Focus.duration_seconds())
    }
}

/// Point-in-time copy of the timer published to watchers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: SessionMode,
    pub remaining_seconds: u64,
    pub display: String,
    pub running: bool,
    pub phase: TimerPhase,
}

/// Format seconds as MM:SS
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_timer(remaining: u64) -> TimerState {
        let mut timer = TimerState::new(remaining);
        timer.toggle_running();
        timer
    }

    #[test]
    fn set_mode_resets_duration_and_stops() {
        for mode in SessionMode::ALL {
            let mut timer = running_timer(42);
            timer.set_mode(mode);
            assert_eq!(timer.remaining_seconds(), mode.duration_seconds());
            assert!(!timer.is_running());
            assert_eq!(timer.mode(), mode);
            assert_eq!(timer.phase(), TimerPhase::Idle);
        }
    }

    #[test]
    fn short_break_is_five_minutes() {
        let mut timer = TimerState::default();
        timer.set_mode("shortBreak".parse().unwrap());
        assert_eq!(timer.remaining_seconds(), 300);
        assert!(!timer.is_running());
    }

    #[test]
    fn last_second_completes_once() {
        let mut timer = running_timer(1);
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.phase(), TimerPhase::Expired);

        // Stopped after completion, further ticks are inert
        assert_eq!(timer.tick(), TickOutcome::Paused);
        assert_eq!(timer.tick(), TickOutcome::Paused);
    }

    #[test]
    fn paused_ticks_do_not_change_time() {
        let mut timer = TimerState::new(600);
        for _ in 0..10 {
            assert_eq!(timer.tick(), TickOutcome::Paused);
        }
        assert_eq!(timer.remaining_seconds(), 600);
    }

    #[test]
    fn remaining_never_negative() {
        let mut timer = running_timer(3);
        let mut completions = 0;
        for _ in 0..20 {
            if timer.tick() == TickOutcome::Completed {
                completions += 1;
                // Restart from zero, completes on the next tick
                timer.toggle_running();
            }
        }
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(completions > 1);
    }

    #[test]
    fn toggle_at_zero_completes_on_next_tick() {
        let mut timer = running_timer(1);
        timer.tick();
        assert!(timer.toggle_running());
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert!(!timer.is_running());
    }

    #[test]
    fn full_focus_session() {
        let mut timer = TimerState::default();
        timer.toggle_running();
        let completions = (0..1500)
            .filter(|_| timer.tick() == TickOutcome::Completed)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn epoch_tracks_control_changes() {
        let mut timer = TimerState::default();
        timer.toggle_running();
        timer.tick();
        assert_eq!(timer.epoch(), 1);
        timer.set_mode(SessionMode::LongBreak);
        assert_eq!(timer.epoch(), 2);
    }

    #[test]
    fn snapshot_formats_clock() {
        let timer = TimerState::new(65);
        let snapshot = timer.snapshot();
        assert_eq!(snapshot.display, "01:05");
        assert_eq!(snapshot.phase, TimerPhase::Idle);
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(0), "00:00");
    }
}
