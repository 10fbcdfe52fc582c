//! Cancellable one-second countdown ticker

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{SessionMode, TickOutcome, TimerSnapshot, TimerState};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owner of the periodic tick task driving a running timer
///
/// At most one tick task exists per `Countdown`. Starting replaces the
/// previous task, and dropping the `Countdown` aborts whatever is running.
#[derive(Debug, Default)]
pub struct Countdown {
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Spawn the tick task for the timer's current epoch
    ///
    /// `on_tick` receives every snapshot after a tick lands; `on_complete`
    /// runs once with the mode that finished when the countdown reaches zero,
    /// after which the task ends.
    pub fn start<T, C>(
        &mut self,
        timer: Arc<Mutex<TimerState>>,
        epoch: u64,
        on_tick: T,
        on_complete: C,
    ) where
        T: Fn(&TimerSnapshot) + Send + 'static,
        C: FnOnce(SessionMode) + Send + 'static,
    {
        self.cancel();
        debug!("Starting countdown ticker for epoch {}", epoch);
        self.handle = Some(tokio::spawn(run_countdown(timer, epoch, on_tick, on_complete)));
    }

    /// Stop the tick task if one is running
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("Cancelling countdown ticker");
            }
            handle.abort();
        }
    }

    /// Whether a tick task is still alive
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_countdown<T, C>(
    timer: Arc<Mutex<TimerState>>,
    epoch: u64,
    on_tick: T,
    on_complete: C,
) where
    T: Fn(&TimerSnapshot) + Send + 'static,
    C: FnOnce(SessionMode) + Send + 'static,
{
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let (outcome, snapshot) = {
            let mut timer = match timer.lock() {
                Ok(timer) => timer,
                Err(e) => {
                    error!("Failed to lock timer state: {}", e);
                    return;
                }
            };

            // A toggle or mode switch superseded this ticker
            if timer.epoch() != epoch {
                debug!("Countdown epoch {} is stale, stopping ticker", epoch);
                return;
            }

            let outcome = timer.tick();
            (outcome, timer.snapshot())
        };

        on_tick(&snapshot);

        match outcome {
            TickOutcome::Counting(remaining) => {
                if remaining % 60 == 0 {
                    debug!("{} remaining in {}", snapshot.display, snapshot.mode);
                }
            }
            TickOutcome::Completed => {
                info!("{} countdown complete", snapshot.mode.label());
                on_complete(snapshot.mode);
                return;
            }
            TickOutcome::Paused => {
                debug!("Timer paused under a live ticker, stopping");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn running_timer(remaining: u64) -> (Arc<Mutex<TimerState>>, u64) {
        let mut timer = TimerState::new(remaining);
        timer.toggle_running();
        let epoch = timer.epoch();
        (Arc::new(Mutex::new(timer)), epoch)
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_and_completes_once() {
        let (timer, epoch) = running_timer(3);
        let ticks = Arc::new(AtomicUsize::new(0));
        let completions = Arc::new(AtomicUsize::new(0));

        let mut countdown = Countdown::new();
        let tick_counter = Arc::clone(&ticks);
        let completion_counter = Arc::clone(&completions);
        countdown.start(
            Arc::clone(&timer),
            epoch,
            move |_| {
                tick_counter.fetch_add(1, Ordering::SeqCst);
            },
            move |mode| {
                assert_eq!(mode, SessionMode::Focus);
                completion_counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.lock().unwrap().remaining_seconds(), 2);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let timer = timer.lock().unwrap();
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert!(!countdown.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticking() {
        let (timer, epoch) = running_timer(60);
        let mut countdown = Countdown::new();
        countdown.start(Arc::clone(&timer), epoch, |_| {}, |_| {});

        tokio::time::sleep(Duration::from_millis(2500)).await;
        countdown.cancel();
        assert!(!countdown.is_active());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.lock().unwrap().remaining_seconds(), 58);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_epoch_never_ticks() {
        let (timer, epoch) = running_timer(60);
        let mut countdown = Countdown::new();
        countdown.start(Arc::clone(&timer), epoch, |_| {}, |_| {});

        timer.lock().unwrap().set_mode(SessionMode::ShortBreak);
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(timer.lock().unwrap().remaining_seconds(), 300);
        assert!(!countdown.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_ticker() {
        let (timer, epoch) = running_timer(60);
        {
            let mut countdown = Countdown::new();
            countdown.start(Arc::clone(&timer), epoch, |_| {}, |_| {});
            tokio::time::sleep(Duration::from_millis(1500)).await;
        }

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.lock().unwrap().remaining_seconds(), 59);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_reports_the_finished_mode() {
        let (timer, epoch) = running_timer(1);
        let finished = Arc::new(Mutex::new(None));

        let mut countdown = Countdown::new();
        let recorded = Arc::clone(&finished);
        let switch_timer = Arc::clone(&timer);
        countdown.start(
            Arc::clone(&timer),
            epoch,
            // Mode changes between the tick and the completion callback
            move |_| switch_timer.lock().unwrap().set_mode(SessionMode::ShortBreak),
            move |mode| *recorded.lock().unwrap() = Some(mode),
        );

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*finished.lock().unwrap(), Some(SessionMode::Focus));
        assert_eq!(timer.lock().unwrap().mode(), SessionMode::ShortBreak);
    }
}
