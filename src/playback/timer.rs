//! Progress timer for the active reel.
//!
//! A [`ReelTimer`] ticks the progress of one reel and, once it reaches 100%,
//! waits a short delay and reports that the reel is done. The timer task is
//! aborted when the timer is cancelled or dropped. Each timer carries an
//! epoch; events from a timer that is no longer current must be ignored by
//! the receiver.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Message sent from a timer task to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// `step` of `steps` progress steps have elapsed.
    Progress { epoch: u64, step: u32, steps: u32 },
    /// Progress is complete and the advance delay has passed.
    AdvanceDue { epoch: u64 },
}

impl TimerEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            TimerEvent::Progress { epoch, .. } | TimerEvent::AdvanceDue { epoch } => *epoch,
        }
    }
}

/// Number of ticks needed to show a reel for `display_time`.
pub fn steps_for(display_time: Duration, tick: Duration) -> u32 {
    if tick.is_zero() {
        return 1;
    }
    let steps = (display_time.as_secs_f64() / tick.as_secs_f64()).ceil();
    (steps as u32).max(1)
}

/// Timing parameters of one timer run.
#[derive(Debug, Clone, Copy)]
pub struct TimerPlan {
    /// Total progress steps for the reel.
    pub steps: u32,
    /// Steps already completed (non-zero when resuming after a pause).
    pub start_step: u32,
    pub tick: Duration,
    pub advance_delay: Duration,
}

/// Handle to a running reel timer.
#[derive(Debug)]
pub struct ReelTimer {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl ReelTimer {
    /// Start a timer task that reports to `tx`.
    pub fn spawn(epoch: u64, plan: TimerPlan, tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        tracing::trace!(
            epoch,
            steps = plan.steps,
            start_step = plan.start_step,
            "Starting reel timer"
        );
        let handle = tokio::spawn(run_timer(epoch, plan, tx));
        Self { epoch, handle }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Stop the timer immediately. Nothing further is sent after this
    /// returns, apart from events already queued in the channel.
    pub fn cancel(self) {
        tracing::trace!(epoch = self.epoch, "Cancelling reel timer");
        // Dropping aborts the task.
    }
}

impl Drop for ReelTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_timer(epoch: u64, plan: TimerPlan, tx: mpsc::UnboundedSender<TimerEvent>) {
    if plan.start_step < plan.steps {
        let mut ticker = interval_at(Instant::now() + plan.tick, plan.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for step in plan.start_step + 1..=plan.steps {
            ticker.tick().await;
            let event = TimerEvent::Progress {
                epoch,
                step,
                steps: plan.steps,
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }

    tokio::time::sleep(plan.advance_delay).await;
    let _ = tx.send(TimerEvent::AdvanceDue { epoch });
}
