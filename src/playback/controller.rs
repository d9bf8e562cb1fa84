//! Auto-advancing reel player.
//!
//! [`PlaybackController`] owns a [`PlaybackState`] and at most one live
//! [`ReelTimer`]. It runs as a tokio task driven by [`PlaybackHandle`]
//! commands and by its own timer events, and publishes [`PlaybackEvent`]s
//! on a broadcast channel.
//!
//! Any transition that can change the active reel, the play flag or the
//! batch cancels the outstanding timer first and only then decides whether a
//! new one should run.

use instalearn_common::{Error, Result};
use instalearn_reels::{RandomChooser, ReelId};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use super::state::{PlaybackSnapshot, PlaybackState, Transition};
use super::timer::{steps_for, ReelTimer, TimerEvent, TimerPlan};
use crate::config::PlaybackConfig;

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 32;

/// Capacity of the event broadcast channel.
const EVENT_BUFFER: usize = 1024;

/// Event published by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// A new batch was generated and playback started at its first reel.
    BatchGenerated { reels: usize },
    /// The reel at `index` became the active one.
    ReelActivated { index: usize, reel_id: ReelId },
    /// Progress of the active reel, 0-100.
    Progress { reel_id: ReelId, percent: f32 },
    /// Playback was paused or resumed.
    PlayToggled { playing: bool },
    /// The batch was discarded.
    Cleared,
}

#[derive(Debug)]
enum Command {
    SetInput(String),
    Regenerate { seed: Option<u64> },
    Advance,
    Retreat,
    JumpTo(usize),
    TogglePlay,
    Reset,
    Snapshot(oneshot::Sender<PlaybackSnapshot>),
    Shutdown,
}

/// Cloneable handle used to drive a running [`PlaybackController`].
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackHandle {
    /// Subscribe to controller events. Only events published after this call
    /// are received.
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    pub async fn set_input(&self, text: impl Into<String>) -> Result<()> {
        self.send(Command::SetInput(text.into())).await
    }

    /// Rebuild the batch from the current input with random styling.
    pub async fn regenerate(&self) -> Result<()> {
        self.send(Command::Regenerate { seed: None }).await
    }

    /// Rebuild the batch with reproducible styling.
    pub async fn regenerate_seeded(&self, seed: u64) -> Result<()> {
        self.send(Command::Regenerate { seed: Some(seed) }).await
    }

    pub async fn advance(&self) -> Result<()> {
        self.send(Command::Advance).await
    }

    pub async fn retreat(&self) -> Result<()> {
        self.send(Command::Retreat).await
    }

    pub async fn jump_to(&self, index: usize) -> Result<()> {
        self.send(Command::JumpTo(index)).await
    }

    pub async fn toggle_play(&self) -> Result<()> {
        self.send(Command::TogglePlay).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(Command::Reset).await
    }

    /// Current batch, position and play flag.
    pub async fn snapshot(&self) -> Result<PlaybackSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| stopped())
    }

    /// Stop the controller and cancel its timer.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).await.map_err(|_| stopped())
    }
}

fn stopped() -> Error {
    Error::internal("playback controller stopped")
}

/// Owner of the playback state and its auto-advance timer.
pub struct PlaybackController {
    state: PlaybackState,
    config: PlaybackConfig,
    commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<PlaybackEvent>,
    timer_tx: mpsc::UnboundedSender<TimerEvent>,
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
    timer: Option<ReelTimer>,
    next_epoch: u64,
    /// Progress steps completed for the active reel; kept across pauses.
    progress_step: u32,
}

impl PlaybackController {
    /// Create a controller and the handle that drives it. Call [`run`] (or
    /// use [`spawn`]) to start processing.
    ///
    /// [`run`]: PlaybackController::run
    /// [`spawn`]: PlaybackController::spawn
    pub fn new(config: PlaybackConfig) -> (Self, PlaybackHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        let controller = Self {
            state: PlaybackState::new(),
            config,
            commands: command_rx,
            events: event_tx.clone(),
            timer_tx,
            timer_rx,
            timer: None,
            next_epoch: 0,
            progress_step: 0,
        };
        let handle = PlaybackHandle {
            commands: command_tx,
            events: event_tx,
        };
        (controller, handle)
    }

    /// Create a controller and run it on the current tokio runtime.
    pub fn spawn(config: PlaybackConfig) -> (PlaybackHandle, JoinHandle<()>) {
        let (controller, handle) = Self::new(config);
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    /// Process commands and timer events until shutdown or until every
    /// handle is dropped.
    pub async fn run(mut self) {
        tracing::debug!("Playback controller started");

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(event) = self.timer_rx.recv() => self.handle_timer(event),
            }
        }

        self.cancel_timer();
        tracing::debug!("Playback controller stopped");
    }

    fn handle_command(&mut self, command: Command) {
        let transition = match command {
            Command::SetInput(text) => self.state.set_input(text),
            Command::Regenerate { seed: Some(seed) } => {
                self.state.regenerate_with(&mut RandomChooser::seeded(seed))
            }
            Command::Regenerate { seed: None } => self.state.regenerate(),
            Command::Advance => self.state.advance(),
            Command::Retreat => self.state.retreat(),
            Command::JumpTo(index) => self.state.jump_to(index),
            Command::TogglePlay => self.state.toggle_play(),
            Command::Reset => self.state.reset(),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot());
                Transition::Unchanged
            }
            // Handled by the run loop.
            Command::Shutdown => Transition::Unchanged,
        };
        self.apply(transition);
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        let current = self.timer.as_ref().map(ReelTimer::epoch);
        if current != Some(event.epoch()) {
            tracing::trace!(epoch = event.epoch(), ?current, "Dropping stale timer event");
            return;
        }

        match event {
            TimerEvent::Progress { step, steps, .. } => {
                self.progress_step = step;
                if let Some(reel) = self.state.current() {
                    let percent = (step as f32 * 100.0 / steps as f32).min(100.0);
                    self.publish(PlaybackEvent::Progress {
                        reel_id: reel.id().clone(),
                        percent,
                    });
                }
            }
            TimerEvent::AdvanceDue { .. } => {
                // The task has finished on its own.
                self.timer = None;
                let transition = self.state.advance();
                self.apply(transition);
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        if !transition.affects_activity() {
            return;
        }
        self.cancel_timer();

        match transition {
            Transition::Generated => {
                self.progress_step = 0;
                self.publish(PlaybackEvent::BatchGenerated {
                    reels: self.state.len(),
                });
                self.publish_activated();
            }
            Transition::Moved { .. } => {
                self.progress_step = 0;
                self.publish_activated();
            }
            Transition::PlayToggled { playing } => {
                self.publish(PlaybackEvent::PlayToggled { playing });
            }
            Transition::Cleared => {
                self.progress_step = 0;
                self.publish(PlaybackEvent::Cleared);
            }
            Transition::Unchanged | Transition::InputChanged => {}
        }

        self.schedule();
    }

    /// Start a timer for the active reel if playback is running.
    fn schedule(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        let Some(reel) = self.state.current() else {
            return;
        };

        let plan = TimerPlan {
            steps: steps_for(reel.display_time(), self.config.tick_interval()),
            start_step: self.progress_step,
            tick: self.config.tick_interval(),
            advance_delay: self.config.advance_delay(),
        };
        let epoch = self.next_epoch;
        self.next_epoch += 1;

        tracing::debug!(
            reel_id = %reel.id(),
            index = self.state.index(),
            epoch,
            "Scheduling auto-advance"
        );
        self.timer = Some(ReelTimer::spawn(epoch, plan, self.timer_tx.clone()));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn publish_activated(&self) {
        if let Some(reel) = self.state.current() {
            self.publish(PlaybackEvent::ReelActivated {
                index: self.state.index(),
                reel_id: reel.id().clone(),
            });
        }
    }

    fn publish(&self, event: PlaybackEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
