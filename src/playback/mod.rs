//! Reel playback: position and play state, the per-reel progress timer, and
//! the controller task that ties them together.

mod controller;
mod state;
mod timer;

pub use controller::{PlaybackController, PlaybackEvent, PlaybackHandle};
pub use state::{PlaybackSnapshot, PlaybackState, Transition};
pub use timer::{steps_for, ReelTimer, TimerEvent, TimerPlan};
