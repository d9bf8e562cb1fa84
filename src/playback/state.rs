//! Playback state for a reel batch.
//!
//! [`PlaybackState`] is a plain value owned by whoever hosts the player. Every
//! operation returns a [`Transition`] so the host knows whether the active
//! reel, the play flag, or the whole batch changed.

use std::sync::Arc;

use instalearn_reels::{Chooser, RandomChooser, Reel};
use serde::Serialize;

/// What a state operation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing observable changed.
    Unchanged,
    /// Only the input text changed.
    InputChanged,
    /// A new batch replaced the old one.
    Generated,
    /// The active reel moved to another index.
    Moved { from: usize, to: usize },
    /// Play/pause flipped.
    PlayToggled { playing: bool },
    /// The batch was discarded.
    Cleared,
}

impl Transition {
    /// Whether the reel on screen or its play state may differ afterwards.
    pub fn affects_activity(self) -> bool {
        !matches!(self, Transition::Unchanged | Transition::InputChanged)
    }
}

/// Input text, current batch, position and play flag.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    input: String,
    reels: Arc<[Reel]>,
    index: usize,
    playing: bool,
}

/// Serializable view of a [`PlaybackState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub reels: Arc<[Reel]>,
    pub index: usize,
    pub playing: bool,
}

impl PlaybackSnapshot {
    pub fn current(&self) -> Option<&Reel> {
        self.reels.get(self.index)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            input: String::new(),
            reels: Arc::from(Vec::new()),
            index: 0,
            playing: false,
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    /// The active reel, if a batch is loaded.
    pub fn current(&self) -> Option<&Reel> {
        self.reels.get(self.index)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            reels: Arc::clone(&self.reels),
            index: self.index,
            playing: self.playing,
        }
    }

    /// Replace the input text. The current batch is left alone.
    pub fn set_input(&mut self, text: impl Into<String>) -> Transition {
        self.input = text.into();
        Transition::InputChanged
    }

    /// Rebuild the batch from the current input with random styling.
    pub fn regenerate(&mut self) -> Transition {
        self.regenerate_with(&mut RandomChooser::from_entropy())
    }

    /// Rebuild the batch from the current input, styling it with `chooser`.
    ///
    /// Whitespace-only input leaves everything untouched. Otherwise the new
    /// batch replaces the old one, the position resets to 0 and playback
    /// starts.
    pub fn regenerate_with<C: Chooser + ?Sized>(&mut self, chooser: &mut C) -> Transition {
        if self.input.trim_matches(instalearn_reels::is_space).is_empty() {
            return Transition::Unchanged;
        }

        self.reels = instalearn_reels::generate_with(&self.input, chooser).into();
        self.index = 0;
        self.playing = true;
        tracing::debug!(reels = self.reels.len(), "Regenerated reel batch");
        Transition::Generated
    }

    /// Move to the next reel, wrapping to the first after the last.
    pub fn advance(&mut self) -> Transition {
        if self.reels.is_empty() {
            return Transition::Unchanged;
        }
        let to = (self.index + 1) % self.reels.len();
        self.move_to(to)
    }

    /// Move to the previous reel, wrapping to the last before the first.
    pub fn retreat(&mut self) -> Transition {
        if self.reels.is_empty() {
            return Transition::Unchanged;
        }
        let to = if self.index == 0 {
            self.reels.len() - 1
        } else {
            self.index - 1
        };
        self.move_to(to)
    }

    /// Jump to `index`. Out-of-range targets are ignored.
    pub fn jump_to(&mut self, index: usize) -> Transition {
        if index >= self.reels.len() {
            tracing::trace!(index, len = self.reels.len(), "Ignoring out-of-range jump");
            return Transition::Unchanged;
        }
        self.move_to(index)
    }

    pub fn toggle_play(&mut self) -> Transition {
        self.playing = !self.playing;
        Transition::PlayToggled {
            playing: self.playing,
        }
    }

    /// Drop the batch and return to the initial position and paused state.
    /// The input text is kept so the user can regenerate.
    pub fn reset(&mut self) -> Transition {
        self.reels = Arc::from(Vec::new());
        self.index = 0;
        self.playing = false;
        Transition::Cleared
    }

    fn move_to(&mut self, to: usize) -> Transition {
        let from = self.index;
        self.index = to;
        // Moving onto the current index still counts, so its timer restarts.
        Transition::Moved { from, to }
    }
}
