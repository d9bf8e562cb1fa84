//! Reel value types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pacing::{MAX_SECONDS, MIN_SECONDS};
use crate::style::ReelStyle;

/// Position-derived reel identifier (`reel-<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReelId(String);

impl ReelId {
    /// Identifier for the reel at `index` within its batch.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(format!("reel-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timed, styled text slide.
///
/// Reels are immutable: they are built by [`crate::generate`] and only read
/// afterwards. Deserialized reels are checked to have non-blank trimmed
/// content and a duration within [`MIN_SECONDS`, `MAX_SECONDS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReel")]
pub struct Reel {
    id: ReelId,
    content: String,
    style: ReelStyle,
    /// Display time in seconds.
    duration: f64,
}

#[derive(Deserialize)]
struct RawReel {
    id: ReelId,
    content: String,
    style: ReelStyle,
    duration: f64,
}

impl TryFrom<RawReel> for Reel {
    type Error = String;

    fn try_from(raw: RawReel) -> Result<Self, Self::Error> {
        let positional = raw
            .id
            .as_str()
            .strip_prefix("reel-")
            .is_some_and(|n| n.parse::<usize>().is_ok());
        if !positional {
            return Err(format!("reel id {:?} is not of the form reel-<index>", raw.id.as_str()));
        }
        let trimmed = raw.content.trim_matches(crate::segment::is_space);
        if trimmed.is_empty() || trimmed != raw.content {
            return Err(format!("reel {} content must be trimmed and non-empty", raw.id));
        }
        if !(MIN_SECONDS..=MAX_SECONDS).contains(&raw.duration) {
            return Err(format!(
                "reel {} duration {} outside [{}, {}]",
                raw.id, raw.duration, MIN_SECONDS, MAX_SECONDS
            ));
        }
        Ok(Self {
            id: raw.id,
            content: raw.content,
            style: raw.style,
            duration: raw.duration,
        })
    }
}

impl Reel {
    pub(crate) fn new(index: usize, content: &str, style: ReelStyle) -> Self {
        Self {
            id: ReelId::from_index(index),
            content: content.to_string(),
            style,
            duration: crate::pacing::duration_for(content),
        }
    }

    pub fn id(&self) -> &ReelId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &ReelStyle {
        &self.style
    }

    /// Display time in seconds, within [3, 8].
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Display time as a [`Duration`].
    pub fn display_time(&self) -> Duration {
        Duration::from_secs_f64(self.duration)
    }

    pub fn word_count(&self) -> usize {
        crate::pacing::word_count(&self.content)
    }
}
