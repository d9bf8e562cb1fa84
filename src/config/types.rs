use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub quiz: QuizConfig,
}

/// Timing of the auto-advance player.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// How often the progress indicator of the active reel moves forward.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Pause between a reel reaching 100% and the next reel showing.
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,
}

fn default_tick_interval() -> u64 {
    100
}

fn default_advance_delay() -> u64 {
    300
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            advance_delay_ms: default_advance_delay(),
        }
    }
}

/// Connection to the quiz service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizConfig {
    /// Base URL of the quiz service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of questions drawn for one quiz round
    #[serde(default = "default_question_count")]
    pub question_count: u32,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_question_count() -> u32 {
    10
}

impl QuizConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            question_count: default_question_count(),
        }
    }
}
