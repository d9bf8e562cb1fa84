//! Wire types of the quiz service.

use chrono::NaiveDateTime;
use instalearn_common::{OptionId, QuestionId, TopicId};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp format the service uses for `last_attempt_date`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}

/// A multiple-choice question with its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    #[serde(default)]
    pub topic_name: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub lecture_reference: Option<String>,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Options marked correct. Usually exactly one.
    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.options.iter().filter(|o| o.is_correct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
    /// Stored as an integer flag by the service.
    #[serde(deserialize_with = "bool_or_int")]
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Body of `POST /questions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuestion {
    pub text: String,
    pub topic_id: Option<TopicId>,
    pub image_path: Option<String>,
    pub lecture_reference: Option<String>,
    pub options: Vec<NewOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOption {
    pub text: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// Attempt counters for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question_id: QuestionId,
    #[serde(default)]
    pub correct_attempts: u32,
    #[serde(default)]
    pub incorrect_attempts: u32,
    #[serde(default, deserialize_with = "sqlite_timestamp")]
    pub last_attempt_date: Option<NaiveDateTime>,
    pub question_text: String,
    #[serde(default)]
    pub topic_name: Option<String>,
    /// Percentage of correct attempts, 0 when never attempted.
    #[serde(default)]
    pub success_rate: f64,
}

impl QuestionStats {
    pub fn total_attempts(&self) -> u32 {
        self.correct_attempts + self.incorrect_attempts
    }
}

/// Response of `GET /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: usize,
    pub results: Vec<Question>,
}

fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

fn sqlite_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
