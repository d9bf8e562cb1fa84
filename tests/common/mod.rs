//! Shared test harness for quiz client tests.
//!
//! [`QuizHarness`] starts a wiremock server standing in for the quiz service
//! and builds an [`HttpQuizClient`] pointed at it.

#![allow(dead_code)]

use std::time::Duration;

use instalearn::quiz::HttpQuizClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub struct QuizHarness {
    pub server: MockServer,
    pub client: HttpQuizClient,
}

impl QuizHarness {
    pub async fn start() -> Self {
        Self::with_timeout(Duration::from_secs(2)).await
    }

    pub async fn with_timeout(timeout: Duration) -> Self {
        let server = MockServer::start().await;
        let client = HttpQuizClient::with_timeout(&server.uri(), timeout);
        Self { server, client }
    }
}

/// A question row as the service returns it, options flagged with 0/1.
pub fn question_json(id: i64, text: &str, correct_option: i64) -> Value {
    let options: Vec<Value> = (1..=3)
        .map(|n| {
            let option_id = id * 10 + n;
            json!({
                "id": option_id,
                "question_id": id,
                "text": format!("Option {n}"),
                "is_correct": i64::from(option_id == correct_option),
                "explanation": format!("Explanation {n}"),
            })
        })
        .collect();

    json!({
        "id": id,
        "text": text,
        "topic_id": 1,
        "topic_name": "Rust",
        "image_path": null,
        "lecture_reference": "Lecture 1",
        "options": options,
    })
}
