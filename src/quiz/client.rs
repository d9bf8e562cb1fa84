use crate::config::QuizConfig;
use crate::quiz::types::{NewQuestion, Question, QuestionStats, SearchResults, Topic};
use instalearn_common::{Error, QuestionId, Result, TopicId};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operations offered by the quiz service
#[async_trait::async_trait]
pub trait QuizApi: Send + Sync {
    /// List every topic
    async fn list_topics(&self) -> Result<Vec<Topic>>;

    /// Create a topic. Names are unique on the service side.
    async fn create_topic(&self, name: &str) -> Result<Topic>;

    /// List questions, optionally restricted to one topic
    async fn list_questions(&self, topic: Option<TopicId>) -> Result<Vec<Question>>;

    /// Store a new question with its options
    async fn create_question(&self, question: &NewQuestion) -> Result<QuestionId>;

    /// Draw up to `count` random questions
    async fn random_quiz(&self, count: u32, topic: Option<TopicId>) -> Result<Vec<Question>>;

    /// Record one answer attempt
    async fn record_attempt(&self, question: QuestionId, is_correct: bool) -> Result<()>;

    /// Attempt counters for every question
    async fn stats(&self) -> Result<Vec<QuestionStats>>;

    /// Substring search over question text
    async fn search(&self, query: &str, topic: Option<TopicId>) -> Result<SearchResults>;
}

/// Join a question's `image_path` onto the service base URL.
///
/// Absolute `http` URLs are returned unchanged.
pub fn resolve_image_url(base_url: &str, image_path: &str) -> String {
    if image_path.starts_with("http") {
        return image_path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        image_path.trim_start_matches('/')
    )
}

/// [`QuizApi`] over HTTP
pub struct HttpQuizClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct Created {
    id: QuestionId,
}

impl HttpQuizClient {
    pub fn new(config: &QuizConfig) -> Self {
        Self::with_timeout(&config.api_url, config.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a question's image, if it has one.
    pub fn image_url(&self, question: &Question) -> Option<String> {
        question
            .image_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| resolve_image_url(&self.base_url, p))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("{}: {}", what, e)))?;

        let status = response.status();
        if status.is_success() {
            tracing::trace!(status = status.as_u16(), "{} succeeded", what);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), %message, "{} rejected", what);
        Err(Error::api(status.as_u16(), message))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        self.send(request, what)
            .await?
            .json()
            .await
            .map_err(|e| Error::http(format!("{}: invalid response body: {}", what, e)))
    }
}

fn topic_query(topic: Option<TopicId>) -> Vec<(&'static str, String)> {
    topic
        .map(|id| vec![("topic_id", id.to_string())])
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl QuizApi for HttpQuizClient {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        self.fetch(self.client.get(self.url("/topics")), "List topics")
            .await
    }

    async fn create_topic(&self, name: &str) -> Result<Topic> {
        #[derive(Serialize)]
        struct NewTopic<'a> {
            name: &'a str,
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("Topic name is required"));
        }

        let request = self.client.post(self.url("/topics")).json(&NewTopic { name });
        let topic: Topic = self.fetch(request, "Create topic").await?;
        tracing::info!(topic_id = %topic.id, name = %topic.name, "Created topic");
        Ok(topic)
    }

    async fn list_questions(&self, topic: Option<TopicId>) -> Result<Vec<Question>> {
        let request = self
            .client
            .get(self.url("/questions"))
            .query(&topic_query(topic));
        self.fetch(request, "List questions").await
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<QuestionId> {
        let request = self.client.post(self.url("/questions")).json(question);
        let created: Created = self.fetch(request, "Create question").await?;
        tracing::info!(question_id = %created.id, "Created question");
        Ok(created.id)
    }

    async fn random_quiz(&self, count: u32, topic: Option<TopicId>) -> Result<Vec<Question>> {
        let mut query = vec![("count", count.to_string())];
        query.extend(topic_query(topic));

        let request = self.client.get(self.url("/quiz/random")).query(&query);
        let questions: Vec<Question> = self.fetch(request, "Fetch random quiz").await?;
        tracing::debug!(requested = count, received = questions.len(), "Fetched quiz");
        Ok(questions)
    }

    async fn record_attempt(&self, question: QuestionId, is_correct: bool) -> Result<()> {
        #[derive(Serialize)]
        struct Attempt {
            question_id: QuestionId,
            is_correct: bool,
        }

        let request = self.client.post(self.url("/stats")).json(&Attempt {
            question_id: question,
            is_correct,
        });
        self.send(request, "Record attempt").await?;
        Ok(())
    }

    async fn stats(&self) -> Result<Vec<QuestionStats>> {
        self.fetch(self.client.get(self.url("/stats")), "Fetch stats")
            .await
    }

    async fn search(&self, query: &str, topic: Option<TopicId>) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_input("Search query is required"));
        }

        let mut params = vec![("q", query.to_string())];
        params.extend(topic_query(topic));

        let request = self.client.get(self.url("/search")).query(&params);
        self.fetch(request, "Search questions").await
    }
}
