//! Quiz companion: a client for the quiz service, question authoring and
//! quiz-taking sessions.

mod client;
mod draft;
mod session;
mod types;

pub use client::{resolve_image_url, HttpQuizClient, QuizApi};
pub use draft::{DraftOption, QuestionDraft, MIN_OPTIONS};
pub use session::{AnswerOutcome, Progress, QuizSession};
pub use types::*;
