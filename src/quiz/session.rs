//! One pass through a set of quiz questions.

use crate::quiz::types::{Question, QuestionStats};
use instalearn_common::{Error, OptionId, QuestionId, Result};

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: QuestionId,
    pub is_correct: bool,
    /// Explanation attached to the chosen option.
    pub explanation: Option<String>,
    /// Text of the correct option(s), joined with " / ".
    pub correct_answer: String,
}

/// Where the session is after [`QuizSession::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved to the question at this index.
    Question(usize),
    /// No questions left.
    Finished,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    answered_current: bool,
    finished: bool,
    correct: usize,
    answered: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let finished = questions.is_empty();
        Self {
            questions,
            index: 0,
            answered_current: false,
            finished,
            correct: 0,
            answered: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The question being asked, `None` once finished.
    pub fn current(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn is_answered(&self) -> bool {
        self.answered_current
    }

    /// `(correct, answered)` so far.
    pub fn score(&self) -> (usize, usize) {
        (self.correct, self.answered)
    }

    /// Answer the current question. Only the first answer counts.
    pub fn answer(&mut self, option: OptionId) -> Result<AnswerOutcome> {
        let question = self
            .current()
            .ok_or_else(|| Error::invalid_input("Quiz is finished"))?;
        if self.answered_current {
            return Err(Error::invalid_input("Question already answered"));
        }

        let chosen = question.option(option).ok_or_else(|| {
            Error::invalid_input(format!(
                "Option {} does not belong to question {}",
                option, question.id
            ))
        })?;

        let outcome = AnswerOutcome {
            question_id: question.id,
            is_correct: chosen.is_correct,
            explanation: chosen.explanation.clone().filter(|e| !e.trim().is_empty()),
            correct_answer: question
                .correct_options()
                .map(|o| o.text.as_str())
                .collect::<Vec<_>>()
                .join(" / "),
        };

        self.answered_current = true;
        self.answered += 1;
        if outcome.is_correct {
            self.correct += 1;
        }
        tracing::debug!(
            question_id = %outcome.question_id,
            correct = outcome.is_correct,
            "Answered question"
        );
        Ok(outcome)
    }

    /// Move to the next question, or finish after the last one.
    pub fn next(&mut self) -> Progress {
        if self.finished || self.index + 1 >= self.questions.len() {
            self.finished = true;
            return Progress::Finished;
        }
        self.index += 1;
        self.answered_current = false;
        Progress::Question(self.index)
    }

    /// Keep only the stats rows for questions in this session.
    pub fn filter_stats<'a>(&self, stats: &'a [QuestionStats]) -> Vec<&'a QuestionStats> {
        stats
            .iter()
            .filter(|s| self.questions.iter().any(|q| q.id == s.question_id))
            .collect()
    }
}
