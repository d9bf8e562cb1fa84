//! Question authoring.
//!
//! A [`QuestionDraft`] is edited field by field and turned into a
//! [`NewQuestion`] by [`QuestionDraft::build`], which enforces the same rules
//! the service expects: non-blank text, at least two options, every option
//! filled in, at least one correct.

use crate::quiz::types::{NewOption, NewQuestion};
use instalearn_common::{Error, Result, TopicId};

/// Fewest options a question may have.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOption {
    pub text: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub topic_id: Option<TopicId>,
    pub image_url: String,
    pub lecture_reference: String,
    options: Vec<DraftOption>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            topic_id: None,
            image_url: String::new(),
            lecture_reference: String::new(),
            options: vec![
                DraftOption {
                    is_correct: true,
                    ..DraftOption::default()
                },
                DraftOption::default(),
            ],
        }
    }
}

impl QuestionDraft {
    /// Empty draft with two blank options, the first marked correct.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[DraftOption] {
        &self.options
    }

    /// Append a blank, incorrect option and return its index.
    pub fn add_option(&mut self) -> usize {
        self.options.push(DraftOption::default());
        self.options.len() - 1
    }

    pub fn set_option_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.option_mut(index)?.text = text.into();
        Ok(())
    }

    pub fn set_explanation(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.option_mut(index)?.explanation = text.into();
        Ok(())
    }

    /// Make option `index` the only correct one.
    pub fn mark_correct(&mut self, index: usize) -> Result<()> {
        self.option_mut(index)?;
        for (i, option) in self.options.iter_mut().enumerate() {
            option.is_correct = i == index;
        }
        Ok(())
    }

    /// Remove option `index`. If it was the correct one, the first remaining
    /// option becomes correct.
    pub fn remove_option(&mut self, index: usize) -> Result<()> {
        self.option_mut(index)?;
        if self.options.len() <= MIN_OPTIONS {
            return Err(Error::invalid_input(
                "A question must have at least 2 options",
            ));
        }

        let removed = self.options.remove(index);
        if removed.is_correct {
            if let Some(first) = self.options.first_mut() {
                first.is_correct = true;
            }
        }
        Ok(())
    }

    /// Validate the draft and produce the request body.
    pub fn build(&self) -> Result<NewQuestion> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(Error::invalid_input("Question text is required"));
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(Error::invalid_input(
                "A question must have at least 2 options",
            ));
        }
        if self.options.iter().any(|o| o.text.trim().is_empty()) {
            return Err(Error::invalid_input("All options must have text"));
        }
        if !self.options.iter().any(|o| o.is_correct) {
            return Err(Error::invalid_input("At least one option must be correct"));
        }

        Ok(NewQuestion {
            text: text.to_string(),
            topic_id: self.topic_id,
            image_path: non_blank(&self.image_url),
            lecture_reference: non_blank(&self.lecture_reference),
            options: self
                .options
                .iter()
                .map(|o| NewOption {
                    text: o.text.trim().to_string(),
                    is_correct: o.is_correct,
                    explanation: non_blank(&o.explanation),
                })
                .collect(),
        })
    }

    fn option_mut(&mut self, index: usize) -> Result<&mut DraftOption> {
        let len = self.options.len();
        self.options
            .get_mut(index)
            .ok_or_else(|| Error::invalid_input(format!("No option {} (have {})", index, len)))
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
