//! A single prompt inside a review form

use serde::Serialize;

use crate::id::QuestionId;
use crate::{Error, Result};

/// Maximum number of characters in a question
pub const MAX_QUESTION_LENGTH: usize = 200;

/// Check a question value without building anything
pub fn validate_question_value(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation("question must not be empty"));
    }
    if value.chars().count() > MAX_QUESTION_LENGTH {
        return Err(Error::validation(format!(
            "question must not exceed {} characters",
            MAX_QUESTION_LENGTH
        )));
    }
    Ok(())
}

/// One prompt, ordered by position within its form
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    id: Option<QuestionId>,
    value: String,
    position: u32,
}

impl Question {
    /// Create an unsaved question
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_question_value(&value)?;
        Ok(Self {
            id: None,
            value,
            position: 0,
        })
    }

    /// Rebuild a question loaded from the store
    pub fn restore(id: QuestionId, value: String, position: u32) -> Self {
        Self {
            id: Some(id),
            value,
            position,
        }
    }

    pub fn id(&self) -> Option<QuestionId> {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    /// Replace the prompt text; the old value is kept if the new one is invalid
    pub fn update_value(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        validate_question_value(&value)?;
        self.value = value;
        Ok(())
    }

    pub(crate) fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}
