//! Review forms: a titled, ordered set of questions behind a share code

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::question::{validate_question_value, Question};
use crate::code::generate_code;
use crate::id::{QuestionId, ReviewFormId};
use crate::{Error, Result};

/// Maximum number of characters in a form title
pub const MAX_TITLE_LENGTH: usize = 100;

/// Check a form title without building anything
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("review form title must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(Error::validation(format!(
            "review form title must not exceed {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// One entry of a form update.
///
/// `id: Some(_)` edits an existing question of the form, `id: None` adds a
/// new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionUpdate {
    pub id: Option<QuestionId>,
    pub value: String,
}

impl QuestionUpdate {
    pub fn existing(id: QuestionId, value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            value: value.into(),
        }
    }

    pub fn new_question(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }
}

/// A shareable template of questions
#[derive(Debug, Clone, Serialize)]
pub struct ReviewForm {
    id: Option<ReviewFormId>,
    title: String,
    code: String,
    questions: Vec<Question>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReviewForm {
    /// Build an unsaved form with a freshly generated code.
    ///
    /// Questions get positions `0..n` in input order.
    pub fn new<I, S>(title: impl Into<String>, question_values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = title.into();
        validate_title(&title)?;

        let mut questions = question_values
            .into_iter()
            .map(|value| Question::new(value))
            .collect::<Result<Vec<_>>>()?;
        if questions.is_empty() {
            return Err(Error::validation(
                "review form must have at least one question",
            ));
        }
        renumber(&mut questions);

        let now = Utc::now();
        Ok(Self {
            id: None,
            title,
            code: generate_code(),
            questions,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a form loaded from the store. Questions are sorted by position.
    pub fn restore(
        id: ReviewFormId,
        title: String,
        code: String,
        mut questions: Vec<Question>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        questions.sort_by_key(Question::position);
        Self {
            id: Some(id),
            title,
            code,
            questions,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<ReviewFormId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the code of a form that has not been stored yet
    pub fn reissue_code(&mut self, code: impl Into<String>) {
        debug_assert!(self.id.is_none(), "codes are immutable once stored");
        self.code = code.into();
    }

    pub fn contains_question(&self, id: QuestionId) -> bool {
        self.question(id).is_some()
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == Some(id))
    }

    /// Ids of current questions that `updates` would drop
    pub fn removed_by(&self, updates: &[QuestionUpdate]) -> Vec<QuestionId> {
        let kept: HashSet<QuestionId> = updates.iter().filter_map(|u| u.id).collect();
        self.questions
            .iter()
            .filter_map(Question::id)
            .filter(|id| !kept.contains(id))
            .collect()
    }

    /// Replace the title and question set.
    ///
    /// The resulting questions are exactly `updates`, in order: named ids keep
    /// their identity with the new text, unnamed entries become new questions,
    /// and anything not named is dropped. Nothing changes unless every entry
    /// is valid.
    pub fn update(&mut self, title: impl Into<String>, updates: Vec<QuestionUpdate>) -> Result<()> {
        let title = title.into();
        validate_title(&title)?;
        if updates.is_empty() {
            return Err(Error::validation(
                "review form must have at least one question",
            ));
        }

        let mut seen = HashSet::new();
        for update in &updates {
            validate_question_value(&update.value)?;
            if let Some(id) = update.id {
                if !self.contains_question(id) {
                    return Err(Error::validation("question not included in review form"));
                }
                if !seen.insert(id) {
                    return Err(Error::validation("question listed more than once"));
                }
            }
        }

        let mut questions = Vec::with_capacity(updates.len());
        for update in updates {
            let question = match update.id.and_then(|id| self.question(id)) {
                Some(existing) => {
                    let mut question = existing.clone();
                    question.update_value(update.value)?;
                    question
                }
                None => Question::new(update.value)?,
            };
            questions.push(question);
        }
        renumber(&mut questions);

        self.title = title;
        self.questions = questions;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl PartialEq for ReviewForm {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

fn renumber(questions: &mut [Question]) {
    for (position, question) in (0u32..).zip(questions.iter_mut()) {
        question.set_position(position);
    }
}
