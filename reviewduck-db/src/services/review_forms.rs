//! Review form operations

use reviewduck_core::config::CodeSettings;
use reviewduck_core::{generate_code, QuestionUpdate, ReviewForm};
use tracing::{debug, info, warn};

use super::load_form_by_code;
use crate::error::{Error, Result};
use crate::repos::ReviewFormRepository;
use crate::Database;

/// Creates, looks up, edits and deletes review forms
#[derive(Clone)]
pub struct ReviewFormService {
    db: Database,
    max_code_attempts: u32,
    code_generator: fn() -> String,
}

impl ReviewFormService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            max_code_attempts: CodeSettings::default().max_attempts,
            code_generator: generate_code,
        }
    }

    /// Use `generator` instead of random codes for new forms
    pub fn with_code_generator(mut self, generator: fn() -> String) -> Self {
        self.code_generator = generator;
        self
    }

    /// How many codes to try before giving up when codes keep colliding
    pub fn with_max_code_attempts(mut self, attempts: u32) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Store a new form and return it with its code and question ids
    pub async fn save<I, S>(&self, title: impl Into<String>, questions: I) -> Result<ReviewForm>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut form = ReviewForm::new(title, questions)?;

        for attempt in 1..=self.max_code_attempts {
            form.reissue_code((self.code_generator)());
            let mut tx = self.db.pool().begin().await?;
            let inserted = ReviewFormRepository::new(&mut tx).insert(&form).await;
            match inserted {
                Ok(saved) => {
                    tx.commit().await?;
                    info!(
                        code = %saved.code(),
                        questions = saved.questions().len(),
                        "Created review form"
                    );
                    return Ok(saved);
                }
                Err(e) if e.is_unique_violation() => {
                    warn!(attempt, code = %form.code(), "Review form code already taken, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::CodeExhausted(self.max_code_attempts))
    }

    /// Look up a form by its share code
    pub async fn find_by_code(&self, code: &str) -> Result<ReviewForm> {
        debug!(code, "Finding review form");
        let mut tx = self.db.pool().begin().await?;
        let form = load_form_by_code(&mut tx, code).await?;
        tx.commit().await?;
        Ok(form)
    }

    /// Replace a form's title and question set.
    ///
    /// Named questions must exist and belong to this form. Once a form has
    /// reviews its question set is fixed: dropping an answered question or
    /// adding a new one is refused.
    pub async fn update(
        &self,
        code: &str,
        title: impl Into<String>,
        updates: Vec<QuestionUpdate>,
    ) -> Result<ReviewForm> {
        let mut tx = self.db.pool().begin().await?;
        let mut form = load_form_by_code(&mut tx, code).await?;
        let mut repo = ReviewFormRepository::new(&mut tx);

        for question_id in updates.iter().filter_map(|u| u.id) {
            match repo.find_question_form(question_id).await? {
                None => return Err(Error::not_found("question does not exist")),
                Some(owner) if Some(owner) != form.id() => {
                    return Err(Error::validation("question not included in review form"))
                }
                Some(_) => {}
            }
        }

        let removed = form.removed_by(&updates);
        if repo.count_answers_for_questions(&removed).await? > 0 {
            return Err(Error::validation(
                "cannot remove a question that already has answers",
            ));
        }

        if updates.iter().any(|u| u.id.is_none()) {
            let id = form
                .id()
                .ok_or_else(|| Error::not_found("review form does not exist"))?;
            if repo.count_reviews(id).await? > 0 {
                return Err(Error::validation(
                    "cannot add a question to a review form that already has reviews",
                ));
            }
        }

        form.update(title, updates)?;
        let updated = repo.update(&form).await?;
        tx.commit().await?;

        info!(
            code,
            questions = updated.questions().len(),
            removed = removed.len(),
            "Updated review form"
        );
        Ok(updated)
    }

    /// Delete a form together with its questions and every review of it
    pub async fn delete(&self, code: &str) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        let form = load_form_by_code(&mut tx, code).await?;
        let id = form
            .id()
            .ok_or_else(|| Error::not_found("review form does not exist"))?;

        if !ReviewFormRepository::new(&mut tx).delete_by_id(id).await? {
            return Err(Error::not_found("review form does not exist"));
        }
        tx.commit().await?;

        info!(code, "Deleted review form");
        Ok(())
    }
}
