//! Review operations

use reviewduck_core::{AnswerPair, Review, ReviewForm, ReviewId};
use serde::Serialize;
use tracing::{debug, info};

use super::{ensure_questions_exist, load_form_by_code};
use crate::error::{Error, Result};
use crate::repos::{ReviewFormRepository, ReviewRepository};
use crate::Database;

/// A form together with every review written against it
#[derive(Debug, Clone, Serialize)]
pub struct FormReviews {
    pub form: ReviewForm,
    pub reviews: Vec<Review>,
}

/// Submits, lists, edits and deletes reviews
#[derive(Clone)]
pub struct ReviewService {
    db: Database,
}

impl ReviewService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Submit a review against the form behind `code`
    pub async fn save(
        &self,
        code: &str,
        nickname: impl Into<String>,
        pairs: Vec<AnswerPair>,
    ) -> Result<Review> {
        let mut tx = self.db.pool().begin().await?;
        let form = load_form_by_code(&mut tx, code).await?;
        ensure_questions_exist(&mut tx, &pairs).await?;

        let review = Review::from_pairs(nickname, &form, pairs)?;
        let saved = ReviewRepository::new(&mut tx).insert(&review).await?;
        tx.commit().await?;

        info!(
            code,
            review_id = ?saved.id(),
            answers = saved.question_answers().len(),
            "Saved review"
        );
        Ok(saved)
    }

    /// Every review of the form behind `code`; none at all is not an error
    pub async fn find_all_by_code(&self, code: &str) -> Result<FormReviews> {
        let mut tx = self.db.pool().begin().await?;
        let form = load_form_by_code(&mut tx, code).await?;
        let id = form
            .id()
            .ok_or_else(|| Error::not_found("review form does not exist"))?;
        let reviews = ReviewRepository::new(&mut tx)
            .find_all_by_review_form(id)
            .await?;
        tx.commit().await?;

        debug!(code, count = reviews.len(), "Found reviews");
        Ok(FormReviews { form, reviews })
    }

    /// Look up a single review
    pub async fn find_by_id(&self, id: ReviewId) -> Result<Review> {
        let mut tx = self.db.pool().begin().await?;
        let review = ReviewRepository::new(&mut tx)
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("review does not exist"))?;
        tx.commit().await?;
        Ok(review)
    }

    /// Replace a review's nickname and answers
    pub async fn update(
        &self,
        id: ReviewId,
        nickname: impl Into<String>,
        pairs: Vec<AnswerPair>,
    ) -> Result<Review> {
        let mut tx = self.db.pool().begin().await?;
        let mut review = ReviewRepository::new(&mut tx)
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("review does not exist"))?;
        let form_id = review
            .review_form_id()
            .ok_or_else(|| Error::not_found("review form does not exist"))?;
        let form = ReviewFormRepository::new(&mut tx)
            .find_by_id(form_id)
            .await?
            .ok_or_else(|| Error::not_found("review form does not exist"))?;
        ensure_questions_exist(&mut tx, &pairs).await?;

        review.update(nickname, &form, pairs)?;
        let updated = ReviewRepository::new(&mut tx).update(&review).await?;
        tx.commit().await?;

        info!(review_id = %id, "Updated review");
        Ok(updated)
    }

    /// Delete a review and its answers
    pub async fn delete(&self, id: ReviewId) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        if !ReviewRepository::new(&mut tx).delete_by_id(id).await? {
            return Err(Error::not_found("review does not exist"));
        }
        tx.commit().await?;

        info!(review_id = %id, "Deleted review");
        Ok(())
    }
}
