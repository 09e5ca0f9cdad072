//! Repository for reviews and their answers

use std::collections::HashMap;

use reviewduck_core::{Review, ReviewFormId, ReviewId};
use sqlx::SqliteConnection;

use crate::error::{Error, Result};
use crate::models::{QuestionAnswerRow, ReviewRow};

const QUESTION_ANSWER_COLUMNS: &str = "qa.id, qa.review_id, qa.question_id, qa.position, \
     a.id AS answer_id, a.value AS answer_value";

/// Repository for review records.
///
/// Works on a borrowed connection so callers can run it inside a transaction.
pub struct ReviewRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ReviewRepository<'c> {
    /// Create a new repository over `conn`
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a new review with all of its answers and return the stored version.
    ///
    /// The review must have been written against a stored form.
    pub async fn insert(&mut self, review: &Review) -> Result<Review> {
        let review_form_id = review
            .review_form_id()
            .ok_or_else(|| Error::validation("Cannot save a review of a review form that was never saved"))?;
        let question_ids = review
            .question_answers()
            .iter()
            .map(|qa| {
                qa.question_id()
                    .ok_or_else(|| Error::validation("Cannot save an answer to a question that was never saved"))
            })
            .collect::<Result<Vec<_>>>()?;

        let result = sqlx::query(
            "INSERT INTO reviews (review_form_id, nickname, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(review_form_id.get())
        .bind(review.nickname())
        .bind(review.created_at())
        .bind(review.updated_at())
        .execute(&mut *self.conn)
        .await?;

        let id = ReviewId(result.last_insert_rowid());

        for (question_answer, question_id) in review.question_answers().iter().zip(question_ids) {
            let result = sqlx::query(
                "INSERT INTO question_answers (review_id, question_id, position) VALUES (?, ?, ?)",
            )
            .bind(id.get())
            .bind(question_id.get())
            .bind(question_answer.position())
            .execute(&mut *self.conn)
            .await?;

            sqlx::query("INSERT INTO answers (question_answer_id, value) VALUES (?, ?)")
                .bind(result.last_insert_rowid())
                .bind(question_answer.answer().value())
                .execute(&mut *self.conn)
                .await?;
        }

        self.get_by_id(id).await
    }

    /// Write back nickname and answers of a stored review
    pub async fn update(&mut self, review: &Review) -> Result<Review> {
        let id = review
            .id()
            .ok_or_else(|| Error::validation("Cannot update a review that was never saved"))?;

        let affected = sqlx::query("UPDATE reviews SET nickname = ?, updated_at = ? WHERE id = ?")
            .bind(review.nickname())
            .bind(review.updated_at())
            .bind(id.get())
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(Error::not_found("review does not exist"));
        }

        for question_answer in review.question_answers() {
            let question_answer_id = question_answer
                .id()
                .ok_or_else(|| Error::validation("Cannot update an answer that was never saved"))?;
            sqlx::query("UPDATE answers SET value = ? WHERE question_answer_id = ?")
                .bind(question_answer.answer().value())
                .bind(question_answer_id.get())
                .execute(&mut *self.conn)
                .await?;
        }

        self.get_by_id(id).await
    }

    /// Find a review by its id
    pub async fn find_by_id(&mut self, id: ReviewId) -> Result<Option<Review>> {
        let Some(row) = sqlx::query_as::<_, ReviewRow>("SELECT * FROM reviews WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *self.conn)
            .await?
        else {
            return Ok(None);
        };

        let question_answers = sqlx::query_as::<_, QuestionAnswerRow>(&format!(
            "SELECT {QUESTION_ANSWER_COLUMNS}
             FROM question_answers qa
             INNER JOIN answers a ON a.question_answer_id = qa.id
             WHERE qa.review_id = ?
             ORDER BY qa.position ASC"
        ))
        .bind(row.id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(Some(row.into_review(question_answers)))
    }

    /// All reviews written against a form, oldest first
    pub async fn find_all_by_review_form(&mut self, review_form_id: ReviewFormId) -> Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT * FROM reviews WHERE review_form_id = ? ORDER BY id ASC",
        )
        .bind(review_form_id.get())
        .fetch_all(&mut *self.conn)
        .await?;

        let answer_rows = sqlx::query_as::<_, QuestionAnswerRow>(&format!(
            "SELECT {QUESTION_ANSWER_COLUMNS}
             FROM question_answers qa
             INNER JOIN answers a ON a.question_answer_id = qa.id
             INNER JOIN reviews r ON r.id = qa.review_id
             WHERE r.review_form_id = ?
             ORDER BY qa.review_id ASC, qa.position ASC"
        ))
        .bind(review_form_id.get())
        .fetch_all(&mut *self.conn)
        .await?;

        let mut by_review: HashMap<i64, Vec<QuestionAnswerRow>> = HashMap::new();
        for answer_row in answer_rows {
            by_review.entry(answer_row.review_id).or_default().push(answer_row);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let question_answers = by_review.remove(&row.id).unwrap_or_default();
                row.into_review(question_answers)
            })
            .collect())
    }

    /// Delete a review; its answers go with it.
    ///
    /// Returns whether a row was deleted.
    pub async fn delete_by_id(&mut self, id: ReviewId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.get())
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&mut self, id: ReviewId) -> Result<Review> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("review does not exist"))
    }
}
