//! Repository for review forms and their questions

use reviewduck_core::{QuestionId, ReviewForm, ReviewFormId};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::error::{Error, Result};
use crate::models::{QuestionRow, ReviewFormRow};

/// Repository for review form records.
///
/// Works on a borrowed connection so callers can run it inside a transaction.
pub struct ReviewFormRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ReviewFormRepository<'c> {
    /// Create a new repository over `conn`
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a new form with its questions and return the stored version
    pub async fn insert(&mut self, form: &ReviewForm) -> Result<ReviewForm> {
        let result = sqlx::query(
            "INSERT INTO review_forms (code, title, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(form.code())
        .bind(form.title())
        .bind(form.created_at())
        .bind(form.updated_at())
        .execute(&mut *self.conn)
        .await?;

        let id = ReviewFormId(result.last_insert_rowid());

        for question in form.questions() {
            sqlx::query("INSERT INTO questions (review_form_id, value, position) VALUES (?, ?, ?)")
                .bind(id.get())
                .bind(question.value())
                .bind(question.position())
                .execute(&mut *self.conn)
                .await?;
        }

        self.get_by_id(id).await
    }

    /// Write back title and question set of a stored form.
    ///
    /// Questions that are no longer part of the form are deleted, retained
    /// ones are rewritten in place, and new ones are inserted.
    pub async fn update(&mut self, form: &ReviewForm) -> Result<ReviewForm> {
        let id = form
            .id()
            .ok_or_else(|| Error::validation("Cannot update a review form that was never saved"))?;

        let affected = sqlx::query("UPDATE review_forms SET title = ?, updated_at = ? WHERE id = ?")
            .bind(form.title())
            .bind(form.updated_at())
            .bind(id.get())
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(Error::not_found("review form does not exist"));
        }

        let kept: Vec<i64> = form
            .questions()
            .iter()
            .filter_map(|q| q.id())
            .map(QuestionId::get)
            .collect();

        let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM questions WHERE review_form_id = ");
        delete.push_bind(id.get());
        if !kept.is_empty() {
            delete.push(" AND id NOT IN (");
            let mut separated = delete.separated(", ");
            for question_id in &kept {
                separated.push_bind(*question_id);
            }
            separated.push_unseparated(")");
        }
        delete.build().execute(&mut *self.conn).await?;

        for question in form.questions() {
            match question.id() {
                Some(question_id) => {
                    sqlx::query(
                        "UPDATE questions SET value = ?, position = ? WHERE id = ? AND review_form_id = ?",
                    )
                    .bind(question.value())
                    .bind(question.position())
                    .bind(question_id.get())
                    .bind(id.get())
                    .execute(&mut *self.conn)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO questions (review_form_id, value, position) VALUES (?, ?, ?)",
                    )
                    .bind(id.get())
                    .bind(question.value())
                    .bind(question.position())
                    .execute(&mut *self.conn)
                    .await?;
                }
            }
        }

        self.get_by_id(id).await
    }

    /// Find a form by its id
    pub async fn find_by_id(&mut self, id: ReviewFormId) -> Result<Option<ReviewForm>> {
        let row = sqlx::query_as::<_, ReviewFormRow>("SELECT * FROM review_forms WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *self.conn)
            .await?;

        self.with_questions(row).await
    }

    /// Find a form by its share code
    pub async fn find_by_code(&mut self, code: &str) -> Result<Option<ReviewForm>> {
        let row = sqlx::query_as::<_, ReviewFormRow>("SELECT * FROM review_forms WHERE code = ?")
            .bind(code)
            .fetch_optional(&mut *self.conn)
            .await?;

        self.with_questions(row).await
    }

    /// Delete a form; its questions and reviews go with it.
    ///
    /// Returns whether a row was deleted.
    pub async fn delete_by_id(&mut self, id: ReviewFormId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM review_forms WHERE id = ?")
            .bind(id.get())
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The form a question belongs to, or `None` if no such question exists
    pub async fn find_question_form(&mut self, question_id: QuestionId) -> Result<Option<ReviewFormId>> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT review_form_id FROM questions WHERE id = ?")
            .bind(question_id.get())
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.map(|(form_id,)| ReviewFormId(form_id)))
    }

    /// Number of answers recorded against any of `question_ids`
    pub async fn count_answers_for_questions(&mut self, question_ids: &[QuestionId]) -> Result<i64> {
        if question_ids.is_empty() {
            return Ok(0);
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM question_answers WHERE question_id IN (");
        let mut separated = query.separated(", ");
        for question_id in question_ids {
            separated.push_bind(question_id.get());
        }
        separated.push_unseparated(")");

        let (count,): (i64,) = query.build_query_as::<(i64,)>().fetch_one(&mut *self.conn).await?;
        Ok(count)
    }

    /// Number of reviews written against a form
    pub async fn count_reviews(&mut self, id: ReviewFormId) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE review_form_id = ?")
                .bind(id.get())
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(count)
    }

    async fn get_by_id(&mut self, id: ReviewFormId) -> Result<ReviewForm> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("review form does not exist"))
    }

    async fn with_questions(&mut self, row: Option<ReviewFormRow>) -> Result<Option<ReviewForm>> {
        let Some(row) = row else {
            return Ok(None);
        };

        let questions = sqlx::query_as::<_, QuestionRow>(
            "SELECT * FROM questions WHERE review_form_id = ? ORDER BY position ASC",
        )
        .bind(row.id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(Some(row.into_review_form(questions)))
    }
}
