//! Row types as stored in SQLite, and their conversion into domain entities

use chrono::{DateTime, Utc};
use reviewduck_core::{
    Answer, AnswerId, Question, QuestionAnswer, QuestionAnswerId, QuestionId, Review,
    ReviewForm, ReviewFormId, ReviewId,
};

/// `review_forms` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewFormRow {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `questions` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub review_form_id: i64,
    pub value: String,
    pub position: u32,
}

/// `reviews` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub review_form_id: i64,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `question_answers` row joined with its `answers` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestionAnswerRow {
    pub id: i64,
    pub review_id: i64,
    pub question_id: i64,
    pub position: u32,
    pub answer_id: i64,
    pub answer_value: String,
}

impl QuestionRow {
    pub fn into_question(self) -> Question {
        Question::restore(QuestionId(self.id), self.value, self.position)
    }
}

impl ReviewFormRow {
    pub fn into_review_form(self, questions: Vec<QuestionRow>) -> ReviewForm {
        ReviewForm::restore(
            ReviewFormId(self.id),
            self.title,
            self.code,
            questions.into_iter().map(QuestionRow::into_question).collect(),
            self.created_at,
            self.updated_at,
        )
    }
}

impl QuestionAnswerRow {
    pub fn into_question_answer(self) -> QuestionAnswer {
        QuestionAnswer::restore(
            QuestionAnswerId(self.id),
            self.position,
            QuestionId(self.question_id),
            Answer::restore(AnswerId(self.answer_id), self.answer_value),
        )
    }
}

impl ReviewRow {
    pub fn into_review(self, question_answers: Vec<QuestionAnswerRow>) -> Review {
        Review::restore(
            ReviewId(self.id),
            ReviewFormId(self.review_form_id),
            self.nickname,
            question_answers
                .into_iter()
                .map(QuestionAnswerRow::into_question_answer)
                .collect(),
            self.created_at,
            self.updated_at,
        )
    }
}
