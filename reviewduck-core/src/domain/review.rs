//! Reviews: one respondent's answers to a review form

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::question::Question;
use super::review_form::ReviewForm;
use crate::id::{AnswerId, QuestionAnswerId, QuestionId, ReviewFormId, ReviewId};
use crate::{Error, Result};

/// Check a nickname without building anything
pub fn validate_nickname(nickname: &str) -> Result<()> {
    if nickname.trim().is_empty() {
        return Err(Error::validation("nickname must not be empty"));
    }
    Ok(())
}

/// An answer as submitted: which question it responds to and what it says
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPair {
    pub question_id: QuestionId,
    pub value: String,
}

impl AnswerPair {
    pub fn new(question_id: QuestionId, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// Free-text response owned by exactly one [`QuestionAnswer`]
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    id: Option<AnswerId>,
    value: String,
}

impl Answer {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }

    pub fn restore(id: AnswerId, value: String) -> Self {
        Self {
            id: Some(id),
            value,
        }
    }

    pub fn id(&self) -> Option<AnswerId> {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl PartialEq for Answer {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

/// Pairs a question of the form (by id) with this review's answer to it.
///
/// `question_id` is `None` while the question itself has not been stored.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionAnswer {
    id: Option<QuestionAnswerId>,
    position: u32,
    question_id: Option<QuestionId>,
    answer: Answer,
}

impl QuestionAnswer {
    fn new(position: u32, question_id: Option<QuestionId>, value: String) -> Self {
        Self {
            id: None,
            position,
            question_id,
            answer: Answer::new(value),
        }
    }

    pub fn restore(
        id: QuestionAnswerId,
        position: u32,
        question_id: QuestionId,
        answer: Answer,
    ) -> Self {
        Self {
            id: Some(id),
            position,
            question_id: Some(question_id),
            answer,
        }
    }

    pub fn id(&self) -> Option<QuestionAnswerId> {
        self.id
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn question_id(&self) -> Option<QuestionId> {
        self.question_id
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    fn replace_answer(&mut self, value: String) {
        self.answer.value = value;
    }
}

impl PartialEq for QuestionAnswer {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

/// A nickname plus one answer per question of a review form
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    review_form_id: Option<ReviewFormId>,
    nickname: String,
    question_answers: Vec<QuestionAnswer>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Review {
    /// Answer every question of `form` in form order.
    ///
    /// The form does not need to be stored yet; ids it lacks stay unset on
    /// the review as well.
    pub fn of<I, S>(nickname: impl Into<String>, form: &ReviewForm, answer_values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nickname = nickname.into();
        validate_nickname(&nickname)?;

        let values: Vec<String> = answer_values.into_iter().map(Into::into).collect();
        ensure_counts_match(values.len(), form)?;

        let entries = form
            .questions()
            .iter()
            .map(Question::id)
            .zip(values);

        Ok(Self::build(nickname, form, entries))
    }

    /// Build a review from explicit `(question, answer)` pairs, kept in the
    /// order given.
    ///
    /// Every question must belong to `form`, each at most once, and every
    /// question of the form must be answered. Whether the ids exist at all is
    /// the caller's concern.
    pub fn from_pairs(
        nickname: impl Into<String>,
        form: &ReviewForm,
        pairs: Vec<AnswerPair>,
    ) -> Result<Self> {
        let nickname = nickname.into();
        validate_nickname(&nickname)?;
        validate_pairs(form, &pairs)?;

        let entries = pairs
            .into_iter()
            .map(|pair| (Some(pair.question_id), pair.value));
        Ok(Self::build(nickname, form, entries))
    }

    fn build<I>(nickname: String, form: &ReviewForm, entries: I) -> Self
    where
        I: IntoIterator<Item = (Option<QuestionId>, String)>,
    {
        let question_answers = (0u32..)
            .zip(entries)
            .map(|(position, (question_id, value))| QuestionAnswer::new(position, question_id, value))
            .collect();

        let now = Utc::now();
        Self {
            id: None,
            review_form_id: form.id(),
            nickname,
            question_answers,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a review loaded from the store. Entries are sorted by position.
    pub fn restore(
        id: ReviewId,
        review_form_id: ReviewFormId,
        nickname: String,
        mut question_answers: Vec<QuestionAnswer>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        question_answers.sort_by_key(QuestionAnswer::position);
        Self {
            id: Some(id),
            review_form_id: Some(review_form_id),
            nickname,
            question_answers,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn review_form_id(&self) -> Option<ReviewFormId> {
        self.review_form_id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn question_answers(&self) -> &[QuestionAnswer] {
        &self.question_answers
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Answer given to `question_id`, if any
    pub fn answer_to(&self, question_id: QuestionId) -> Option<&Answer> {
        self.question_answers
            .iter()
            .find(|qa| qa.question_id == Some(question_id))
            .map(QuestionAnswer::answer)
    }

    /// Replace the nickname and answers.
    ///
    /// Runs the same checks as [`Review::from_pairs`] against the form's
    /// current questions. Entries keep their position and question; only the
    /// answer text changes.
    pub fn update(
        &mut self,
        nickname: impl Into<String>,
        form: &ReviewForm,
        pairs: Vec<AnswerPair>,
    ) -> Result<()> {
        if form.id().is_none() || form.id() != self.review_form_id {
            return Err(Error::validation("review does not belong to this review form"));
        }
        let nickname = nickname.into();
        validate_nickname(&nickname)?;
        validate_pairs(form, &pairs)?;
        if pairs.iter().any(|pair| self.answer_to(pair.question_id).is_none()) {
            return Err(Error::validation("question not answered in this review"));
        }

        for pair in pairs {
            if let Some(existing) = self
                .question_answers
                .iter_mut()
                .find(|qa| qa.question_id == Some(pair.question_id))
            {
                existing.replace_answer(pair.value);
            }
        }

        self.nickname = nickname;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

fn validate_pairs(form: &ReviewForm, pairs: &[AnswerPair]) -> Result<()> {
    let mut seen = HashSet::new();
    for pair in pairs {
        if !form.contains_question(pair.question_id) {
            return Err(Error::validation("question not included in review form"));
        }
        if !seen.insert(pair.question_id) {
            return Err(Error::validation("question answered more than once"));
        }
    }
    ensure_counts_match(pairs.len(), form)
}

fn ensure_counts_match(answers: usize, form: &ReviewForm) -> Result<()> {
    if answers != form.questions().len() {
        return Err(Error::validation("question and answer counts must match"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(id: i64, question_ids: &[i64]) -> ReviewForm {
        let now = Utc::now();
        let questions = (0u32..)
            .zip(question_ids)
            .map(|(position, qid)| {
                Question::restore(QuestionId(*qid), format!("question{}", qid), position)
            })
            .collect();
        ReviewForm::restore(
            ReviewFormId(id),
            "title".into(),
            "abcd1234".into(),
            questions,
            now,
            now,
        )
    }

    #[test]
    fn test_create_review() {
        let form = form_with(1, &[1]);
        assert!(Review::of("제이슨", &form, ["answer"]).is_ok());
    }

    #[test]
    fn test_blank_nickname_rejected() {
        let form = form_with(1, &[1]);
        for nickname in ["", "  "] {
            let err = Review::of(nickname, &form, ["answer"]).unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains("nickname must not be empty"));
        }
    }

    #[test]
    fn test_answer_count_must_match() {
        let form = form_with(1, &[1]);
        let err = Review::of("제이슨", &form, ["answer1", "answer2"]).unwrap_err();
        assert!(err.to_string().contains("question and answer counts must match"));

        assert!(Review::of("제이슨", &form, Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_of_pairs_by_position() {
        let form = form_with(1, &[7, 8, 9]);
        let review = Review::of("nick", &form, ["a", "b", "c"]).unwrap();

        for (i, qa) in review.question_answers().iter().enumerate() {
            assert_eq!(qa.position() as usize, i);
            assert_eq!(qa.question_id(), form.questions()[i].id());
        }
        assert_eq!(review.question_answers()[1].answer().value(), "b");
        assert_eq!(review.review_form_id(), Some(ReviewFormId(1)));
    }

    #[test]
    fn test_of_unsaved_form() {
        let form = ReviewForm::new("title", ["question"]).unwrap();
        let review = Review::of("제이슨", &form, ["answer"]).unwrap();

        assert_eq!(review.review_form_id(), None);
        assert_eq!(review.question_answers().len(), 1);
        assert_eq!(review.question_answers()[0].question_id(), None);
        assert_eq!(review.question_answers()[0].answer().value(), "answer");

        let err = Review::of("제이슨", &form, ["answer1", "answer2"]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_pairs_keeps_request_order() {
        let form = form_with(1, &[1, 2]);
        let review = Review::from_pairs(
            "nick",
            &form,
            vec![AnswerPair::new(QuestionId(2), "second"), AnswerPair::new(QuestionId(1), "first")],
        )
        .unwrap();

        let qa = &review.question_answers()[0];
        assert_eq!(qa.question_id(), Some(QuestionId(2)));
        assert_eq!(qa.position(), 0);
        assert_eq!(review.answer_to(QuestionId(1)).unwrap().value(), "first");
    }

    #[test]
    fn test_from_pairs_rejects_foreign_question() {
        let form = form_with(1, &[1, 2]);
        let err = Review::from_pairs(
            "nick",
            &form,
            vec![AnswerPair::new(QuestionId(1), "a"), AnswerPair::new(QuestionId(3), "b")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("question not included in review form"));
    }

    #[test]
    fn test_from_pairs_rejects_duplicates_and_missing() {
        let form = form_with(1, &[1, 2]);
        assert!(Review::from_pairs(
            "nick",
            &form,
            vec![AnswerPair::new(QuestionId(1), "a"), AnswerPair::new(QuestionId(1), "b")],
        )
        .is_err());
        assert!(
            Review::from_pairs("nick", &form, vec![AnswerPair::new(QuestionId(1), "a")]).is_err()
        );
    }

    #[test]
    fn test_update_replaces_answers_in_place() {
        let form = form_with(1, &[1, 2]);
        let mut review = Review::of("nick", &form, ["a", "b"]).unwrap();
        let edit = vec![
            AnswerPair::new(QuestionId(2), "edited b"),
            AnswerPair::new(QuestionId(1), "edited a"),
        ];

        review.update("new nick", &form, edit.clone()).unwrap();
        review.update("new nick", &form, edit).unwrap();

        assert_eq!(review.nickname(), "new nick");
        assert_eq!(review.question_answers().len(), 2);
        assert_eq!(review.question_answers()[0].question_id(), Some(QuestionId(1)));
        assert_eq!(review.question_answers()[0].answer().value(), "edited a");
        assert_eq!(review.question_answers()[1].answer().value(), "edited b");
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        let form = form_with(1, &[1, 2]);
        let mut review = Review::of("nick", &form, ["a", "b"]).unwrap();

        let result = review.update(
            "other",
            &form,
            vec![AnswerPair::new(QuestionId(1), "x"), AnswerPair::new(QuestionId(5), "y")],
        );

        assert!(result.is_err());
        assert_eq!(review.nickname(), "nick");
        assert_eq!(review.question_answers()[0].answer().value(), "a");
    }

    #[test]
    fn test_update_rejects_question_missing_from_review() {
        let mut review = Review::of("nick", &form_with(1, &[1]), ["a"]).unwrap();
        let grown = form_with(1, &[1, 2]);

        let err = review
            .update(
                "other",
                &grown,
                vec![AnswerPair::new(QuestionId(1), "x"), AnswerPair::new(QuestionId(2), "y")],
            )
            .unwrap_err();

        assert!(err.to_string().contains("question not answered in this review"));
        assert_eq!(review.nickname(), "nick");
        assert_eq!(review.question_answers().len(), 1);
        assert_eq!(review.question_answers()[0].answer().value(), "a");
    }

    #[test]
    fn test_update_against_other_form_rejected() {
        let mut review = Review::of("nick", &form_with(1, &[1]), ["a"]).unwrap();
        let other = form_with(2, &[1]);
        assert!(review
            .update("nick", &other, vec![AnswerPair::new(QuestionId(1), "b")])
            .is_err());
    }
}
