//! Review forms, their questions, and the reviews written against them
//!
//! Forms own their questions outright. A review refers to its form and to
//! each answered question by id only, so the form stays the single owner.

pub mod question;
pub mod review;
pub mod review_form;

pub use question::{validate_question_value, Question, MAX_QUESTION_LENGTH};
pub use review::{validate_nickname, Answer, AnswerPair, QuestionAnswer, Review};
pub use review_form::{validate_title, QuestionUpdate, ReviewForm, MAX_TITLE_LENGTH};
