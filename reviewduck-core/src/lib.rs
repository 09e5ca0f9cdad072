//! Reviewduck Core - domain model for shared review forms
//!
//! A facilitator publishes a review form (a title and an ordered list of
//! questions) under a short code; respondents answer it with a nickname and
//! one answer per question. This crate holds the entities and the rules that
//! keep answers tied to the questions of the right form. Persistence lives in
//! `reviewduck-db`.

pub mod code;
pub mod config;
pub mod domain;
pub mod error;
pub mod id;

pub use code::{generate_code, CODE_LENGTH};
pub use config::Config;
pub use domain::{
    Answer, AnswerPair, Question, QuestionAnswer, QuestionUpdate, Review, ReviewForm,
};
pub use error::{Error, Result};
pub use id::{AnswerId, QuestionAnswerId, QuestionId, ReviewFormId, ReviewId};
