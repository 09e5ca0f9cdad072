//! Transactional services over the repositories
//!
//! Every public operation opens one transaction, commits it on success and
//! lets it roll back on drop for every error path.

pub mod review_forms;
pub mod reviews;

use reviewduck_core::{AnswerPair, ReviewForm};
use sqlx::SqliteConnection;

use crate::error::{Error, Result};
use crate::repos::ReviewFormRepository;

pub use review_forms::ReviewFormService;
pub use reviews::{FormReviews, ReviewService};

async fn load_form_by_code(conn: &mut SqliteConnection, code: &str) -> Result<ReviewForm> {
    ReviewFormRepository::new(conn)
        .find_by_code(code)
        .await?
        .ok_or_else(|| Error::not_found("review form does not exist"))
}

/// Fail with NotFound for the first pair whose question is unknown to the store
async fn ensure_questions_exist(conn: &mut SqliteConnection, pairs: &[AnswerPair]) -> Result<()> {
    let mut repo = ReviewFormRepository::new(conn);
    for pair in pairs {
        if repo.find_question_form(pair.question_id).await?.is_none() {
            return Err(Error::not_found("question does not exist"));
        }
    }
    Ok(())
}
