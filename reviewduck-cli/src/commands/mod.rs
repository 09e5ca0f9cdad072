//! CLI command implementations

pub mod form;
pub mod review;

pub use form::FormArgs;
pub use review::ReviewArgs;

use reviewduck_core::{Review, ReviewForm};
use serde::Serialize;

/// Print `value` as pretty JSON
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_form(form: &ReviewForm) {
    println!("{} [{}]", form.title(), form.code());
    for question in form.questions() {
        let id = question
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {}. (#{}) {}", question.position() + 1, id, question.value());
    }
}

fn print_review(review: &Review, form: Option<&ReviewForm>) {
    let id = review
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("Review #{} by {}", id, review.nickname());
    for qa in review.question_answers() {
        let question = match (form, qa.question_id()) {
            (Some(form), Some(question_id)) => form
                .question(question_id)
                .map(|q| q.value().to_string())
                .unwrap_or_else(|| format!("question #{}", question_id)),
            (None, Some(question_id)) => format!("question #{}", question_id),
            (_, None) => format!("question {}", qa.position() + 1),
        };
        println!("  Q: {}", question);
        println!("  A: {}", qa.answer().value());
    }
}
