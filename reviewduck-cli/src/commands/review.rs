//! Review commands

use clap::{Args, Subcommand};
use reviewduck_core::{AnswerPair, QuestionId, ReviewId};
use reviewduck_db::ReviewService;

use super::{print_json, print_review};

/// Review management commands
#[derive(Args, Debug)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    /// Submit a review against a form
    Submit {
        /// Share code of the form
        code: String,

        /// Respondent nickname
        #[arg(short, long)]
        nickname: String,

        /// Answer as `QUESTION_ID=text` (repeat for each question)
        #[arg(short, long = "answer", required = true, value_parser = parse_answer)]
        answers: Vec<AnswerPair>,
    },

    /// List every review of a form
    List {
        /// Share code of the form
        code: String,
    },

    /// Show a single review
    Show {
        /// Review id
        id: i64,
    },

    /// Replace a review's nickname and answers
    Edit {
        /// Review id
        id: i64,

        /// Respondent nickname
        #[arg(short, long)]
        nickname: String,

        /// Answer as `QUESTION_ID=text` (repeat for each question)
        #[arg(short, long = "answer", required = true, value_parser = parse_answer)]
        answers: Vec<AnswerPair>,
    },

    /// Delete a review
    Delete {
        /// Review id
        id: i64,
    },
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, service: &ReviewService, json: bool) -> anyhow::Result<()> {
        match &self.command {
            ReviewCommand::Submit {
                code,
                nickname,
                answers,
            } => {
                let review = service
                    .save(code, nickname.as_str(), answers.clone())
                    .await?;
                if json {
                    return print_json(&review);
                }
                println!(
                    "Saved review #{}",
                    review.id().map(|id| id.to_string()).unwrap_or_default()
                );
            }
            ReviewCommand::List { code } => {
                let found = service.find_all_by_code(code).await?;
                if json {
                    return print_json(&found);
                }
                println!("{} [{}]", found.form.title(), found.form.code());
                println!();
                if found.reviews.is_empty() {
                    println!("No reviews yet.");
                }
                for review in &found.reviews {
                    print_review(review, Some(&found.form));
                    println!();
                }
            }
            ReviewCommand::Show { id } => {
                let review = service.find_by_id(ReviewId(*id)).await?;
                if json {
                    return print_json(&review);
                }
                print_review(&review, None);
            }
            ReviewCommand::Edit {
                id,
                nickname,
                answers,
            } => {
                let review = service
                    .update(ReviewId(*id), nickname.as_str(), answers.clone())
                    .await?;
                if json {
                    return print_json(&review);
                }
                println!("Updated review #{}", id);
            }
            ReviewCommand::Delete { id } => {
                service.delete(ReviewId(*id)).await?;
                if !json {
                    println!("Deleted review #{}", id);
                }
            }
        }

        Ok(())
    }
}

/// Parse `QUESTION_ID=text`
fn parse_answer(raw: &str) -> Result<AnswerPair, String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION_ID=answer, got '{}'", raw))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a question id", id))?;
    Ok(AnswerPair::new(QuestionId(id), value))
}
