//! Review form commands

use clap::{Args, Subcommand};
use reviewduck_core::{QuestionId, QuestionUpdate};
use reviewduck_db::ReviewFormService;

use super::{print_form, print_json};

/// Review form management commands
#[derive(Args, Debug)]
pub struct FormArgs {
    #[command(subcommand)]
    pub command: FormCommand,
}

#[derive(Subcommand, Debug)]
pub enum FormCommand {
    /// Create a review form and print its share code
    Create {
        /// Form title
        #[arg(short, long)]
        title: String,

        /// Question text, in order (repeat for each question)
        #[arg(short, long = "question", required = true)]
        questions: Vec<String>,
    },

    /// Show a review form by its code
    Show {
        /// Share code
        code: String,
    },

    /// Replace a form's title and questions
    ///
    /// Each question is either `ID=text` to edit an existing question or
    /// plain `text` to add one. Questions not listed are removed.
    Update {
        /// Share code
        code: String,

        /// New title
        #[arg(short, long)]
        title: String,

        /// Question entry, `ID=text` or `text` (repeat for each question)
        #[arg(short, long = "question", required = true, value_parser = parse_question_update)]
        questions: Vec<QuestionUpdate>,
    },

    /// Delete a review form and every review written against it
    Delete {
        /// Share code
        code: String,
    },
}

impl FormArgs {
    /// Execute the form command
    pub async fn execute(&self, service: &ReviewFormService, json: bool) -> anyhow::Result<()> {
        match &self.command {
            FormCommand::Create { title, questions } => {
                let form = service.save(title.as_str(), questions.iter().cloned()).await?;
                if json {
                    return print_json(&form);
                }
                println!("Created review form {}", form.code());
                println!();
                print_form(&form);
            }
            FormCommand::Show { code } => {
                let form = service.find_by_code(code).await?;
                if json {
                    return print_json(&form);
                }
                print_form(&form);
            }
            FormCommand::Update {
                code,
                title,
                questions,
            } => {
                let form = service
                    .update(code, title.as_str(), questions.clone())
                    .await?;
                if json {
                    return print_json(&form);
                }
                println!("Updated review form {}", form.code());
                println!();
                print_form(&form);
            }
            FormCommand::Delete { code } => {
                service.delete(code).await?;
                if !json {
                    println!("Deleted review form {}", code);
                }
            }
        }

        Ok(())
    }
}

/// Parse `ID=text` into an edit of question `ID`, anything else into a new question
fn parse_question_update(raw: &str) -> Result<QuestionUpdate, String> {
    if let Some((id, value)) = raw.split_once('=') {
        if let Ok(id) = id.trim().parse::<i64>() {
            return Ok(QuestionUpdate::existing(QuestionId(id), value));
        }
    }
    Ok(QuestionUpdate::new_question(raw))
}
