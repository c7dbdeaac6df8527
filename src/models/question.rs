// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A single multiple-choice question from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_correct_answer))]
pub struct Question {
    /// Unique positive identifier.
    #[validate(range(min = 1))]
    pub id: u32,

    /// The prompt shown to the learner.
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    /// Answer choices. The index into this list is the selection key.
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// Index of the correct entry in `options`.
    pub correct_answer: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Topic label such as "RDS" or "Aurora".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Question {
    /// Display text of the option at `index`, if the index is in range.
    pub fn option_text(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    pub fn is_correct(&self, index: i64) -> bool {
        usize::try_from(index).is_ok_and(|i| i == self.correct_answer)
    }

    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("at_least_two_options"));
    }
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_correct_answer(question: &Question) -> Result<(), validator::ValidationError> {
    if question.correct_answer >= question.options.len() {
        return Err(validator::ValidationError::new("correct_answer_out_of_range"));
    }
    Ok(())
}
