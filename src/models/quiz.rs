// src/models/quiz.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Body of `POST /quiz/submit`.
///
/// Accepts both the keyed shape (`{"1": 2}`) and the list shape
/// (`[{"questionId": 1, "selectedAnswer": 2}]`).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    /// Free-form label supplied by the client.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub user_id: Option<String>,

    #[schema(value_type = Object)]
    pub answers: SubmittedAnswers,

    /// Milliseconds spent on the attempt.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub time_spent: i64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswers {
    /// Question id (as a JSON object key) to selected option index.
    ByQuestion(BTreeMap<String, i64>),
    List(Vec<AnswerEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: u32,
    /// `null` or missing means the question was left unanswered.
    #[serde(default)]
    pub selected_answer: Option<i64>,
}

/// A learner's answers for one attempt, keyed by question id.
///
/// Unanswered questions are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub answers: BTreeMap<u32, i64>,
    pub time_spent: u64,
}

impl Submission {
    pub fn new(answers: impl IntoIterator<Item = (u32, i64)>, time_spent: u64) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            time_spent,
        }
    }
}

impl SubmitQuizRequest {
    /// Normalizes either wire shape into a [`Submission`].
    ///
    /// Keys that do not parse as question ids, or that spell the same id twice
    /// (`"1"` and `"01"`), make the whole request invalid. In the list shape a repeated question id keeps the last answer.
    pub fn into_submission(self) -> Result<(Option<String>, Submission), AppError> {
        let answers = match self.answers {
            SubmittedAnswers::ByQuestion(map) => {
                let mut answers = BTreeMap::new();
                for (key, answer) in map {
                    let id = key
                        .trim()
                        .parse::<u32>()
                        .map_err(|_| AppError::BadRequest(format!("Invalid question id: {key}")))?;
                    if answers.insert(id, answer).is_some() {
                        return Err(AppError::BadRequest(format!(
                            "Question {id} is answered more than once"
                        )));
                    }
                }
                answers
            }
            SubmittedAnswers::List(entries) => entries
                .into_iter()
                .filter_map(|e| e.selected_answer.map(|answer| (e.question_id, answer)))
                .collect(),
        };

        let time_spent = u64::try_from(self.time_spent)
            .map_err(|_| AppError::ValidationError("timeSpent must be non-negative".to_string()))?;

        let user_id = self.user_id.filter(|u| !u.trim().is_empty());

        Ok((user_id, Submission { answers, time_spent }))
    }
}

/// Outcome for a single answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub question_id: u32,
    pub user_answer: i64,
    pub correct_answer: usize,
    pub is_correct: bool,
    /// Prompt text of the question.
    pub question: String,
    /// Absent when `user_answer` is not a valid option index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
    pub correct_option: String,
}

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90..=u8::MAX => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// Computed outcome of scoring a [`Submission`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u8,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub grade: Grade,
    pub time_spent: u64,
    pub answers: Vec<AnswerDetail>,
}

/// A scorecard kept by the result store.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub scorecard: Scorecard,
    pub created_at: DateTime<Utc>,
}

/// Response data for a submission; `resultId` duplicates `id` for clients
/// that only keep the handle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub result_id: u64,
    #[serde(flatten)]
    pub result: QuizResult,
}

/// Aggregates over all stored results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_submissions: usize,
    pub average_score: f64,
    pub average_percentage: f64,
    /// Milliseconds.
    pub average_time: f64,
    pub highest_score: u32,
    pub lowest_score: u32,
}

impl QuizStats {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a QuizResult>) -> Self {
        let mut stats = QuizStats::default();
        let (mut score_sum, mut percentage_sum, mut time_sum) = (0u64, 0u64, 0u64);
        let mut lowest = u32::MAX;

        for result in results {
            let card = &result.scorecard;
            stats.total_submissions += 1;
            score_sum += u64::from(card.score);
            percentage_sum += u64::from(card.percentage);
            time_sum = time_sum.saturating_add(card.time_spent);
            stats.highest_score = stats.highest_score.max(card.score);
            lowest = lowest.min(card.score);
        }

        if stats.total_submissions > 0 {
            let n = stats.total_submissions as f64;
            stats.average_score = score_sum as f64 / n;
            stats.average_percentage = percentage_sum as f64 / n;
            stats.average_time = time_sum as f64 / n;
            stats.lowest_score = lowest;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> SubmitQuizRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn keyed_and_list_shapes_normalize_the_same() {
        let keyed = request(json!({ "answers": { "2": 1, "1": 0 }, "timeSpent": 1500 }));
        let list = request(json!({
            "answers": [
                { "questionId": 1, "selectedAnswer": 0 },
                { "questionId": 2, "selectedAnswer": 1 }
            ],
            "timeSpent": 1500
        }));

        let (_, a) = keyed.into_submission().unwrap();
        let (_, b) = list.into_submission().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Submission::new([(1, 0), (2, 1)], 1500));
    }

    #[test]
    fn null_selection_is_unanswered() {
        let req = request(json!({
            "userId": "learner-7",
            "answers": [
                { "questionId": 1, "selectedAnswer": null },
                { "questionId": 2 },
                { "questionId": 3, "selectedAnswer": -1 }
            ]
        }));
        let (user, submission) = req.into_submission().unwrap();
        assert_eq!(user.as_deref(), Some("learner-7"));
        assert_eq!(submission.answers, BTreeMap::from([(3, -1)]));
        assert_eq!(submission.time_spent, 0);
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let req = request(json!({ "answers": { "abc": 1 }, "timeSpent": 10 }));
        assert!(matches!(req.into_submission(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn same_id_spelled_twice_is_rejected() {
        let req = request(json!({ "answers": { "1": 1, "01": 0 }, "timeSpent": 0 }));
        assert!(matches!(req.into_submission(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn negative_time_is_rejected() {
        let req = request(json!({ "answers": {}, "timeSpent": -5 }));
        assert!(req.validate().is_err());
        assert!(matches!(
            req.into_submission(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn string_answer_values_do_not_parse() {
        let parsed: Result<SubmitQuizRequest, _> =
            serde_json::from_value(json!({ "answers": { "1": "B" }, "timeSpent": 0 }));
        assert!(parsed.is_err());
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_percentage(100), Grade::A);
        assert_eq!(Grade::from_percentage(90), Grade::A);
        assert_eq!(Grade::from_percentage(89), Grade::B);
        assert_eq!(Grade::from_percentage(70), Grade::C);
        assert_eq!(Grade::from_percentage(60), Grade::D);
        assert_eq!(Grade::from_percentage(59), Grade::F);
        assert_eq!(Grade::from_percentage(0), Grade::F);
    }

    fn stored(id: u64, score: u32, percentage: u8, time_spent: u64) -> QuizResult {
        QuizResult {
            id,
            user_id: None,
            scorecard: Scorecard {
                score,
                total_questions: 10,
                percentage,
                correct_answers: score,
                wrong_answers: 10 - score,
                grade: Grade::from_percentage(percentage),
                time_spent,
                answers: Vec::new(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn stats_over_no_results_are_zero() {
        assert_eq!(QuizStats::from_results(std::iter::empty()), QuizStats::default());
    }

    #[test]
    fn stats_aggregate_scores_and_time() {
        let results = [stored(1, 8, 80, 1000), stored(2, 4, 40, 3000)];
        let stats = QuizStats::from_results(&results);
        assert_eq!(stats.total_submissions, 2);
        assert_eq!(stats.average_score, 6.0);
        assert_eq!(stats.average_percentage, 60.0);
        assert_eq!(stats.average_time, 2000.0);
        assert_eq!(stats.highest_score, 8);
        assert_eq!(stats.lowest_score, 4);
    }

    #[test]
    fn submit_response_exposes_result_id() {
        let response = SubmitQuizResponse {
            result_id: 5,
            result: stored(5, 10, 100, 42),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["resultId"], 5);
        assert_eq!(value["id"], 5);
        assert_eq!(value["grade"], "A");
        assert_eq!(value["totalQuestions"], 10);
        assert!(value.get("userId").is_none());
    }
}
