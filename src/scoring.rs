// src/scoring.rs

use crate::{
    models::quiz::{AnswerDetail, Grade, Scorecard, Submission},
    repository::QuestionRepository,
};

/// Grades a submission against the catalog's answer key.
///
/// * Answers for ids missing from the catalog are skipped entirely: they
///   count neither toward `total_questions` nor into the breakdown.
/// * Any other answer is correct only when it equals `correct_answer`;
///   out-of-range indices are simply wrong.
/// * The breakdown follows ascending question id.
pub fn score(repository: &QuestionRepository, submission: &Submission) -> Scorecard {
    let mut correct_answers = 0u32;
    let mut wrong_answers = 0u32;
    let mut answers = Vec::with_capacity(submission.answers.len());

    for (&question_id, &user_answer) in &submission.answers {
        let Some(question) = repository.get(question_id) else {
            tracing::debug!(question_id, "Skipping answer for unknown question");
            continue;
        };

        let is_correct = question.is_correct(user_answer);
        if is_correct {
            correct_answers += 1;
        } else {
            wrong_answers += 1;
        }

        answers.push(AnswerDetail {
            question_id,
            user_answer,
            correct_answer: question.correct_answer,
            is_correct,
            question: question.question.clone(),
            selected_option: question.option_text(user_answer).map(str::to_owned),
            correct_option: question.correct_option().to_owned(),
        });
    }

    let total_questions = correct_answers + wrong_answers;
    let percent = percentage(correct_answers, total_questions);

    Scorecard {
        score: correct_answers,
        total_questions,
        percentage: percent,
        correct_answers,
        wrong_answers,
        grade: Grade::from_percentage(percent),
        time_spent: submission.time_spent,
        answers,
    }
}

/// `round(score / total * 100)` with halves rounded up; 0 when `total` is 0.
pub fn percentage(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let (score, total) = (u64::from(score.min(total)), u64::from(total));
    // floor((200 * score + total) / (2 * total)) == floor(100 * score / total + 0.5)
    ((200 * score + total) / (2 * total)) as u8
}
