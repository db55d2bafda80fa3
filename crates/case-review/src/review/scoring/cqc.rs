use serde::{Deserialize, Serialize};

use super::super::domain::{CqcAnswers, Rating};
use super::config::ScoringConfig;
use super::rules::CqcQuestion;

/// Derived CQC outcome for the active category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CqcRating {
    pub score: u32,
    pub possible: u32,
    pub pct: f64,
    pub rating: Rating,
}

/// Score the checklist. Unanswered questions count as not satisfied. An empty checklist
/// (no category selected) has no rating.
pub fn score(
    questions: &[CqcQuestion],
    answers: &CqcAnswers,
    config: &ScoringConfig,
) -> Option<CqcRating> {
    if questions.is_empty() {
        return None;
    }

    let possible = questions.len() as u32;
    let score = questions
        .iter()
        .filter(|question| answers.get(question.id) == Some(true))
        .count() as u32;
    let pct = f64::from(score) / f64::from(possible);

    Some(CqcRating {
        score,
        possible,
        pct,
        rating: config.rate_pct(pct),
    })
}

/// Questions holding an explicit yes or no, used by the submission gate.
pub fn answered(questions: &[CqcQuestion], answers: &CqcAnswers) -> usize {
    questions
        .iter()
        .filter(|question| answers.get(question.id).is_some())
        .count()
}
