use serde::{Deserialize, Serialize};

use super::super::domain::{Rating, UqcAnswers, Verdict};

/// Derived UQC outcome. `score` already includes the ANSA deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UqcRating {
    pub score: u8,
    pub rating: Rating,
}

/// All four required questions are answered. The ANSA flag plays no part.
pub fn is_complete(answers: &UqcAnswers) -> bool {
    answers.verdicts().iter().all(Option::is_some)
}

/// Number of questions answered `good`, before any ANSA deduction.
pub fn raw_score(answers: &UqcAnswers) -> u8 {
    answers
        .verdicts()
        .iter()
        .filter(|verdict| **verdict == Some(Verdict::Good))
        .count() as u8
}

/// Score a complete answer sheet. Incomplete sheets have no rating.
pub fn score(answers: &UqcAnswers) -> Option<UqcRating> {
    if !is_complete(answers) {
        return None;
    }

    let raw = raw_score(answers);
    if answers.ansa {
        return Some(UqcRating {
            score: raw.saturating_sub(1),
            rating: Rating::Bad,
        });
    }

    let rating = match raw {
        4 => Rating::Good,
        2 | 3 => Rating::Ok,
        _ => Rating::Bad,
    };

    Some(UqcRating { score: raw, rating })
}
