mod config;
mod cqc;
mod policy;
mod rules;
mod uqc;

pub use config::ScoringConfig;
pub use cqc::{answered as cqc_answered, CqcRating};
pub use rules::{
    cqc_questions, required_answers, CqcQuestion, UqcQuestionSpec, ANSA_HELP, ANSA_LABEL,
    UQC_QUESTIONS,
};
pub use uqc::{is_complete as uqc_complete, raw_score as uqc_raw_score, UqcRating};

use serde::{Deserialize, Serialize};

use super::domain::{Category, CqcAnswers, Rating, UqcAnswers};
use super::session::EvaluationSession;

/// Stateless scorer that applies the rubric configuration to a session snapshot.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn uqc(&self, answers: &UqcAnswers) -> Option<UqcRating> {
        uqc::score(answers)
    }

    pub fn cqc(&self, category: Option<Category>, answers: &CqcAnswers) -> Option<CqcRating> {
        let questions = category.map(cqc_questions).unwrap_or(&[]);
        cqc::score(questions, answers, &self.config)
    }

    /// Overall verdict, defined only once both stage ratings exist.
    pub fn overall(
        &self,
        answers: &UqcAnswers,
        uqc: Option<&UqcRating>,
        cqc: Option<&CqcRating>,
    ) -> Option<Rating> {
        match (uqc, cqc) {
            (Some(uqc), Some(cqc)) => Some(policy::decide_overall(
                &self.config,
                answers.ansa,
                uqc,
                cqc,
            )),
            _ => None,
        }
    }

    /// Weighted completion across both stages, before the ANSA override.
    pub fn overall_pct(&self, uqc: &UqcRating, cqc: &CqcRating) -> f64 {
        policy::overall_pct(&self.config, uqc, cqc)
    }

    pub fn evaluate(&self, session: &EvaluationSession) -> ScoreCard {
        let uqc = self.uqc(session.uqc());
        let cqc = self.cqc(session.primary_category(), session.cqc());
        let overall = self.overall(session.uqc(), uqc.as_ref(), cqc.as_ref());
        let answered = session
            .primary_category()
            .map(|category| cqc_answered(cqc_questions(category), session.cqc()))
            .unwrap_or(0);

        ScoreCard {
            uqc,
            cqc,
            overall,
            answered,
        }
    }
}

/// Ratings derived from one session snapshot. Recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub uqc: Option<UqcRating>,
    pub cqc: Option<CqcRating>,
    pub overall: Option<Rating>,
    pub answered: usize,
}
