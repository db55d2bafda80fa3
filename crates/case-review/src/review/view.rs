use serde::Serialize;

use super::domain::{Category, CqcAnswers, Rating, UqcAnswers, FEEDBACK_MAX_CHARS};
use super::scoring::{CqcQuestion, CqcRating, ScoringEngine, UqcRating};
use super::session::{EvaluationSession, ReviewStage};

/// Read model of a session with every derived rating and gate resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub stage: ReviewStage,
    pub stage_label: &'static str,
    pub uqc: UqcAnswers,
    pub uqc_rating: Option<UqcRating>,
    pub primary_category: Option<Category>,
    pub secondary_categories: Vec<Category>,
    pub category_free_text: String,
    pub cqc_questions: &'static [CqcQuestion],
    pub cqc: CqcAnswers,
    pub cqc_rating: Option<CqcRating>,
    pub cqc_answered: usize,
    pub cqc_required: usize,
    pub overall_rating: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_pct: Option<f64>,
    pub feedback: String,
    pub feedback_remaining: usize,
    pub flagged: bool,
    pub cqc_enabled: bool,
    pub submit_enabled: bool,
    pub cancel_enabled: bool,
}

impl SessionSnapshot {
    pub fn capture(session: &EvaluationSession, engine: &ScoringEngine) -> Self {
        let stage = session.stage();
        let card = engine.evaluate(session);
        let overall_pct = match (&card.uqc, &card.cqc) {
            (Some(uqc), Some(cqc)) => Some(engine.overall_pct(uqc, cqc)),
            _ => None,
        };

        Self {
            stage,
            stage_label: stage.label(),
            uqc: *session.uqc(),
            uqc_rating: card.uqc,
            primary_category: session.primary_category(),
            secondary_categories: session.secondary_categories().to_vec(),
            category_free_text: session.category_free_text().to_string(),
            cqc_questions: session.cqc_questions(),
            cqc: session.cqc().clone(),
            cqc_rating: card.cqc,
            cqc_answered: card.answered,
            cqc_required: session.cqc_required(),
            overall_rating: card.overall,
            overall_pct,
            feedback: session.feedback().to_string(),
            feedback_remaining: FEEDBACK_MAX_CHARS
                .saturating_sub(session.feedback().chars().count()),
            flagged: session.flagged(),
            cqc_enabled: stage.cqc_enabled(),
            submit_enabled: stage.submit_enabled(),
            cancel_enabled: stage.cancel_enabled(),
        }
    }
}
