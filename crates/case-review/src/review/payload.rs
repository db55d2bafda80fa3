use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::case::CaseInput;
use super::domain::{Category, Rating, Verdict};
use super::scoring::ScoreCard;
use super::session::EvaluationSession;

/// Record handed to the submission transport once a review is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub room_id: String,
    pub extra_info: Map<String, Value>,
    pub primary_category: String,
    pub category_free_text: String,
    pub uqc: UqcSection,
    pub cqc: CqcSection,
    pub overall_rating: Rating,
    pub comments: String,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UqcSection {
    pub visual_clarity: Option<Verdict>,
    pub audio_clarity: Option<Verdict>,
    pub video_completeness: Option<Verdict>,
    pub exciting_first3: Option<Verdict>,
    pub ansa: bool,
    pub score: u8,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CqcSection {
    pub fields: BTreeMap<String, Option<bool>>,
    pub score: u32,
    pub possible: u32,
    pub pct: f64,
    pub rating: Rating,
}

impl SubmissionPayload {
    /// Project a session and its derived ratings into the submission shape. Ratings that
    /// are not yet defined are reported as a zero score rated `Bad`.
    pub fn build(case: &CaseInput, session: &EvaluationSession, card: &ScoreCard) -> Self {
        let primary = session.primary_category();
        let category_free_text = if primary == Some(Category::Others) {
            session.category_free_text().to_string()
        } else {
            String::new()
        };

        let answers = session.uqc();
        let uqc = UqcSection {
            visual_clarity: answers.visual_clarity,
            audio_clarity: answers.audio_clarity,
            video_completeness: answers.video_completeness,
            exciting_first3: answers.exciting_first3,
            ansa: answers.ansa,
            score: card.uqc.map(|rating| rating.score).unwrap_or(0),
            rating: card.uqc.map(|rating| rating.rating).unwrap_or(Rating::Bad),
        };

        let fields = session
            .cqc_questions()
            .iter()
            .map(|question| (question.id.to_string(), session.cqc().get(question.id)))
            .collect();
        let cqc = CqcSection {
            fields,
            score: card.cqc.map(|rating| rating.score).unwrap_or(0),
            possible: card.cqc.map(|rating| rating.possible).unwrap_or(0),
            pct: card.cqc.map(|rating| rating.pct).unwrap_or(0.0),
            rating: card.cqc.map(|rating| rating.rating).unwrap_or(Rating::Bad),
        };

        Self {
            room_id: case.room_id.clone(),
            extra_info: case.extra_info.clone(),
            primary_category: primary
                .map(|category| category.label().to_string())
                .unwrap_or_default(),
            category_free_text,
            uqc,
            cqc,
            overall_rating: card.overall.unwrap_or(Rating::Bad),
            comments: session.feedback().to_string(),
            flagged: session.flagged(),
        }
    }
}
