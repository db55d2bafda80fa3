//! Two-stage highlight review: rule tables, scorers, the session state machine, draft
//! persistence and the submission surface.

pub mod case;
pub mod domain;
pub mod draft;
pub mod payload;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod transport;
pub mod view;

#[cfg(test)]
mod tests;

pub use case::{CaseInput, CaseLoadError};
pub use domain::{
    Category, CqcAnswers, Rating, UqcAnswers, UqcQuestion, Verdict, CATEGORY_FREE_TEXT_MAX_CHARS,
    FEEDBACK_MAX_CHARS, MAX_SECONDARY_CATEGORIES,
};
pub use draft::{
    DraftDecodeError, DraftRecord, DraftStore, DraftStoreError, FileDraftStore,
    InMemoryDraftStore, DRAFT_KEY,
};
pub use payload::{CqcSection, SubmissionPayload, UqcSection};
pub use router::review_router;
pub use scoring::{
    cqc_questions, CqcQuestion, CqcRating, ScoreCard, ScoringConfig, ScoringEngine, UqcRating,
};
pub use service::{ReviewService, ReviewServiceError, SubmittedReview};
pub use session::{EvaluationSession, ReviewAction, ReviewStage, SessionError};
pub use transport::{SubmissionReceipt, SubmissionTransport, TransportError};
pub use view::SessionSnapshot;
