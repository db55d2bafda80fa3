use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::StatusCode;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::case::CaseInput;
use super::draft::{self, DraftStore, DRAFT_KEY};
use super::payload::SubmissionPayload;
use super::scoring::{ScoringConfig, ScoringEngine};
use super::session::{EvaluationSession, ReviewAction, SessionError};
use super::transport::{SubmissionReceipt, SubmissionTransport, TransportError};
use super::view::SessionSnapshot;

/// Service composing the active case, the reviewer's session, draft storage and the
/// submission transport. It is the only writer of the session.
pub struct ReviewService<S, T> {
    case: Arc<CaseInput>,
    session: Mutex<EvaluationSession>,
    drafts: Arc<S>,
    transport: Arc<T>,
    engine: Arc<ScoringEngine>,
}

impl<S, T> ReviewService<S, T>
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    /// Build the service and restore any stored draft. An unreadable draft is discarded
    /// and the review starts empty.
    pub fn new(case: CaseInput, drafts: Arc<S>, transport: Arc<T>, config: ScoringConfig) -> Self {
        let session = load_draft(drafts.as_ref());

        Self {
            case: Arc::new(case),
            session: Mutex::new(session),
            drafts,
            transport,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn case(&self) -> &CaseInput {
        &self.case
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.lock_session();
        SessionSnapshot::capture(&session, &self.engine)
    }

    /// Apply one reviewer action and mirror the result to draft storage.
    pub fn apply(&self, action: ReviewAction) -> Result<SessionSnapshot, ReviewServiceError> {
        let mut session = self.lock_session();
        let before = session.stage();
        session.apply(action)?;

        let after = session.stage();
        if before != after {
            debug!(from = before.label(), to = after.label(), "review stage changed");
        }

        self.persist(&session);
        Ok(SessionSnapshot::capture(&session, &self.engine))
    }

    /// Payload that would be sent if the reviewer submitted now.
    pub fn preview(&self) -> SubmissionPayload {
        let session = self.lock_session();
        let card = self.engine.evaluate(&session);
        SubmissionPayload::build(&self.case, &session, &card)
    }

    /// Deliver the finished review.
    ///
    /// The session lock is released while the transport runs; the `Submitting` stage keeps
    /// every other action out until delivery resolves. On success the session and draft are
    /// cleared. On failure the session returns to its previous stage with all answers and
    /// the draft intact, and the error is handed back so the reviewer can submit again. A
    /// transport that panics counts as a failed delivery.
    pub fn submit(&self) -> Result<SubmittedReview, ReviewServiceError> {
        let payload = {
            let mut session = self.lock_session();
            session.begin_submission()?;
            let card = self.engine.evaluate(&session);
            SubmissionPayload::build(&self.case, &session, &card)
        };

        info!(
            room_id = %payload.room_id,
            overall_rating = payload.overall_rating.label(),
            "submitting review"
        );

        // A panicking transport is a failed delivery; the session must not stay in flight.
        let delivery = panic::catch_unwind(AssertUnwindSafe(|| self.transport.deliver(&payload)))
            .unwrap_or_else(|_| {
                Err(TransportError::Unavailable(
                    "submission transport panicked".to_string(),
                ))
            });

        match delivery {
            Ok(receipt) => {
                let mut session = self.lock_session();
                session.complete_submission();
                self.purge_draft();
                drop(session);
                info!(room_id = %receipt.room_id, "review submitted");
                Ok(SubmittedReview { payload, receipt })
            }
            Err(err) => {
                self.lock_session().abort_submission();
                warn!(room_id = %payload.room_id, error = %err, "review submission failed");
                Err(err.into())
            }
        }
    }

    /// Discard the review without producing a payload.
    pub fn cancel(&self) -> Result<SessionSnapshot, ReviewServiceError> {
        let mut session = self.lock_session();
        session.cancel()?;
        self.purge_draft();
        info!(room_id = %self.case.room_id, "review cancelled");
        Ok(SessionSnapshot::capture(&session, &self.engine))
    }

    fn lock_session(&self) -> MutexGuard<'_, EvaluationSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, session: &EvaluationSession) {
        let encoded = match draft::encode(session, Utc::now()) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "unable to encode review draft");
                return;
            }
        };

        if let Err(err) = self.drafts.set(DRAFT_KEY, &encoded) {
            warn!(error = %err, "unable to save review draft");
        }
    }

    fn purge_draft(&self) {
        if let Err(err) = self.drafts.remove(DRAFT_KEY) {
            warn!(error = %err, "unable to remove review draft");
        }
    }
}

fn load_draft<S: DraftStore>(drafts: &S) -> EvaluationSession {
    match drafts.get(DRAFT_KEY) {
        Ok(Some(raw)) => match draft::decode(&raw) {
            Ok(session) => {
                info!(stage = session.stage().label(), "restored review draft");
                session
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable review draft");
                EvaluationSession::new()
            }
        },
        Ok(None) => EvaluationSession::new(),
        Err(err) => {
            warn!(error = %err, "review draft storage unavailable, starting empty");
            EvaluationSession::new()
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedReview {
    pub payload: SubmissionPayload,
    pub receipt: SubmissionReceipt,
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ReviewServiceError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Session(SessionError::CqcLocked | SessionError::SubmissionInFlight) => {
                StatusCode::CONFLICT
            }
            Self::Session(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
