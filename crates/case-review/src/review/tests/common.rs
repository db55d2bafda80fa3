use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::review::draft::{DraftStore, DraftStoreError, InMemoryDraftStore};
use crate::review::{
    CaseInput, Category, EvaluationSession, ReviewService, ScoringConfig, SubmissionPayload,
    SubmissionReceipt, SubmissionTransport, TransportError, UqcQuestion, Verdict,
};

pub(super) fn case_input() -> CaseInput {
    let mut extra_info = Map::new();
    extra_info.insert("region".to_string(), json!("BR"));
    extra_info.insert("duration".to_string(), json!("13.016"));

    CaseInput {
        room_id: "7525690569877507333".to_string(),
        extra_info,
        highlight_url: "/1752281026.mp4".to_string(),
        highlight_duration: 13.016,
        full_url: "/1752281026.mp4".to_string(),
        full_duration: 13.016,
    }
}

/// Session with every UQC question answered with `verdicts`, in question order.
pub(super) fn session_with_uqc(verdicts: [Verdict; 4], ansa: bool) -> EvaluationSession {
    let mut session = EvaluationSession::new();
    for (question, verdict) in UqcQuestion::ordered().into_iter().zip(verdicts) {
        session
            .set_uqc_answer(question, verdict)
            .expect("uqc answers are always editable");
    }
    session.set_ansa(ansa).expect("ansa is always editable");
    session
}

pub(super) fn all_good() -> [Verdict; 4] {
    [Verdict::Good; 4]
}

/// All-good UQC, Gaming selected, three yes and one no.
pub(super) fn gaming_session(ansa: bool) -> EvaluationSession {
    let mut session = session_with_uqc(all_good(), ansa);
    session
        .select_primary_category(Some(Category::Gaming))
        .expect("cqc unlocked");
    for (question_id, value) in [
        ("game_moment", true),
        ("highlight_action", true),
        ("no_loading", true),
        ("host_interacts", false),
    ] {
        session
            .set_cqc_answer(question_id, value)
            .expect("gaming question");
    }
    session
}

#[derive(Default)]
pub(super) struct MemoryTransport {
    delivered: Mutex<Vec<SubmissionPayload>>,
    failing: AtomicBool,
}

impl MemoryTransport {
    pub(super) fn failing() -> Self {
        let transport = Self::default();
        transport.set_failing(true);
        transport
    }

    pub(super) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(super) fn delivered(&self) -> Vec<SubmissionPayload> {
        self.delivered.lock().expect("transport mutex poisoned").clone()
    }
}

impl SubmissionTransport for MemoryTransport {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("backend offline".to_string()));
        }
        self.delivered
            .lock()
            .expect("transport mutex poisoned")
            .push(payload.clone());
        Ok(SubmissionReceipt {
            room_id: payload.room_id.clone(),
            accepted_at: Utc::now(),
        })
    }
}

/// Transport that panics mid-delivery.
pub(super) struct PanickingTransport;

impl SubmissionTransport for PanickingTransport {
    fn deliver(&self, _payload: &SubmissionPayload) -> Result<SubmissionReceipt, TransportError> {
        panic!("connection pool exploded");
    }
}

/// Store whose writes always fail, reads return nothing.
pub(super) struct BrokenDraftStore;

impl DraftStore for BrokenDraftStore {
    fn get(&self, _key: &str) -> Result<Option<String>, DraftStoreError> {
        Err(DraftStoreError::Unavailable("disk detached".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DraftStoreError> {
        Err(DraftStoreError::Unavailable("disk detached".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), DraftStoreError> {
        Err(DraftStoreError::Unavailable("disk detached".to_string()))
    }
}

pub(super) fn build_service() -> (
    ReviewService<InMemoryDraftStore, MemoryTransport>,
    Arc<InMemoryDraftStore>,
    Arc<MemoryTransport>,
) {
    build_service_with(InMemoryDraftStore::default(), MemoryTransport::default())
}

pub(super) fn build_service_with(
    drafts: InMemoryDraftStore,
    transport: MemoryTransport,
) -> (
    ReviewService<InMemoryDraftStore, MemoryTransport>,
    Arc<InMemoryDraftStore>,
    Arc<MemoryTransport>,
) {
    let drafts = Arc::new(drafts);
    let transport = Arc::new(transport);
    let service = ReviewService::new(
        case_input(),
        drafts.clone(),
        transport.clone(),
        ScoringConfig::default(),
    );
    (service, drafts, transport)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
