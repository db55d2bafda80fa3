use case_review::config::ReviewConfig;
use case_review::error::AppError;
use case_review::review::{
    CaseInput, Category, DraftStore, DraftStoreError, FileDraftStore, InMemoryDraftStore,
    SubmissionPayload, SubmissionReceipt, SubmissionTransport, TransportError,
};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Map, Value};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Hands finished reviews to the log until a backend endpoint exists.
#[derive(Debug, Default, Clone)]
pub(crate) struct LoggingTransport;

impl SubmissionTransport for LoggingTransport {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, TransportError> {
        let body = serde_json::to_string(payload)
            .map_err(|err| TransportError::Rejected(err.to_string()))?;
        info!(
            room_id = %payload.room_id,
            overall_rating = payload.overall_rating.label(),
            flagged = payload.flagged,
            payload = %body,
            "review submission"
        );

        Ok(SubmissionReceipt {
            room_id: payload.room_id.clone(),
            accepted_at: Utc::now(),
        })
    }
}

/// Draft store selected from configuration: a directory when one is set, memory otherwise.
#[derive(Debug)]
pub(crate) enum ConfiguredDraftStore {
    Memory(InMemoryDraftStore),
    File(FileDraftStore),
}

impl ConfiguredDraftStore {
    pub(crate) fn from_config(config: &ReviewConfig) -> Self {
        match &config.draft_dir {
            Some(dir) => Self::File(FileDraftStore::new(dir.clone())),
            None => Self::Memory(InMemoryDraftStore::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "memory".to_string(),
            Self::File(store) => store.root().display().to_string(),
        }
    }
}

impl DraftStore for ConfiguredDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::File(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), DraftStoreError> {
        match self {
            Self::Memory(store) => store.remove(key),
            Self::File(store) => store.remove(key),
        }
    }
}

/// Case bundled with the service for local review sessions.
pub(crate) fn sample_case() -> CaseInput {
    let extra_info = json!({
        "best_point_time": "1752280668",
        "create_time": "1752280987",
        "data_type": "2",
        "diamond_count": "99.0",
        "duration": "13.016",
        "end_time": "1752280678",
        "prompt_version": "v0",
        "region": "BR",
        "result_key": "PreviewHighlight_1752280988389_2e19f03b-5eb9-11f0-a8f1-3436ac12008d",
        "start_time": "1752280665",
    });
    let extra_info = match extra_info {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    CaseInput {
        room_id: "7525690569877507333".to_string(),
        extra_info,
        highlight_url: "/1752281026.mp4".to_string(),
        highlight_duration: 13.016,
        full_url: "/1752281026.mp4".to_string(),
        full_duration: 13.016,
    }
}

pub(crate) fn load_case(config: &ReviewConfig) -> Result<CaseInput, AppError> {
    match &config.case_path {
        Some(path) => Ok(CaseInput::from_path(path)?),
        None => Ok(sample_case()),
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| {
        let known: Vec<_> = Category::ordered()
            .into_iter()
            .map(Category::label)
            .collect();
        format!("unknown category '{raw}' (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_review::review::{EvaluationSession, ScoringEngine};
    use std::path::PathBuf;

    #[test]
    fn parse_category_accepts_labels_loosely() {
        assert_eq!(parse_category("random chatting"), Ok(Category::RandomChatting));
        assert_eq!(parse_category("GAMING"), Ok(Category::Gaming));
        let err = parse_category("cooking").expect_err("unknown category");
        assert!(err.contains("Random Chatting"));
    }

    #[test]
    fn draft_store_follows_configuration() {
        let memory = ConfiguredDraftStore::from_config(&ReviewConfig::default());
        assert!(matches!(memory, ConfiguredDraftStore::Memory(_)));
        memory.set("slot", "{}").expect("memory write");
        assert_eq!(memory.get("slot").expect("memory read").as_deref(), Some("{}"));

        let file = ConfiguredDraftStore::from_config(&ReviewConfig {
            draft_dir: Some(PathBuf::from("/var/lib/case-review")),
            case_path: None,
        });
        assert_eq!(file.describe(), "/var/lib/case-review");
    }

    #[test]
    fn sample_case_is_used_without_a_case_path() {
        let case = load_case(&ReviewConfig::default()).expect("sample case");
        assert_eq!(case.room_id, "7525690569877507333");
        assert_eq!(case.extra_info["region"], json!("BR"));
    }

    #[test]
    fn logging_transport_acknowledges_payloads() {
        let session = EvaluationSession::new();
        let card = ScoringEngine::default().evaluate(&session);
        let payload = SubmissionPayload::build(&sample_case(), &session, &card);

        let receipt = LoggingTransport.deliver(&payload).expect("logged");
        assert_eq!(receipt.room_id, payload.room_id);
    }
}
