use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::domain::{Category, CqcAnswers, UqcAnswers, UqcQuestion, Verdict};
use super::session::{EvaluationSession, SessionError};

/// Fixed slot under which the in-progress review is mirrored.
pub const DRAFT_KEY: &str = "imis-uqc-cqc-draft";

/// Key/value substrate holding the draft. Only get/set/remove by key are needed.
pub trait DraftStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DraftStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DraftStoreError>;
    fn remove(&self, key: &str) -> Result<(), DraftStoreError>;
}

/// Error enumeration for draft storage failures.
#[derive(Debug, thiserror::Error)]
pub enum DraftStoreError {
    #[error("draft storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft key `{0}` cannot be used as a storage name")]
    InvalidKey(String),
    #[error("draft storage unavailable: {0}")]
    Unavailable(String),
}

/// A stored draft that cannot be read at all. Partially valid drafts never fail.
#[derive(Debug, thiserror::Error)]
pub enum DraftDecodeError {
    #[error("draft is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("draft must be a JSON object")]
    NotAnObject,
}

/// Serialized shape of a draft. Ratings are never stored; they are derived on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub uqc: UqcAnswers,
    pub primary_category: Option<Category>,
    pub secondary_categories: Vec<Category>,
    pub category_free_text: String,
    pub cqc_values: CqcAnswers,
    pub feedback: String,
    pub flagged: bool,
    pub saved_at: DateTime<Utc>,
}

impl DraftRecord {
    pub fn capture(session: &EvaluationSession, saved_at: DateTime<Utc>) -> Self {
        Self {
            uqc: *session.uqc(),
            primary_category: session.primary_category(),
            secondary_categories: session.secondary_categories().to_vec(),
            category_free_text: session.category_free_text().to_string(),
            cqc_values: session.cqc().clone(),
            feedback: session.feedback().to_string(),
            flagged: session.flagged(),
            saved_at,
        }
    }
}

pub fn encode(session: &EvaluationSession, saved_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string(&DraftRecord::capture(session, saved_at))
}

/// Rebuild a session from a stored draft.
///
/// Each field is read on its own and replayed through the session's guarded setters, so a
/// missing or malformed field falls back to its empty default without discarding the rest,
/// and a restored session always satisfies the same gates as a live one. Only a draft that
/// is not a JSON object at all is rejected.
pub fn decode(raw: &str) -> Result<EvaluationSession, DraftDecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(fields) = value else {
        return Err(DraftDecodeError::NotAnObject);
    };
    Ok(restore(&fields))
}

fn restore(fields: &Map<String, Value>) -> EvaluationSession {
    let mut session = EvaluationSession::new();

    if let Some(uqc) = fields.get("uqc").and_then(Value::as_object) {
        for question in UqcQuestion::ordered() {
            if let Some(verdict) = read_verdict(uqc, question) {
                keep_or_drop("uqc", session.set_uqc_answer(question, verdict));
            }
        }
        if let Some(ansa) = uqc.get("ansa").and_then(Value::as_bool) {
            keep_or_drop("uqc.ansa", session.set_ansa(ansa));
        }
    }

    let primary = read_str(fields, "primaryCategory").and_then(Category::parse);
    if primary.is_some() {
        keep_or_drop("primaryCategory", session.select_primary_category(primary));
    }

    if let Some(secondaries) = fields.get("secondaryCategories").and_then(Value::as_array) {
        for category in secondaries
            .iter()
            .filter_map(Value::as_str)
            .filter_map(Category::parse)
        {
            if !session.secondary_categories().contains(&category) {
                keep_or_drop(
                    "secondaryCategories",
                    session.toggle_secondary_category(category),
                );
            }
        }
    }

    if let Some(text) = read_str(fields, "categoryFreeText").filter(|text| !text.is_empty()) {
        keep_or_drop("categoryFreeText", session.set_category_free_text(text));
    }

    if let Some(values) = fields.get("cqcValues").and_then(Value::as_object) {
        for (question_id, value) in values {
            if let Some(answer) = value.as_bool() {
                keep_or_drop("cqcValues", session.set_cqc_answer(question_id, answer));
            }
        }
    }

    if let Some(feedback) = read_str(fields, "feedback") {
        keep_or_drop("feedback", session.set_feedback(feedback));
    }
    if let Some(flagged) = fields.get("flagged").and_then(Value::as_bool) {
        keep_or_drop("flagged", session.set_flagged(flagged));
    }

    session
}

fn read_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn read_verdict(uqc: &Map<String, Value>, question: UqcQuestion) -> Option<Verdict> {
    // Older drafts used abbreviated keys.
    let legacy = match question {
        UqcQuestion::VisualClarity => "v_clarity",
        UqcQuestion::AudioClarity => "a_clarity",
        UqcQuestion::VideoCompleteness => "v_complete",
        UqcQuestion::ExcitingFirst3 => "first3",
    };

    uqc.get(question.id())
        .or_else(|| uqc.get(legacy))
        .and_then(Value::as_str)
        .and_then(Verdict::parse)
}

fn keep_or_drop(field: &'static str, result: Result<(), SessionError>) {
    if let Err(err) = result {
        debug!(field, error = %err, "dropping draft field that no longer applies");
    }
}

/// Process-local store, used for tests and when no draft directory is configured.
#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryDraftStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl DraftStore for InMemoryDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        Ok(self.peek(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DraftStoreError> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory. Writes go through a temporary file and a
/// rename so a crash never leaves a half-written draft behind.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    root: PathBuf,
}

impl FileDraftStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DraftStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !valid {
            return Err(DraftStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DraftStoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
