use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One reviewable highlight: the short clip, its full recording and opaque metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    pub room_id: String,
    #[serde(default)]
    pub extra_info: Map<String, Value>,
    #[serde(rename = "highlightUrl")]
    pub highlight_url: String,
    #[serde(rename = "highlightDuration")]
    pub highlight_duration: f64,
    #[serde(rename = "fullUrl")]
    pub full_url: String,
    #[serde(rename = "fullDuration")]
    pub full_duration: f64,
}

impl CaseInput {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CaseLoadError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CaseLoadError> {
        let case: CaseInput = serde_json::from_reader(reader)?;
        if case.room_id.trim().is_empty() {
            return Err(CaseLoadError::MissingRoomId);
        }
        if !case.highlight_duration.is_finite() || case.highlight_duration < 0.0 {
            return Err(CaseLoadError::InvalidDuration {
                field: "highlightDuration",
            });
        }
        if !case.full_duration.is_finite() || case.full_duration < 0.0 {
            return Err(CaseLoadError::InvalidDuration {
                field: "fullDuration",
            });
        }
        Ok(case)
    }
}

/// Failure to read a case description supplied by the assignment collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CaseLoadError {
    #[error("unable to read case file: {0}")]
    Io(#[from] std::io::Error),
    #[error("case file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("case is missing a room_id")]
    MissingRoomId,
    #[error("case field {field} must be a non-negative number of seconds")]
    InvalidDuration { field: &'static str },
}
