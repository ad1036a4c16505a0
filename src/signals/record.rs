//! Ingested proof-of-work records.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// One merged pull request, as ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Author login.
    pub author: String,
    /// PR title.
    pub skill_signal: String,
    /// Leading part of the PR body.
    #[serde(default)]
    pub context: String,
    /// Merge timestamp, as reported upstream.
    #[serde(default)]
    pub merged_at: Option<String>,
    /// Link to the diff.
    #[serde(default)]
    pub proof_url: String,
}

impl ProofRecord {
    /// Text searched by the index: title then body.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.skill_signal, self.context)
    }

    /// Text scored by forensics: body then title.
    pub fn forensic_text(&self) -> String {
        format!("{}\n{}", self.context, self.skill_signal)
    }
}

/// Parse records from a JSON array.
pub fn parse_records(json: &str) -> Result<Vec<ProofRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read records from a JSON file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ProofRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let records = parse_records(&raw)?;
    info!(path = %path.display(), records = records.len(), "Loaded proof records");
    Ok(records)
}
