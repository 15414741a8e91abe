//! core::input
//!
//! Reading revision lists from JSON.
//!
//! # Accepted shapes
//!
//! - A bare array of revision records
//! - A page envelope: `{ "revisions": [ ... ] }` (extra envelope fields ignored)
//!
//! # Record fields
//!
//! - id: `revisionId` / `revision_id`, falling back to `id`
//! - parent: `parentId` / `parent_id` / `parentRevisionId` (null or absent for roots)
//! - timestamp: `timestamp`, falling back to `updatedAt` then `createdAt`
//! - display: `author`, `status`, `message` (optional)

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::types::{Revision, RevisionId, Timestamp, TypeError};

/// Errors from reading revision input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read revisions from '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse revisions JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("revision #{index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("revision #{index}: {source}")]
    InvalidField { index: usize, source: TypeError },
}

/// A revision as it appears on the wire, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevisionRecord {
    #[serde(alias = "revision_id")]
    revision_id: Option<String>,
    id: Option<String>,
    #[serde(alias = "parent_id", alias = "parentRevisionId")]
    parent_id: Option<String>,
    timestamp: Option<String>,
    #[serde(alias = "updated_at")]
    updated_at: Option<String>,
    #[serde(alias = "created_at")]
    created_at: Option<String>,
    author: Option<String>,
    status: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RevisionDocument {
    List(Vec<RevisionRecord>),
    Page { revisions: Vec<RevisionRecord> },
}

impl RevisionRecord {
    fn into_revision(self, index: usize) -> Result<Revision, InputError> {
        let field = |source| InputError::InvalidField { index, source };

        let id = self
            .revision_id
            .or(self.id)
            .ok_or_else(|| InputError::InvalidRecord {
                index,
                message: "missing revision id (expected 'revisionId' or 'id')".into(),
            })?;
        let timestamp = self
            .timestamp
            .or(self.updated_at)
            .or(self.created_at)
            .ok_or_else(|| InputError::InvalidRecord {
                index,
                message: "missing timestamp (expected 'timestamp', 'updatedAt' or 'createdAt')"
                    .into(),
            })?;

        let parent = match self.parent_id {
            Some(p) => Some(RevisionId::new(p).map_err(field)?),
            None => None,
        };

        let mut revision = Revision::new(
            RevisionId::new(id).map_err(field)?,
            parent,
            Timestamp::new(timestamp).map_err(field)?,
        );
        revision.author = self.author;
        revision.status = self.status;
        revision.message = self.message;
        Ok(revision)
    }
}

/// Parse revisions from a JSON string.
///
/// # Example
///
/// ```
/// use revlane::core::input::parse_revisions;
///
/// let json = r#"[
///     {"id": "a", "parentId": null, "timestamp": "2024-01-01T00:00:00Z"},
///     {"revisionId": "b", "parentId": "a", "updatedAt": "2024-01-02T00:00:00Z"}
/// ]"#;
///
/// let revisions = parse_revisions(json).unwrap();
/// assert_eq!(revisions.len(), 2);
/// assert_eq!(revisions[1].id().as_str(), "b");
/// ```
///
/// # Errors
///
/// Returns `InputError` if the JSON is malformed or a record lacks an id
/// or timestamp.
pub fn parse_revisions(json: &str) -> Result<Vec<Revision>, InputError> {
    let records = match serde_json::from_str::<RevisionDocument>(json)? {
        RevisionDocument::List(records) => records,
        RevisionDocument::Page { revisions } => revisions,
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_revision(index))
        .collect()
}

/// Read revisions from a file, or from stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns `InputError::ReadError` if the source cannot be read, otherwise
/// the errors of [`parse_revisions`].
pub fn read_revisions(path: Option<&Path>) -> Result<Vec<Revision>, InputError> {
    let contents = match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|e| InputError::ReadError {
                path: p.to_path_buf(),
                source: e,
            })?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| InputError::ReadError {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            buf
        }
    };

    let revisions = parse_revisions(&contents)?;
    tracing::debug!(count = revisions.len(), "read revisions");
    Ok(revisions)
}
