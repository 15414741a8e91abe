//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RevisionId`] - Non-empty revision identifier
//! - [`Timestamp`] - Chronologically comparable timestamp string
//! - [`Revision`] - A single version in a single-parent history
//! - [`SortOrder`] - Display order for laid-out revisions
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use revlane::core::types::{Revision, RevisionId, SortOrder};
//!
//! let root = Revision::root("r1", "2024-01-01T00:00:00Z").unwrap();
//! let child = Revision::child("r2", "r1", "2024-01-02T00:00:00Z").unwrap();
//! assert_eq!(child.parent_id(), Some(root.id()));
//!
//! assert!(RevisionId::new("").is_err());
//! assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid revision id: {0}")]
    InvalidRevisionId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid sort order '{0}', must be one of: asc, desc")]
    InvalidSortOrder(String),
}

/// A revision identifier.
///
/// Identifiers are opaque to the layout engine; the only requirements are
/// that they are non-empty and free of control characters.
///
/// # Example
///
/// ```
/// use revlane::core::types::RevisionId;
///
/// let id = RevisionId::new("rev-42").unwrap();
/// assert_eq!(id.as_str(), "rev-42");
///
/// assert!(RevisionId::new("").is_err());
/// assert!(RevisionId::new("bad\nid").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RevisionId(String);

impl RevisionId {
    /// Create a new validated revision id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRevisionId` if the id is empty or contains
    /// control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.trim().is_empty() {
            return Err(TypeError::InvalidRevisionId(
                "revision id cannot be empty".into(),
            ));
        }
        if id.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidRevisionId(
                "revision id cannot contain control characters".into(),
            ));
        }
        Ok(())
    }

    /// Get the revision id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RevisionId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RevisionId> for String {
    fn from(id: RevisionId) -> Self {
        id.0
    }
}

impl AsRef<str> for RevisionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A creation/update timestamp.
///
/// Timestamps are compared as strings: any ISO 8601 rendering with a fixed
/// layout (e.g. RFC 3339 in UTC) sorts chronologically under plain string
/// comparison, which is all the layout engine needs. A strict RFC 3339 view
/// is available through [`Timestamp::parse_rfc3339`] for display.
///
/// # Example
///
/// ```
/// use revlane::core::types::Timestamp;
///
/// let early = Timestamp::new("2024-01-01T00:00:00Z").unwrap();
/// let late = Timestamp::new("2024-01-02T00:00:00Z").unwrap();
/// assert!(early < late);
/// assert!(late.parse_rfc3339().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Create a new timestamp.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTimestamp` if the string is empty.
    pub fn new(ts: impl Into<String>) -> Result<Self, TypeError> {
        let ts = ts.into();
        if ts.trim().is_empty() {
            return Err(TypeError::InvalidTimestamp(
                "timestamp cannot be empty".into(),
            ));
        }
        Ok(Self(ts))
    }

    /// Create a timestamp from a chrono DateTime, rendered as RFC 3339.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }

    /// Parse the timestamp as RFC 3339, if it is one.
    pub fn parse_rfc3339(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }

    /// Get the timestamp as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single revision in a single-parent history.
///
/// Display fields (`author`, `status`, `message`) are carried through the
/// layout untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    id: RevisionId,
    parent_id: Option<RevisionId>,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Revision {
    /// Create a revision from already validated parts.
    pub fn new(id: RevisionId, parent_id: Option<RevisionId>, timestamp: Timestamp) -> Self {
        Self {
            id,
            parent_id,
            timestamp,
            author: None,
            status: None,
            message: None,
        }
    }

    /// Create a parentless revision.
    ///
    /// # Errors
    ///
    /// Returns a `TypeError` if the id or timestamp is invalid.
    pub fn root(id: impl Into<String>, timestamp: impl Into<String>) -> Result<Self, TypeError> {
        Ok(Self::new(RevisionId::new(id)?, None, Timestamp::new(timestamp)?))
    }

    /// Create a revision pointing at `parent`.
    ///
    /// # Errors
    ///
    /// Returns a `TypeError` if any id or the timestamp is invalid.
    pub fn child(
        id: impl Into<String>,
        parent: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self, TypeError> {
        Ok(Self::new(
            RevisionId::new(id)?,
            Some(RevisionId::new(parent)?),
            Timestamp::new(timestamp)?,
        ))
    }

    /// Attach an author for display.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Attach a status for display.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Attach a message for display.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn id(&self) -> &RevisionId {
        &self.id
    }

    pub fn parent_id(&self) -> Option<&RevisionId> {
        self.parent_id.as_ref()
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

/// Display order for laid-out revisions.
///
/// Lanes never depend on the sort order; only the sequence of output
/// nodes does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortOrder {
    /// Valid sort order names.
    pub const VALID_NAMES: &'static [&'static str] = &["asc", "desc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(TypeError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
