use serde::{Deserialize, Serialize};

/// Canonical internal representation of one upstream commit.
///
/// `short_hash` + `source_tag` identify a commit uniquely within a session;
/// `timestamp_seconds` is the source of truth for feed ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub short_hash: String,
    pub timestamp_seconds: i64,
    pub author_handle: String,
    /// First line of the commit message only.
    pub raw_message: String,
    pub source_tag: String,
}
