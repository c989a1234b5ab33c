use serde::{Deserialize, Serialize};

/// Per-author rollup over the current update set.
///
/// Recomputed from scratch whenever the update set changes; never cached
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub handle: String,
    pub commit_count: usize,
}
