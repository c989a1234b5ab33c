//! Data transfer objects (DTOs) for the feed pipeline and API responses.
//!
//! These structs are serialized to JSON for downstream consumption.
//! - `commit`: CommitRecord, the canonical raw commit
//! - `update`: Update, UpdateType, UpdateListResponse, FeedStatus
//! - `contributor`: Contributor ranking entries

pub mod commit;
pub mod contributor;
pub mod update;

pub use commit::*;
pub use contributor::*;
pub use update::*;
