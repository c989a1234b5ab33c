pub mod assemble;
pub mod cache;
pub mod classify;
pub mod contributors;
pub mod fetcher;
pub mod pipeline;
pub mod source;

pub use pipeline::{FeedPipeline, SharedFeed};
