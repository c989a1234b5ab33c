//! Turns merged commit streams into the paginated update feed.
//!
//! Pure map + sort: classification is a pure function of the immutable
//! message, so updates can be rebuilt from cached commits at any time
//! without a refetch.

use chrono::{DateTime, Utc};

use crate::feed::classify::{classify, summarize};
use crate::feed::fetcher::merge_order;
use crate::models::{CommitRecord, Update};

/// Classify every commit and produce the feed, newest first.
///
/// Upstream already guarantees the ordering; it is re-asserted here so a
/// misbehaving source cannot corrupt the feed.
pub fn build_feed(commits: &[CommitRecord]) -> Vec<Update> {
    let mut sorted: Vec<&CommitRecord> = commits.iter().collect();
    sorted.sort_by(|a, b| merge_order(a, b));
    sorted.into_iter().map(to_update).collect()
}

fn to_update(record: &CommitRecord) -> Update {
    let classification = classify(&record.raw_message);
    let when = DateTime::<Utc>::from_timestamp(record.timestamp_seconds, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Update {
        short_hash: record.short_hash.clone(),
        timestamp_seconds: record.timestamp_seconds,
        author_handle: record.author_handle.clone(),
        source_tag: record.source_tag.clone(),
        kind: classification.kind,
        category: classification.category.to_string(),
        date_iso: when.format("%Y-%m-%d").to_string(),
        time_hhmm: when.format("%H:%M").to_string(),
        summary: summarize(&record.raw_message),
    }
}

/// Slice one page out of a built feed.
pub fn paginate(feed: &[Update], page_index: usize, page_size: usize) -> &[Update] {
    let start = page_index.saturating_mul(page_size).min(feed.len());
    let end = start.saturating_add(page_size).min(feed.len());
    &feed[start..end]
}

/// Incremental-reveal cursor: each `reveal_more` exposes one more page of
/// the already-built feed. Re-slices only; never re-fetches or
/// re-classifies.
#[derive(Debug, Clone, Copy)]
pub struct RevealCursor {
    page_size: usize,
    revealed: usize,
}

impl RevealCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            revealed: page_size,
        }
    }

    pub fn reveal_more(&mut self) {
        self.revealed = self.revealed.saturating_add(self.page_size);
    }

    pub fn visible<'a>(&self, feed: &'a [Update]) -> &'a [Update] {
        &feed[..self.revealed.min(feed.len())]
    }

    pub fn has_more(&self, feed: &[Update]) -> bool {
        self.revealed < feed.len()
    }
}
