//! Paginated commit retrieval from one upstream repository.
//!
//! `CommitPages` is the seam between the pagination loop and the transport:
//! the loop in `fetch_all` only ever sees pages of `CommitRecord`s, so tests
//! drive it with an in-memory source while production uses `GithubSource`
//! over reqwest.
//!
//! One network round trip per `fetch_page` call, no local state, no internal
//! retry. Retry policy belongs to the caller.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::SourceSpec;
use crate::error::{AppError, Result};
use crate::models::CommitRecord;

/// Maximum page size accepted by the upstream API.
pub const MAX_PAGE_SIZE: usize = 100;

/// Short-hash length used for merged records.
const SHORT_HASH_LEN: usize = 7;

/// One page-number-addressable source of commit history.
pub trait CommitPages {
    fn source_tag(&self) -> &str;

    /// Fetch one page. Page numbers start at 1; an empty list signals
    /// end-of-history.
    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<CommitRecord>>;
}

/// Retrieve the full history of one source.
///
/// Terminates on any of: an empty page, a short page (last-page signal,
/// saves one wasted round trip when history divides evenly), or the
/// `max_records` ceiling, truncating to exactly `max_records`.
pub async fn fetch_all<P: CommitPages>(
    source: &P,
    per_page: usize,
    max_records: Option<usize>,
) -> Result<Vec<CommitRecord>> {
    let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let batch = source.fetch_page(page, per_page).await?;
        let batch_len = batch.len();
        records.extend(batch);

        if let Some(max) = max_records {
            if records.len() >= max {
                records.truncate(max);
                break;
            }
        }
        if batch_len < per_page {
            break;
        }
        page += 1;
    }

    tracing::debug!(
        source = source.source_tag(),
        count = records.len(),
        "fetched history"
    );
    Ok(records)
}

/// Upstream commit object, GitHub wire shape.
#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetails,
    /// Platform account, absent for commits whose author has no account.
    author: Option<ApiAccount>,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetails {
    author: ApiSignature,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiSignature {
    name: String,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiAccount {
    login: String,
}

impl ApiCommit {
    fn into_record(self, source_tag: &str) -> CommitRecord {
        let short_hash = self.sha.chars().take(SHORT_HASH_LEN).collect();
        // Prefer the platform login; the signature name is a display name.
        let author_handle = self
            .author
            .map(|a| a.login)
            .unwrap_or(self.commit.author.name);
        let raw_message = self
            .commit
            .message
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        CommitRecord {
            short_hash,
            timestamp_seconds: self.commit.author.date.timestamp(),
            author_handle,
            raw_message,
            source_tag: source_tag.to_string(),
        }
    }
}

/// Commit history client for one GitHub-style repository.
pub struct GithubSource {
    client: Client,
    api_base: String,
    spec: SourceSpec,
    token: Option<String>,
}

impl GithubSource {
    pub fn new(client: Client, api_base: &str, spec: SourceSpec, token: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            spec,
            token,
        }
    }
}

impl CommitPages for GithubSource {
    fn source_tag(&self) -> &str {
        &self.spec.tag
    }

    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<CommitRecord>> {
        if page == 0 {
            return Err(AppError::BadRequest("page numbers start at 1".to_string()));
        }

        let url = format!(
            "{}/repos/{}/{}/commits",
            self.api_base, self.spec.owner, self.spec.repo
        );

        let mut request = self
            .client
            .get(&url)
            .query(&[("per_page", per_page.min(MAX_PAGE_SIZE)), ("page", page)])
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "update-feed");

        // Unauthenticated access is supported, just at a lower rate limit.
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            return Err(AppError::RateLimited(self.spec.tag.clone()));
        }
        if !status.is_success() {
            return Err(AppError::Transport {
                source_tag: self.spec.tag.clone(),
                status: status.as_u16(),
            });
        }

        let commits: Vec<ApiCommit> = response.json().await?;
        Ok(commits
            .into_iter()
            .map(|c| c.into_record(&self.spec.tag))
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory source: a fixed history sliced into pages.
    pub(crate) struct FakeSource {
        pub tag: String,
        pub commits: Vec<CommitRecord>,
    }

    impl FakeSource {
        pub fn with_count(tag: &str, n: usize) -> Self {
            let commits = (0..n)
                .map(|i| CommitRecord {
                    short_hash: format!("{:07x}", i),
                    timestamp_seconds: 1_700_000_000 - i as i64,
                    author_handle: format!("dev{}", i % 3),
                    raw_message: format!("fix: issue {}", i),
                    source_tag: tag.to_string(),
                })
                .collect();
            Self {
                tag: tag.to_string(),
                commits,
            }
        }
    }

    impl CommitPages for FakeSource {
        fn source_tag(&self) -> &str {
            &self.tag
        }

        async fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<CommitRecord>> {
            let start = (page - 1) * per_page;
            let end = (start + per_page).min(self.commits.len());
            if start >= self.commits.len() {
                return Ok(Vec::new());
            }
            Ok(self.commits[start..end].to_vec())
        }
    }

    #[tokio::test]
    async fn fetch_all_handles_page_boundaries() {
        // N = 0, N < P, N = P exactly, N = P + 1, N = several pages.
        for n in [0, 3, 10, 11, 25] {
            let source = FakeSource::with_count("web", n);
            let records = fetch_all(&source, 10, None).await.unwrap();
            assert_eq!(records.len(), n, "N = {}", n);

            let mut hashes: Vec<&str> = records.iter().map(|r| r.short_hash.as_str()).collect();
            hashes.dedup();
            assert_eq!(hashes.len(), n, "duplicates for N = {}", n);
        }
    }

    #[tokio::test]
    async fn fetch_all_truncates_at_max_records() {
        let source = FakeSource::with_count("web", 25);
        let records = fetch_all(&source, 10, Some(15)).await.unwrap();
        assert_eq!(records.len(), 15);
        // Ceiling hit mid-history keeps the newest records.
        assert_eq!(records[0].short_hash, "0000000");
    }

    #[tokio::test]
    async fn fetch_all_with_generous_ceiling_returns_everything() {
        let source = FakeSource::with_count("web", 7);
        let records = fetch_all(&source, 10, Some(50)).await.unwrap();
        assert_eq!(records.len(), 7);
    }
}
