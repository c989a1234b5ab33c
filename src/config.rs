//! Feed configuration: which upstream repositories to poll and how.
//!
//! Sources are given on the command line as `owner/repo` (optionally
//! `owner/repo=tag` to override the tag used in merged records). The bearer
//! token is read from the environment so it never appears in process
//! listings.

use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const TOKEN_ENV_VAR: &str = "UPDATE_FEED_TOKEN";

/// One configured upstream repository.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub owner: String,
    pub repo: String,
    /// Tag stamped onto every record from this source; defaults to the repo
    /// name.
    pub tag: String,
}

impl SourceSpec {
    /// Parse `owner/repo` or `owner/repo=tag`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (path, tag) = match raw.split_once('=') {
            Some((path, tag)) => (path, Some(tag)),
            None => (raw, None),
        };

        let (owner, repo) = path
            .split_once('/')
            .ok_or_else(|| AppError::BadRequest(format!("invalid source '{}': expected owner/repo", raw)))?;

        if owner.is_empty() || repo.is_empty() {
            return Err(AppError::BadRequest(format!(
                "invalid source '{}': expected owner/repo",
                raw
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            tag: tag.unwrap_or(repo).to_string(),
        })
    }
}

/// Everything the pipeline needs to reach its upstreams.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub sources: Vec<SourceSpec>,
    pub api_base: String,
    pub token: Option<String>,
    /// Size of the "recent window" scope.
    pub recent_window: usize,
    pub cache_ttl: Duration,
}

impl FeedConfig {
    pub fn new(sources: Vec<SourceSpec>) -> Self {
        Self {
            sources,
            api_base: DEFAULT_API_BASE.to_string(),
            token: std::env::var(TOKEN_ENV_VAR).ok(),
            recent_window: 30,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_repo() {
        let spec = SourceSpec::parse("acme/platform").unwrap();
        assert_eq!(spec.owner, "acme");
        assert_eq!(spec.repo, "platform");
        assert_eq!(spec.tag, "platform");
    }

    #[test]
    fn parses_explicit_tag() {
        let spec = SourceSpec::parse("acme/platform-web=web").unwrap();
        assert_eq!(spec.tag, "web");
    }

    #[test]
    fn rejects_missing_slash() {
        assert!(SourceSpec::parse("platform").is_err());
        assert!(SourceSpec::parse("/repo").is_err());
        assert!(SourceSpec::parse("owner/").is_err());
    }
}
