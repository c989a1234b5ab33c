//! Pipeline facade: the only surface the route layer is allowed to call.
//!
//! Wires the configured sources, the TTL cache, and the assembler together.
//! The cache is constructor-injected, never ambient state; updates are
//! always rebuilt fresh from the cached commit records.

use std::sync::Arc;

use reqwest::Client;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::feed::assemble::build_feed;
use crate::feed::cache::{CacheKey, FeedCache};
use crate::feed::contributors::aggregate;
use crate::feed::fetcher::fetch_all_sources;
use crate::feed::source::GithubSource;
use crate::models::{Contributor, FeedStatus, Update, UpdateType};

pub struct FeedPipeline {
    sources: Vec<GithubSource>,
    source_tags: Vec<String>,
    cache: FeedCache,
    recent_window: usize,
}

impl FeedPipeline {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::new();
        let source_tags: Vec<String> = config.sources.iter().map(|s| s.tag.clone()).collect();
        let sources = config
            .sources
            .iter()
            .map(|spec| {
                GithubSource::new(
                    client.clone(),
                    &config.api_base,
                    spec.clone(),
                    config.token.clone(),
                )
            })
            .collect();

        Ok(Self {
            sources,
            source_tags,
            cache: FeedCache::new(config.cache_ttl),
            recent_window: config.recent_window,
        })
    }

    /// The classified update feed, newest first.
    ///
    /// `fetch_all` selects the full-history scope; otherwise only the most
    /// recent `recent_count` commits per source are retrieved. The two
    /// scopes are cached independently.
    pub async fn get_all_updates(&self, fetch_all: bool, recent_count: usize) -> Result<Vec<Update>> {
        let (key, max_per_source) = if fetch_all {
            (CacheKey::AllHistory, None)
        } else {
            (CacheKey::Recent(recent_count), Some(recent_count))
        };

        let commits = self
            .cache
            .get_or_fetch(key, || fetch_all_sources(&self.sources, max_per_source))
            .await?;
        Ok(build_feed(&commits))
    }

    pub async fn get_updates_by_kind(
        &self,
        kind: UpdateType,
        fetch_all: bool,
        recent_count: usize,
    ) -> Result<Vec<Update>> {
        let updates = self.get_all_updates(fetch_all, recent_count).await?;
        Ok(updates.into_iter().filter(|u| u.kind == kind).collect())
    }

    pub async fn get_updates_by_category(
        &self,
        category: &str,
        fetch_all: bool,
        recent_count: usize,
    ) -> Result<Vec<Update>> {
        let updates = self.get_all_updates(fetch_all, recent_count).await?;
        Ok(updates
            .into_iter()
            .filter(|u| u.category.eq_ignore_ascii_case(category))
            .collect())
    }

    /// Ranked contributor list over the current update set.
    pub async fn get_unique_contributors(&self, search_all: bool) -> Result<Vec<Contributor>> {
        let updates = self.get_all_updates(search_all, self.recent_window).await?;
        Ok(aggregate(&updates))
    }

    /// Whole-store cache reset; the next request refetches.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }

    pub fn recent_window(&self) -> usize {
        self.recent_window
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus {
            sources: self.source_tags.clone(),
            cached_entries: self.cache.live_entries(),
            recent_window: self.recent_window,
        }
    }
}

pub type SharedFeed = Arc<FeedPipeline>;
