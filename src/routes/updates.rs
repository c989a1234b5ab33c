//! Update feed endpoint.
//!
//! - GET /api/v1/updates?all=&recent=&page=&page_size=&kind=&category=
//!   Returns one page of the classified feed, newest first. `kind` and
//!   `category` are optional filters applied before pagination; when both
//!   are given, both must match.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::feed::assemble::paginate;
use crate::feed::SharedFeed;
use crate::models::{Update, UpdateListResponse, UpdateType};

pub fn routes(feed: SharedFeed) -> Router {
    Router::new()
        .route("/api/v1/updates", get(get_updates))
        .with_state(feed)
}

#[derive(Debug, Deserialize)]
struct UpdatesQuery {
    /// Fetch full history instead of the recent window.
    #[serde(default)]
    all: bool,
    /// Recent-window size; defaults to the configured window.
    recent: Option<usize>,
    #[serde(default)]
    page: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
    kind: Option<String>,
    category: Option<String>,
}

fn default_page_size() -> usize {
    20
}

async fn get_updates(
    State(feed): State<SharedFeed>,
    Query(query): Query<UpdatesQuery>,
) -> Result<Json<UpdateListResponse>> {
    let recent = query.recent.unwrap_or(feed.recent_window());

    let mut updates: Vec<Update> = match (&query.kind, &query.category) {
        (Some(kind), _) => {
            let kind = UpdateType::from_str(kind).map_err(AppError::BadRequest)?;
            feed.get_updates_by_kind(kind, query.all, recent).await?
        }
        (None, Some(category)) => {
            feed.get_updates_by_category(category, query.all, recent)
                .await?
        }
        (None, None) => feed.get_all_updates(query.all, recent).await?,
    };
    // Second filter for the kind-plus-category combination.
    if query.kind.is_some() {
        if let Some(category) = &query.category {
            updates.retain(|u| matches_category(u, category));
        }
    }

    let total = updates.len();
    let page = paginate(&updates, query.page, query.page_size);
    let has_more = page_has_more(query.page, query.page_size, total);

    Ok(Json(UpdateListResponse {
        updates: page.to_vec(),
        total,
        has_more,
    }))
}

/// Whether pages past `page` remain. Query values are caller-controlled, so
/// the arithmetic saturates instead of overflowing.
fn page_has_more(page: usize, page_size: usize, total: usize) -> bool {
    page.saturating_add(1).saturating_mul(page_size) < total
}

fn matches_category(update: &Update, category: &str) -> bool {
    update.category.eq_ignore_ascii_case(category)
}
