//! Feed status and cache control.
//!
//! - GET /api/v1/status
//!   Configured sources, live cache entries, recent-window size.
//! - POST /api/v1/cache/clear
//!   Whole-store cache reset; the next feed request refetches.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::feed::SharedFeed;
use crate::models::FeedStatus;

pub fn routes(feed: SharedFeed) -> Router {
    Router::new()
        .route("/api/v1/status", get(get_status))
        .route("/api/v1/cache/clear", post(clear_cache))
        .with_state(feed)
}

async fn get_status(State(feed): State<SharedFeed>) -> Result<Json<FeedStatus>> {
    Ok(Json(feed.status()))
}

async fn clear_cache(State(feed): State<SharedFeed>) -> Result<Json<()>> {
    feed.clear_cache()?;
    Ok(Json(()))
}
