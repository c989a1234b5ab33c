//! Contributor ranking endpoint.
//!
//! - GET /api/v1/contributors?all=
//!   Ranked by commit count over the current update set; display names
//!   (handles containing whitespace) are excluded.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::feed::SharedFeed;
use crate::models::Contributor;

pub fn routes(feed: SharedFeed) -> Router {
    Router::new()
        .route("/api/v1/contributors", get(get_contributors))
        .with_state(feed)
}

#[derive(Debug, Deserialize)]
struct ContributorsQuery {
    /// Aggregate over full history instead of the recent window.
    #[serde(default)]
    all: bool,
}

async fn get_contributors(
    State(feed): State<SharedFeed>,
    Query(query): Query<ContributorsQuery>,
) -> Result<Json<Vec<Contributor>>> {
    let contributors = feed.get_unique_contributors(query.all).await?;
    Ok(Json(contributors))
}
