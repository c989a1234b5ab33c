//! API route handlers - maps HTTP endpoints to feed operations.
//!
//! Each submodule defines routes for a feature area:
//! - `updates`: Paginated, filtered update feed
//! - `contributors`: Ranked contributor list
//! - `status`: Feed status and cache control

pub mod contributors;
pub mod status;
pub mod updates;

use axum::Router;

use crate::feed::SharedFeed;

pub fn create_router(feed: SharedFeed) -> Router {
    Router::new()
        .merge(updates::routes(feed.clone()))
        .merge(contributors::routes(feed.clone()))
        .merge(status::routes(feed))
}
