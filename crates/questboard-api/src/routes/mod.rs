//! Route modules organized by bounded context.

use axum::Router;
use questboard_core::types::Page;
use serde::Deserialize;

use crate::state::AppState;

pub mod character;
pub mod health;
pub mod quest;

/// `?skip=&limit=` query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Rows to skip, default 0.
    pub skip: Option<i64>,
    /// Maximum rows, default 100.
    pub limit: Option<i64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(params.skip, params.limit)
    }
}

/// The full route tree, without middleware or state.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/characters", character::router())
        .nest("/api/v1/quests", quest::router())
}
