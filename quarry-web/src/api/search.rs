//! Search page
//!
//! `GET {base}?q=...&p=...`. Without a query the empty search form is
//! rendered and the backend is never called.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::presenter::{empty_view, present};
use crate::query::build_query;
use crate::AppState;

/// Query parameters for the search page
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search terms
    pub q: Option<String>,

    /// Requested page (1-indexed, free text; invalid values mean page 1)
    pub p: Option<String>,
}

/// GET {base}
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Html<String>> {
    let Some(q) = params.q.filter(|q| !q.is_empty()) else {
        return Ok(Html(state.renderer.render(&empty_view(&state.config))));
    };

    let request = build_query(&q, params.p.as_deref(), &state.config);
    debug!(query = %q, page = ?params.p, start = request.start, "Search request");

    // Backend failures short-circuit before the presenter runs
    let response = state.backend.search(&request.url).await?;

    let view = present(&q, &response.response, &state.config);
    Ok(Html(state.renderer.render(&view)))
}
