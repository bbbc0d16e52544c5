//! Home page statistics endpoint

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, services::stats::IndexStats};

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Text to look for in book titles (default "of")
    pub title_contains: Option<String>,
}

/// Get home page counts
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    params(StatsQuery),
    responses((status = 200, description = "Catalog counts", body = IndexStats))
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<IndexStats>> {
    let needle = query.title_contains.as_deref().unwrap_or("of");
    Ok(Json(state.services.stats.index(needle).await?))
}
