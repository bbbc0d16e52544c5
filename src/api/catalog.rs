//! Choice lists for the book form

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{Author, Genre, Language},
};

/// List authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "catalog",
    responses((status = 200, description = "Authors by last name", body = Vec<Author>))
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.services.catalog.list_authors().await?))
}

/// List languages
#[utoipa::path(
    get,
    path = "/languages",
    tag = "catalog",
    responses((status = 200, description = "Languages by name", body = Vec<Language>))
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Language>>> {
    Ok(Json(state.services.catalog.list_languages().await?))
}

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "catalog",
    responses((status = 200, description = "Genres by name", body = Vec<Genre>))
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.services.catalog.list_genres().await?))
}
