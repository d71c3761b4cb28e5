//! Genre endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::API_PREFIX;
use crate::{
    error::AppResult,
    models::{CreateGenre, Genre, GenreQuery, UpdateGenre},
    AppState,
};

/// One page of genres
#[derive(Serialize, ToSchema)]
pub struct GenrePage {
    pub items: Vec<Genre>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Rename result
#[derive(Serialize, ToSchema)]
pub struct UpdatedResponse {
    /// Number of records updated
    pub updated: u64,
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Blank name", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(data): Json<CreateGenre>,
) -> AppResult<impl IntoResponse> {
    let genre = state.services.genres.create(&data).await?;
    let location = format!("{}/genres/{}", API_PREFIX, genre.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(genre)))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = Genre),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.get_by_id(id).await?;
    Ok(Json(genre))
}

/// List all genres
#[utoipa::path(
    get,
    path = "/genres/list",
    tag = "genres",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// List genres with pagination
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    params(GenreQuery),
    responses(
        (status = 200, description = "Page of genres", body = GenrePage)
    )
)]
pub async fn list_genres_page(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> AppResult<Json<GenrePage>> {
    let (items, total) = state.services.genres.list_page(&query).await?;
    Ok(Json(GenrePage {
        items,
        total,
        page: query.page(),
        per_page: query.per_page(),
    }))
}

/// Rename a genre
#[utoipa::path(
    put,
    path = "/genres",
    tag = "genres",
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre renamed", body = UpdatedResponse),
        (status = 400, description = "Blank name", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn rename_genre(
    State(state): State<AppState>,
    Json(data): Json<UpdateGenre>,
) -> AppResult<Json<UpdatedResponse>> {
    let updated = state.services.genres.rename(&data).await?;
    Ok(Json(UpdatedResponse { updated }))
}
