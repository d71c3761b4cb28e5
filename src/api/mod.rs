//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Prefix every API route is nested under
pub const API_PREFIX: &str = "/api/v1";

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Genres
        .route(
            "/genres",
            get(genres::list_genres_page)
                .post(genres::create_genre)
                .put(genres::rename_genre),
        )
        .route("/genres/list", get(genres::list_genres))
        .route("/genres/:id", get(genres::get_genre))
        // Books
        .route(
            "/books",
            post(books::create_book)
                .put(books::update_book)
                .patch(books::update_book_genres),
        )
        .route("/books/list", get(books::list_books))
        .route("/books/:id", get(books::get_book).delete(books::delete_book))
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
