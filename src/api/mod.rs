//! API handlers for Shelfmark REST endpoints

pub mod books;
pub mod health;
pub mod libraries;
pub mod openapi;

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book))
        // Shelves
        .route(
            "/libraries",
            get(libraries::list_shelves).post(libraries::create_shelf),
        )
        .route("/libraries/:id", get(libraries::get_shelf))
        .route("/libraries/:id/addBook", put(libraries::add_book))
        .route("/libraries/:id/removeBook", delete(libraries::remove_book))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
