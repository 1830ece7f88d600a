//! Shelf ("library") endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::BookRef,
        shelf::{CreateShelf, Shelf},
    },
};

/// List all shelves
#[utoipa::path(
    get,
    path = "/api/libraries",
    tag = "libraries",
    responses(
        (status = 200, description = "All shelves with their books", body = Vec<Shelf>)
    )
)]
pub async fn list_shelves(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Shelf>>> {
    let shelves = state.services.shelves.list().await?;
    Ok(Json(shelves))
}

/// Get shelf by ID
#[utoipa::path(
    get,
    path = "/api/libraries/{id}",
    tag = "libraries",
    params(("id" = i64, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Shelf details", body = Shelf),
        (status = 404, description = "Shelf not found, empty body")
    )
)]
pub async fn get_shelf(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    Ok(match state.services.shelves.find_by_id(id).await? {
        Some(shelf) => Json(shelf).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// Create a shelf
#[utoipa::path(
    post,
    path = "/api/libraries",
    tag = "libraries",
    request_body = CreateShelf,
    responses(
        (status = 201, description = "Shelf created", body = Shelf),
        (status = 400, description = "Invalid fields, as a field to message map")
    )
)]
pub async fn create_shelf(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateShelf>,
) -> AppResult<(StatusCode, Json<Shelf>)> {
    let shelf = state.services.shelves.create(&data).await?;
    Ok((StatusCode::CREATED, Json(shelf)))
}

/// Put a book on a shelf
#[utoipa::path(
    put,
    path = "/api/libraries/{id}/addBook",
    tag = "libraries",
    params(("id" = i64, Path, description = "Shelf ID")),
    request_body(content = BookRef, description = "Book JSON; only `id` is read"),
    responses(
        (status = 200, description = "Updated shelf", body = Shelf),
        (status = 404, description = "Missing shelf or book, as a single-key message map"),
        (status = 409, description = "Shelving rule failed, as a single-key message map")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(book): Json<BookRef>,
) -> AppResult<Json<Shelf>> {
    let shelf = state.services.shelves.add_book(id, book.id).await?;
    Ok(Json(shelf))
}

/// Take a book off a shelf
#[utoipa::path(
    delete,
    path = "/api/libraries/{id}/removeBook",
    tag = "libraries",
    params(("id" = i64, Path, description = "Shelf ID")),
    request_body(content = BookRef, description = "Book JSON; only `id` is read"),
    responses(
        (status = 200, description = "Updated shelf", body = Shelf),
        (status = 404, description = "Missing shelf or book, as a single-key message map"),
        (status = 409, description = "Book is not on the shelf, as a single-key message map")
    )
)]
pub async fn remove_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(book): Json<BookRef>,
) -> AppResult<Json<Shelf>> {
    let shelf = state.services.shelves.remove_book(id, book.id).await?;
    Ok(Json(shelf))
}
