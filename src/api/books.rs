//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{ApiError, ErrorEnvelope},
    models::book::{BookRequest, BookResponse, NewBook},
    AppState,
};

use super::{DebugId, JsonBody};

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN"),
        ("x-debug-id" = Option<String>, Header, description = "Correlation id echoed in error responses")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorEnvelope)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    debug_id: DebugId,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .services
        .catalog
        .find_by_isbn(&isbn)
        .await
        .map_err(|e| state.reject(&debug_id, e))?;
    Ok(Json(book.into()))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book created", body = BookResponse),
        (status = 400, description = "Malformed request body", body = ErrorEnvelope)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    debug_id: DebugId,
    JsonBody(request): JsonBody<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = NewBook::try_from(request).map_err(|e| ApiError::malformed(debug_id.or_generate(), e))?;
    let created = state
        .services
        .catalog
        .create(book)
        .await
        .map_err(|e| state.reject(&debug_id, e))?;
    Ok(Json(created.into()))
}

/// Delete a book by ISBN, returning the removed record
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN"),
        ("x-debug-id" = Option<String>, Header, description = "Correlation id echoed in error responses")
    ),
    responses(
        (status = 200, description = "Book deleted", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorEnvelope)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    debug_id: DebugId,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .services
        .catalog
        .delete_by_isbn(&isbn)
        .await
        .map_err(|e| state.reject(&debug_id, e))?;
    Ok(Json(book.into()))
}
