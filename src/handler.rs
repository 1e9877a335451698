use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use tracing::info;
use uuid::Uuid;

use crate::api::{ApiJson, ApiPath, BOOK_DELETED, MessageResponse, StatusResponse};
use crate::catalog::Catalog;
use crate::db::Database;
use crate::error::CatalogError;
use crate::model::{Book, BookInput};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(StatusResponse::ok())
}

pub async fn create_book(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookInput>,
) -> Result<Json<Book>, CatalogError> {
    let lib = Catalog::new(state.db.connection());
    let book = lib.create_book(payload).await?;

    info!(book_id = %book.id, "created book");
    Ok(Json(book))
}

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, CatalogError> {
    let lib = Catalog::new(state.db.connection());
    let books = lib.list_books().await?;

    info!(count = books.len(), "listed books");
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Book>, CatalogError> {
    let lib = Catalog::new(state.db.connection());

    match lib.get_book(id).await? {
        Some(book) => Ok(Json(book)),
        None => {
            info!(book_id = %id, "book not found");
            Err(CatalogError::NotFound)
        }
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<BookInput>,
) -> Result<Json<Book>, CatalogError> {
    let lib = Catalog::new(state.db.connection());

    match lib.update_book(id, payload).await? {
        Some(book) => {
            info!(book_id = %id, "updated book");
            Ok(Json(book))
        }
        None => {
            info!(book_id = %id, "book not found for update");
            Err(CatalogError::NotFound)
        }
    }
}

pub async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, CatalogError> {
    let lib = Catalog::new(state.db.connection());

    if lib.delete_book(id).await? {
        info!(book_id = %id, "deleted book");
        Ok(Json(MessageResponse::new(BOOK_DELETED)))
    } else {
        info!(book_id = %id, "book not found for delete");
        Err(CatalogError::NotFound)
    }
}
