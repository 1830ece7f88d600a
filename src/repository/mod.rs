//! Repository layer for database operations

pub mod books;
pub mod shelves;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookFilter, CreateBook},
        shelf::{CreateShelf, Shelf},
    },
};

/// Storage operations used by the services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Books matching the filter, in storage order
    async fn list_books(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    async fn find_book(&self, id: i64) -> AppResult<Option<Book>>;

    async fn create_book(&self, data: &CreateBook) -> AppResult<Book>;

    /// All shelves with their members
    async fn list_shelves(&self) -> AppResult<Vec<Shelf>>;

    async fn find_shelf(&self, id: i64) -> AppResult<Option<Shelf>>;

    async fn create_shelf(&self, data: &CreateShelf) -> AppResult<Shelf>;

    /// Persist a shelf's new capacity together with the book that joined or left it.
    ///
    /// The write only applies if the stored capacity is still `previous_capacity`;
    /// otherwise nothing is written and `AppError::Conflict` is returned.
    async fn save_membership(
        &self,
        shelf: &Shelf,
        book: &Book,
        previous_capacity: i32,
    ) -> AppResult<Shelf>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryRepository for Repository {
    async fn list_books(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        self.books_list(filter).await
    }

    async fn find_book(&self, id: i64) -> AppResult<Option<Book>> {
        self.books_get_by_id(id).await
    }

    async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        self.books_create(data).await
    }

    async fn list_shelves(&self) -> AppResult<Vec<Shelf>> {
        self.shelves_list().await
    }

    async fn find_shelf(&self, id: i64) -> AppResult<Option<Shelf>> {
        self.shelves_get_by_id(id).await
    }

    async fn create_shelf(&self, data: &CreateShelf) -> AppResult<Shelf> {
        self.shelves_create(data).await
    }

    async fn save_membership(
        &self,
        shelf: &Shelf,
        book: &Book,
        previous_capacity: i32,
    ) -> AppResult<Shelf> {
        self.shelves_save_membership(shelf, book, previous_capacity)
            .await
    }
}
