//! Shelf service: listing, creation and book assignment

use std::sync::Arc;

use validator::Validate;

use super::shelving::{self, PLACE_RULES, TAKE_RULES};
use crate::{
    error::{AppError, AppResult, ShelvingError},
    models::{
        shelf::{CreateShelf, Shelf},
        Book,
    },
    repository::LibraryRepository,
};

#[derive(Clone)]
pub struct ShelvesService {
    repository: Arc<dyn LibraryRepository>,
}

impl ShelvesService {
    pub fn new(repository: Arc<dyn LibraryRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Shelf>> {
        self.repository.list_shelves().await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Shelf>> {
        self.repository.find_shelf(id).await
    }

    pub async fn create(&self, data: &CreateShelf) -> AppResult<Shelf> {
        data.validate()?;
        let shelf = self.repository.create_shelf(data).await?;
        tracing::info!("Created shelf {} ({})", shelf.id, shelf.name);
        Ok(shelf)
    }

    /// Place a book on a shelf.
    ///
    /// Missing entities are reported before state rules; capacity is checked before the
    /// book is looked up.
    pub async fn add_book(&self, shelf_id: i64, book_id: i64) -> AppResult<Shelf> {
        let mut shelf = self.load_shelf(shelf_id).await?;
        shelving::ensure_capacity(&shelf)?;
        let book = self.load_book(book_id).await?;
        shelving::check(PLACE_RULES, &shelf, &book)?;

        let previous_capacity = shelf.current_capacity;
        let book = shelving::place(&mut shelf, book);
        let saved = self
            .repository
            .save_membership(&shelf, &book, previous_capacity)
            .await?;

        tracing::info!(
            shelf_id,
            book_id,
            current_capacity = saved.current_capacity,
            "Book placed on shelf"
        );
        Ok(saved)
    }

    /// Take a book off a shelf
    pub async fn remove_book(&self, shelf_id: i64, book_id: i64) -> AppResult<Shelf> {
        let mut shelf = self.load_shelf(shelf_id).await?;
        let book = self.load_book(book_id).await?;
        shelving::check(TAKE_RULES, &shelf, &book)?;

        let previous_capacity = shelf.current_capacity;
        let book = shelving::take(&mut shelf, book);
        let saved = self
            .repository
            .save_membership(&shelf, &book, previous_capacity)
            .await?;

        tracing::info!(
            shelf_id,
            book_id,
            current_capacity = saved.current_capacity,
            "Book taken off shelf"
        );
        Ok(saved)
    }

    async fn load_shelf(&self, id: i64) -> AppResult<Shelf> {
        self.repository
            .find_shelf(id)
            .await?
            .ok_or_else(|| AppError::Shelving(ShelvingError::ShelfNotFound(id)))
    }

    async fn load_book(&self, id: i64) -> AppResult<Book> {
        self.repository
            .find_book(id)
            .await?
            .ok_or_else(|| AppError::Shelving(ShelvingError::BookNotFound(id)))
    }
}
