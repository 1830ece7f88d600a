//! Book catalog service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, CreateBook},
    repository::LibraryRepository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Arc<dyn LibraryRepository>,
}

impl BooksService {
    pub fn new(repository: Arc<dyn LibraryRepository>) -> Self {
        Self { repository }
    }

    /// Books whose title contains `title` and whose status equals `status`.
    ///
    /// Both comparisons ignore case; a missing or blank parameter does not filter.
    pub async fn find_by_title_and_status(
        &self,
        title: Option<&str>,
        status: Option<&str>,
    ) -> AppResult<Vec<Book>> {
        let filter = BookFilter::new(title, status);
        self.repository.list_books(&filter).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        self.repository.find_book(id).await
    }

    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.repository.create_book(data).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(book)
    }
}
