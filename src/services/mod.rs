//! Business logic services

pub mod books;
pub mod shelves;
pub mod shelving;

use std::sync::Arc;

use crate::repository::LibraryRepository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub shelves: shelves::ShelvesService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Arc<dyn LibraryRepository>) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            shelves: shelves::ShelvesService::new(repository),
        }
    }
}
