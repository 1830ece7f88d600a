//! Shelf model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Shelf with its member books
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
    /// Number of books on the shelf, equal to `books.len()` after every mutation
    pub current_capacity: i32,
    pub books: Vec<Book>,
}

impl Shelf {
    pub fn contains(&self, book_id: i64) -> bool {
        self.books.iter().any(|b| b.id == book_id)
    }

    pub fn is_full(&self) -> bool {
        self.current_capacity >= self.max_capacity
    }
}

/// Shelf row without members
#[derive(Debug, Clone, FromRow)]
pub struct ShelfRow {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
    pub current_capacity: i32,
}

impl ShelfRow {
    pub fn with_books(self, books: Vec<Book>) -> Shelf {
        Shelf {
            id: self.id,
            name: self.name,
            max_capacity: self.max_capacity,
            current_capacity: self.current_capacity,
            books,
        }
    }
}

/// Create shelf request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShelf {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Maximum capacity cannot be negative"))]
    pub max_capacity: i32,
}
