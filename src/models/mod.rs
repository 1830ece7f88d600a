//! Data models for Shelfmark

pub mod book;
pub mod shelf;

// Re-export commonly used types
pub use book::{Book, BookStatus, ShelfRef};
pub use shelf::Shelf;
