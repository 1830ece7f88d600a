//! Shelf assignment rules and mutations.
//!
//! Placing or taking a book is checked against an ordered table of named rules.
//! The first rule that fails decides the rejection; later rules are not evaluated.
//! Mutations keep the book's status, the shelf's capacity and its member list in step.

use crate::{
    error::ShelvingError,
    models::{Book, BookStatus, Shelf, ShelfRef},
};

pub type Rule = fn(&Shelf, &Book) -> Result<(), ShelvingError>;

/// Rules checked before a book is placed on a shelf, in order
pub const PLACE_RULES: &[(&str, Rule)] = &[
    ("not_already_member", not_already_member as Rule),
    ("not_shelved_elsewhere", not_shelved_elsewhere as Rule),
];

/// Rules checked before a book is taken off a shelf, in order
pub const TAKE_RULES: &[(&str, Rule)] = &[("is_member", is_member as Rule)];

/// Capacity is checked on its own, before the book is even looked up
pub fn ensure_capacity(shelf: &Shelf) -> Result<(), ShelvingError> {
    if shelf.is_full() {
        tracing::debug!(shelf_id = shelf.id, rule = "has_capacity", "Shelving rejected");
        return Err(ShelvingError::ShelfFull {
            shelf: shelf.name.clone(),
        });
    }
    Ok(())
}

/// Evaluate `rules` in order, stopping at the first failure
pub fn check(rules: &[(&str, Rule)], shelf: &Shelf, book: &Book) -> Result<(), ShelvingError> {
    for (name, rule) in rules {
        if let Err(rejection) = rule(shelf, book) {
            tracing::debug!(
                shelf_id = shelf.id,
                book_id = book.id,
                rule = *name,
                "Shelving rejected"
            );
            return Err(rejection);
        }
    }
    Ok(())
}

fn not_already_member(shelf: &Shelf, book: &Book) -> Result<(), ShelvingError> {
    if shelf.contains(book.id) {
        return Err(ShelvingError::AlreadyInShelf {
            book: book.title.clone(),
            shelf: shelf.name.clone(),
        });
    }
    Ok(())
}

fn not_shelved_elsewhere(_shelf: &Shelf, book: &Book) -> Result<(), ShelvingError> {
    if book.is_shelved() {
        let current = book
            .shelf
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "unknown".to_string());
        return Err(ShelvingError::AlreadyShelved {
            book: book.title.clone(),
            shelf: current,
        });
    }
    Ok(())
}

fn is_member(shelf: &Shelf, book: &Book) -> Result<(), ShelvingError> {
    if !shelf.contains(book.id) {
        return Err(ShelvingError::NotInShelf {
            book: book.title.clone(),
            shelf: shelf.name.clone(),
        });
    }
    Ok(())
}

/// Put `book` on `shelf`, returning the book as it now stands
pub fn place(shelf: &mut Shelf, mut book: Book) -> Book {
    book.status = BookStatus::Shelved;
    book.shelf = Some(ShelfRef {
        id: shelf.id,
        name: shelf.name.clone(),
    });
    shelf.current_capacity += 1;
    shelf.books.push(book.clone());
    book
}

/// Remove `book` from `shelf`, returning the book as it now stands
pub fn take(shelf: &mut Shelf, mut book: Book) -> Book {
    shelf.books.retain(|b| b.id != book.id);
    shelf.current_capacity -= 1;
    book.status = BookStatus::NotShelved;
    book.shelf = None;
    book
}
