//! Shelf domain methods on Repository

use std::collections::HashMap;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookStatus},
        shelf::{CreateShelf, Shelf, ShelfRow},
    },
};

impl Repository {
    /// List all shelves with their members
    pub async fn shelves_list(&self) -> AppResult<Vec<Shelf>> {
        let rows = sqlx::query_as::<_, ShelfRow>(
            "SELECT id, name, max_capacity, current_capacity FROM shelf ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut members: HashMap<i64, Vec<Book>> = HashMap::new();
        for book in self.books_on_shelves(&ids).await? {
            if let Some(shelf_id) = book.shelf_id() {
                members.entry(shelf_id).or_default().push(book);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let books = members.remove(&row.id).unwrap_or_default();
                row.with_books(books)
            })
            .collect())
    }

    /// Get shelf by ID with its members
    pub async fn shelves_get_by_id(&self, id: i64) -> AppResult<Option<Shelf>> {
        let row = sqlx::query_as::<_, ShelfRow>(
            "SELECT id, name, max_capacity, current_capacity FROM shelf WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let books = self.books_on_shelves(&[row.id]).await?;
                Ok(Some(row.with_books(books)))
            }
            None => Ok(None),
        }
    }

    /// Create an empty shelf
    pub async fn shelves_create(&self, data: &CreateShelf) -> AppResult<Shelf> {
        let row = sqlx::query_as::<_, ShelfRow>(
            r#"
            INSERT INTO shelf (name, max_capacity, current_capacity)
            VALUES ($1, $2, 0)
            RETURNING id, name, max_capacity, current_capacity
            "#,
        )
        .bind(&data.name)
        .bind(data.max_capacity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.with_books(Vec::new()))
    }

    /// Write a membership change in one transaction.
    ///
    /// Both updates are guarded: the shelf by its previous capacity, the book by its
    /// previous status. If another request got there first, the transaction is rolled back.
    pub async fn shelves_save_membership(
        &self,
        shelf: &Shelf,
        book: &Book,
        previous_capacity: i32,
    ) -> AppResult<Shelf> {
        let previous_status = match book.status {
            BookStatus::Shelved => BookStatus::NotShelved,
            BookStatus::NotShelved => BookStatus::Shelved,
        };

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE shelf SET current_capacity = $1
            WHERE id = $2 AND current_capacity = $3
            "#,
        )
        .bind(shelf.current_capacity)
        .bind(shelf.id)
        .bind(previous_capacity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict(format!(
                "Shelf {} was modified by another request",
                shelf.name
            )));
        }

        let updated = sqlx::query(
            r#"
            UPDATE book SET status = $1, shelf_id = $2
            WHERE id = $3 AND LOWER(status) = $4
            "#,
        )
        .bind(book.status.as_str())
        .bind(book.shelf_id())
        .bind(book.id)
        .bind(previous_status.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict(format!(
                "Book {} was modified by another request",
                book.title
            )));
        }

        tx.commit().await?;

        self.shelves_get_by_id(shelf.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shelf {} not found", shelf.id)))
    }
}
