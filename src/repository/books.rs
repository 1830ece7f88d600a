//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, BookRow, BookStatus, CreateBook},
};

/// Book columns joined with the owning shelf's name
pub(super) const BOOK_SELECT: &str = r#"
    SELECT b.id, b.isbn, b.title, b.author, b.status,
           s.id AS shelf_id, s.name AS shelf_name
    FROM book b
    LEFT JOIN shelf s ON s.id = b.shelf_id
"#;

impl Repository {
    /// List books, filtering by title substring and status (both case-insensitive)
    pub async fn books_list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let query = format!(
            r#"{BOOK_SELECT}
            WHERE ($1::text IS NULL OR POSITION(LOWER($1) IN LOWER(b.title)) > 0)
              AND ($2::text IS NULL OR LOWER(b.status) = LOWER($2))
            ORDER BY b.id"#
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(&filter.title)
            .bind(&filter.status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let query = format!("{BOOK_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    /// Members of the given shelves, ordered by book id
    pub async fn books_on_shelves(&self, shelf_ids: &[i64]) -> AppResult<Vec<Book>> {
        let query = format!("{BOOK_SELECT} WHERE b.shelf_id = ANY($1) ORDER BY b.id");
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(shelf_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// Create book, always unshelved
    pub async fn books_create(&self, data: &CreateBook) -> AppResult<Book> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO book (isbn, title, author, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.isbn)
        .bind(&data.title)
        .bind(&data.author)
        .bind(BookStatus::NotShelved.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Book {
            id,
            isbn: data.isbn.clone(),
            title: data.title.clone(),
            author: data.author.clone(),
            status: BookStatus::NotShelved,
            shelf: None,
        })
    }
}
