//! Book model and related types

use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Shelving status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Shelved,
    #[default]
    NotShelved,
}

impl BookStatus {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Shelved => "shelved",
            BookStatus::NotShelved => "not_shelved",
        }
    }

    /// Case-insensitive parse, `None` for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("shelved") {
            Some(BookStatus::Shelved)
        } else if value.eq_ignore_ascii_case("not_shelved") {
            Some(BookStatus::NotShelved)
        } else {
            None
        }
    }
}

impl From<&str> for BookStatus {
    fn from(s: &str) -> Self {
        BookStatus::parse(s).unwrap_or_default()
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shelf a book belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfRef {
    pub id: i64,
    pub name: String,
}

/// Book record.
///
/// The shelf relation is stored once; `shelfId` in the JSON form is derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
    #[serde(rename = "shelfId", serialize_with = "serialize_shelf_id")]
    #[schema(value_type = Option<i64>)]
    pub shelf: Option<ShelfRef>,
}

fn serialize_shelf_id<S: Serializer>(shelf: &Option<ShelfRef>, s: S) -> Result<S::Ok, S::Error> {
    match shelf {
        Some(shelf) => s.serialize_some(&shelf.id),
        None => s.serialize_none(),
    }
}

impl Book {
    pub fn shelf_id(&self) -> Option<i64> {
        self.shelf.as_ref().map(|s| s.id)
    }

    pub fn is_shelved(&self) -> bool {
        self.status == BookStatus::Shelved
    }
}

/// Book row joined with its shelf
#[derive(Debug, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub status: String,
    pub shelf_id: Option<i64>,
    pub shelf_name: Option<String>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let shelf = match (row.shelf_id, row.shelf_name) {
            (Some(id), Some(name)) => Some(ShelfRef { id, name }),
            _ => None,
        };
        Self {
            id: row.id,
            isbn: row.isbn,
            title: row.title,
            author: row.author,
            status: BookStatus::from(row.status.as_str()),
            shelf,
        }
    }
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// `shelved` or `not_shelved`, case-insensitive
    pub status: Option<String>,
}

/// Normalized book filter; blank parameters mean "no filter"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub status: Option<String>,
}

impl BookFilter {
    pub fn new(title: Option<&str>, status: Option<&str>) -> Self {
        fn present(value: Option<&str>) -> Option<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        }
        Self {
            title: present(title),
            status: present(status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        BookFilter::new(query.title.as_deref(), query.status.as_deref())
    }
}

/// Book reference in request bodies; only `id` is read
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookRef {
    pub id: i64,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Only `not_shelved` is accepted: a new book is on no shelf
    #[validate(custom(function = "validate_new_status"))]
    pub status: Option<String>,
}

fn validate_new_status(status: &str) -> Result<(), ValidationError> {
    let message = match BookStatus::parse(status) {
        Some(BookStatus::NotShelved) => return Ok(()),
        Some(BookStatus::Shelved) => "A new book cannot be shelved before it is placed on a shelf",
        None => "Status must be shelved or not_shelved",
    };
    let mut error = ValidationError::new("status");
    error.message = Some(message.into());
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: 1,
            isbn: "9876".into(),
            title: "Space 1".into(),
            author: "Khotim".into(),
            status: BookStatus::NotShelved,
            shelf: None,
        }
    }

    #[test]
    fn test_status_parse_ignores_case() {
        assert_eq!(BookStatus::parse("SHELVED"), Some(BookStatus::Shelved));
        assert_eq!(BookStatus::parse("Not_Shelved"), Some(BookStatus::NotShelved));
        assert_eq!(BookStatus::parse("lost"), None);
        assert_eq!(BookStatus::from("lost"), BookStatus::NotShelved);
    }

    #[test]
    fn test_book_json_shape() {
        let mut book = book();
        book.shelf = Some(ShelfRef {
            id: 4,
            name: "Shelf A".into(),
        });
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["shelfId"], 4);
        assert_eq!(json["status"], "not_shelved");
        assert!(json.get("shelf").is_none());
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_book_json_without_shelf() {
        let json = serde_json::to_value(book()).unwrap();
        assert!(json["shelfId"].is_null());
    }

    #[test]
    fn test_row_converts_status_and_shelf() {
        let book: Book = BookRow {
            id: 2,
            isbn: "1234".into(),
            title: "Space 2".into(),
            author: "Khotim".into(),
            status: "SHELVED".into(),
            shelf_id: Some(9),
            shelf_name: Some("Shelf B".into()),
        }
        .into();
        assert_eq!(book.status, BookStatus::Shelved);
        assert_eq!(book.shelf_id(), Some(9));
    }

    #[test]
    fn test_filter_blank_values_are_absent() {
        assert!(BookFilter::new(Some(""), Some("  ")).is_empty());
        let filter = BookFilter::new(Some("space"), None);
        assert_eq!(filter.title.as_deref(), Some("space"));
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_filter_keeps_surrounding_whitespace() {
        let filter = BookFilter::new(Some("Space "), Some(" shelved"));
        assert_eq!(filter.title.as_deref(), Some("Space "));
        assert_eq!(filter.status.as_deref(), Some(" shelved"));
    }

    #[test]
    fn test_book_ref_ignores_other_fields() {
        let r: BookRef =
            serde_json::from_str(r#"{"id":3,"title":"x","status":"shelved","shelfId":1}"#).unwrap();
        assert_eq!(r.id, 3);
    }

    #[test]
    fn test_create_book_validation() {
        let ok = CreateBook {
            isbn: "1".into(),
            title: "T".into(),
            author: "A".into(),
            status: Some("NOT_SHELVED".into()),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateBook {
            isbn: "".into(),
            title: "T".into(),
            author: "A".into(),
            status: Some("shelved".into()),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("isbn"));
        assert!(fields.contains_key("status"));
    }
}
