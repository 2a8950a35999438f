//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Catalog entry as stored in the `libros` table.
///
/// The serde names are the wire names used by the JSON API. Absent fields
/// decode to their zero value (`Prestado` to `"No"`), and the lowercase
/// spellings used by the listing are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(default)]
pub struct Book {
    /// Store-assigned identifier. Ignored on input, defaults to 0.
    #[serde(rename = "Id", alias = "id")]
    pub id: i32,
    #[serde(rename = "Titulo", alias = "titulo")]
    pub title: String,
    #[serde(rename = "Autor", alias = "autor")]
    pub author: String,
    #[serde(rename = "AnioPublicacion", alias = "anioPublicacion", alias = "aniopublicacion")]
    pub publication_year: i32,
    #[serde(rename = "Editorial", alias = "editorial")]
    pub publisher: String,
    /// Loan status token ("Si" or "No")
    #[serde(rename = "Prestado", alias = "prestado")]
    #[schema(value_type = String, example = "No")]
    pub borrowed: BorrowStatus,
}

impl Book {
    /// Build a full record from the writable fields and an identifier.
    pub fn with_id(id: i32, data: NewBook) -> Self {
        Self {
            id,
            title: data.title,
            author: data.author,
            publication_year: data.publication_year,
            publisher: data.publisher,
            borrowed: data.borrowed,
        }
    }

    /// Writable fields of this record, dropping the identifier.
    pub fn to_new(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            publication_year: self.publication_year,
            publisher: self.publisher.clone(),
            borrowed: self.borrowed,
        }
    }
}

/// Fields supplied when inserting a book; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub publisher: String,
    pub borrowed: BorrowStatus,
}

/// Reduced projection returned by the JSON listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "prestado")]
    #[schema(value_type = String, example = "No")]
    pub borrowed: BorrowStatus,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            author: book.author,
            title: book.title,
            borrowed: book.borrowed,
        }
    }
}

/// Catalog counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub total: i64,
    pub available: i64,
    pub borrowed: i64,
}

// ---------------------------------------------------------------------------
// BorrowStatus
// ---------------------------------------------------------------------------

/// Loan status of a book, stored and exchanged as a text token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BorrowStatus {
    Borrowed,
    #[default]
    Available,
}

/// Returned when a text token is not a known loan status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid borrow status '{0}', expected 'Si' or 'No'")]
pub struct InvalidBorrowStatus(pub String);

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Borrowed => "Si",
            BorrowStatus::Available => "No",
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, BorrowStatus::Borrowed)
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = InvalidBorrowStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "si" | "sí" | "yes" | "true" | "1" => Ok(BorrowStatus::Borrowed),
            "no" | "false" | "0" => Ok(BorrowStatus::Available),
            _ => Err(InvalidBorrowStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for BorrowStatus {
    type Error = InvalidBorrowStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BorrowStatus> for &'static str {
    fn from(status: BorrowStatus) -> Self {
        status.as_str()
    }
}

// SQLx conversion for BorrowStatus
impl sqlx::Type<Postgres> for BorrowStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BorrowStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl Encode<'_, Postgres> for BorrowStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        Book {
            id: 7,
            title: "Rayuela".to_string(),
            author: "Julio Cortázar".to_string(),
            publication_year: 1963,
            publisher: "Sudamericana".to_string(),
            borrowed: BorrowStatus::Available,
        }
    }

    #[test]
    fn test_borrow_status_tokens() {
        assert_eq!("Si".parse::<BorrowStatus>(), Ok(BorrowStatus::Borrowed));
        assert_eq!(" sí ".parse::<BorrowStatus>(), Ok(BorrowStatus::Borrowed));
        assert_eq!("NO".parse::<BorrowStatus>(), Ok(BorrowStatus::Available));
        assert!("maybe".parse::<BorrowStatus>().is_err());
        assert_eq!(BorrowStatus::Borrowed.to_string(), "Si");
    }

    #[test]
    fn test_book_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "Id": 7,
                "Titulo": "Rayuela",
                "Autor": "Julio Cortázar",
                "AnioPublicacion": 1963,
                "Editorial": "Sudamericana",
                "Prestado": "No"
            })
        );
    }

    #[test]
    fn test_book_id_defaults_to_zero() {
        let book: Book = serde_json::from_value(json!({
            "Titulo": "T",
            "Autor": "A",
            "AnioPublicacion": 2020,
            "Editorial": "P",
            "Prestado": "si"
        }))
        .unwrap();
        assert_eq!(book.id, 0);
        assert_eq!(book.borrowed, BorrowStatus::Borrowed);
    }

    #[test]
    fn test_absent_fields_take_zero_values() {
        let book: Book = serde_json::from_value(json!({"Autor": "A", "titulo": "T"})).unwrap();
        assert_eq!(book.author, "A");
        assert_eq!(book.title, "T");
        assert_eq!(book.publication_year, 0);
        assert_eq!(book.publisher, "");
        assert_eq!(book.borrowed, BorrowStatus::Available);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_value::<Book>(json!({
            "Titulo": "T",
            "Autor": "A",
            "AnioPublicacion": 2020,
            "Editorial": "P",
            "Prestado": "lost"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_projection() {
        let value = serde_json::to_value(BookSummary::from(sample())).unwrap();
        assert_eq!(
            value,
            json!({"autor": "Julio Cortázar", "titulo": "Rayuela", "prestado": "No"})
        );
    }
}
