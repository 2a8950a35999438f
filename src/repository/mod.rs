//! Repository layer for database operations
//!
//! Every storage operation scopes its own connection: it is acquired when the
//! call starts and handed back when the call returns, whatever the outcome.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use thiserror::Error;

use crate::models::{Book, CatalogSummary, NewBook};

pub use memory::InMemoryBooksRepository;
pub use postgres::PgBooksRepository;

/// Failures raised by the book store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("book store unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("book query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("book insert failed: {0}")]
    Insert(#[source] sqlx::Error),

    #[error("update of book {id} failed: {source}")]
    Update {
        id: i32,
        #[source]
        source: sqlx::Error,
    },

    #[error("delete of book {id} failed: {source}")]
    Delete {
        id: i32,
        #[source]
        source: sqlx::Error,
    },

    #[error("book {0} not found")]
    NotFound(i32),
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD access to the `libros` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    /// All books in the store's natural order. Empty table yields an empty list.
    async fn list_all(&self) -> StoreResult<Vec<Book>>;

    /// Exactly one book by primary key, `NotFound` when no row matches.
    async fn get_by_id(&self, id: i32) -> StoreResult<Book>;

    /// Insert a book and return the identifier assigned by the store.
    async fn create(&self, data: &NewBook) -> StoreResult<i32>;

    /// Replace every field but the id. Updating a missing id is not an error.
    async fn update(&self, book: &Book) -> StoreResult<()>;

    /// Remove one book, `NotFound` when no row was affected.
    async fn delete(&self, id: i32) -> StoreResult<()>;

    /// Total, available and borrowed counts.
    async fn summary(&self) -> StoreResult<CatalogSummary>;

    /// Round-trip to the store without touching any row.
    async fn ping(&self) -> StoreResult<()>;
}

/// Main repository struct holding the storage backends
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BooksRepository>,
}

impl Repository {
    /// Create a repository over an arbitrary books store
    pub fn new(books: Arc<dyn BooksRepository>) -> Self {
        Self { books }
    }

    /// Create a repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(PgBooksRepository::new(pool)))
    }
}
