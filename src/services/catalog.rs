//! Catalog management service

use crate::{
    error::AppResult,
    models::{Book, CatalogSummary, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.repository.books.list_all().await?)
    }

    /// Get a single book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        Ok(self.repository.books.get_by_id(id).await?)
    }

    /// Create a book and return the identifier the store assigned to it
    pub async fn create_book(&self, data: &NewBook) -> AppResult<i32> {
        let id = self.repository.books.create(data).await?;
        tracing::info!("Catalog: created book id={} title={:?}", id, data.title);
        Ok(id)
    }

    /// Replace all fields of a book. A missing id is silently ignored.
    pub async fn update_book(&self, book: &Book) -> AppResult<()> {
        self.repository.books.update(book).await?;
        tracing::info!("Catalog: updated book id={}", book.id);
        Ok(())
    }

    /// Delete a book by ID
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Catalog: deleted book id={}", id);
        Ok(())
    }

    /// Dashboard counters
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        Ok(self.repository.books.summary().await?)
    }

    /// Check that the book store answers
    pub async fn ping(&self) -> AppResult<()> {
        Ok(self.repository.books.ping().await?)
    }
}
