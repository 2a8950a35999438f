//! In-memory books repository
//!
//! Follows the same contract as the PostgreSQL store: ids are assigned from 1
//! in insertion order, listing keeps insertion order, and a missing row on
//! get/delete is `NotFound`. It can be taken offline to reproduce an
//! unreachable store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BooksRepository, StoreError, StoreResult};
use crate::models::{Book, CatalogSummary, NewBook};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Book>,
}

#[derive(Default)]
pub struct InMemoryBooksRepository {
    table: RwLock<Table>,
    offline: AtomicBool,
}

impl InMemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again) with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Connection(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl BooksRepository for InMemoryBooksRepository {
    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        self.check_online()?;
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Book> {
        self.check_online()?;
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, data: &NewBook) -> StoreResult<i32> {
        self.check_online()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, Book::with_id(id, data.clone()));
        tracing::info!(id, "Book inserted");
        Ok(id)
    }

    async fn update(&self, book: &Book) -> StoreResult<()> {
        self.check_online()?;
        let mut table = self.table.write().await;
        if let Some(row) = table.rows.get_mut(&book.id) {
            *row = book.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        self.check_online()?;
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    async fn summary(&self) -> StoreResult<CatalogSummary> {
        self.check_online()?;
        let table = self.table.read().await;
        let total = table.rows.len() as i64;
        let borrowed = table.rows.values().filter(|b| b.borrowed.is_borrowed()).count() as i64;
        Ok(CatalogSummary {
            total,
            available: total - borrowed,
            borrowed,
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BorrowStatus;

    fn new_book(title: &str, borrowed: BorrowStatus) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "A".to_string(),
            publication_year: 2020,
            publisher: "P".to_string(),
            borrowed,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let repo = InMemoryBooksRepository::new();
        assert!(repo.list_all().await.unwrap().is_empty());

        let id = repo.create(&new_book("T", BorrowStatus::Available)).await.unwrap();
        let books = repo.list_all().await.unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0], Book::with_id(id, new_book("T", BorrowStatus::Available)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryBooksRepository::new();
        assert!(matches!(repo.get_by_id(42).await, Err(StoreError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_missing_leaves_table_unchanged() {
        let repo = InMemoryBooksRepository::new();
        repo.create(&new_book("T", BorrowStatus::Available)).await.unwrap();

        let ghost = Book::with_id(99, new_book("Ghost", BorrowStatus::Borrowed));
        repo.update(&ghost).await.unwrap();

        let books = repo.list_all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "T");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let repo = InMemoryBooksRepository::new();
        let first = repo.create(&new_book("One", BorrowStatus::Available)).await.unwrap();
        repo.create(&new_book("Two", BorrowStatus::Available)).await.unwrap();

        repo.delete(first).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        assert!(matches!(repo.delete(first).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let repo = InMemoryBooksRepository::new();
        repo.create(&new_book("One", BorrowStatus::Available)).await.unwrap();
        repo.create(&new_book("Two", BorrowStatus::Borrowed)).await.unwrap();
        repo.create(&new_book("Three", BorrowStatus::Borrowed)).await.unwrap();

        let summary = repo.summary().await.unwrap();
        assert_eq!(
            summary,
            CatalogSummary {
                total: 3,
                available: 1,
                borrowed: 2
            }
        );
    }

    #[tokio::test]
    async fn test_offline_store_fails_with_connection_error() {
        let repo = InMemoryBooksRepository::new();
        repo.set_offline(true);
        assert!(matches!(repo.list_all().await, Err(StoreError::Connection(_))));
        assert!(matches!(repo.ping().await, Err(StoreError::Connection(_))));

        repo.set_offline(false);
        assert!(repo.ping().await.is_ok());
    }
}
