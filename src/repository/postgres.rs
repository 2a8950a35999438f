//! PostgreSQL implementation of the books repository

use async_trait::async_trait;
use sqlx::{pool::PoolConnection, Pool, Postgres};

use super::{BooksRepository, StoreError, StoreResult};
use crate::models::{Book, BorrowStatus, CatalogSummary, NewBook};

const SELECT_BOOK: &str = r#"
    SELECT Id AS id, Titulo AS title, Autor AS author,
           AnioPublicacion AS publication_year, Editorial AS publisher,
           Prestado AS borrowed
    FROM libros
"#;

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> StoreResult<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(|e| {
            tracing::error!("Failed to acquire database connection: {}", e);
            StoreError::Connection(e)
        })
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        let mut conn = self.connection().await?;
        sqlx::query_as::<_, Book>(SELECT_BOOK)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list books: {}", e);
                StoreError::Query(e)
            })
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Book> {
        let mut conn = self.connection().await?;
        let query = format!("{} WHERE Id = $1", SELECT_BOOK);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch book {}: {}", id, e);
                StoreError::Query(e)
            })?
            .ok_or(StoreError::NotFound(id))?;

        tracing::debug!(id, "Book fetched");
        Ok(book)
    }

    async fn create(&self, data: &NewBook) -> StoreResult<i32> {
        let mut conn = self.connection().await?;
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO libros (Autor, Titulo, AnioPublicacion, Editorial, Prestado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING Id
            "#,
        )
        .bind(&data.author)
        .bind(&data.title)
        .bind(data.publication_year)
        .bind(&data.publisher)
        .bind(data.borrowed)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert book: {}", e);
            StoreError::Insert(e)
        })?;

        tracing::info!(id, "Book inserted");
        Ok(id)
    }

    async fn update(&self, book: &Book) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let result = sqlx::query(
            r#"
            UPDATE libros
            SET Titulo = $1, Autor = $2, AnioPublicacion = $3, Editorial = $4, Prestado = $5
            WHERE Id = $6
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publication_year)
        .bind(&book.publisher)
        .bind(book.borrowed)
        .bind(book.id)
        .execute(&mut *conn)
        .await
        .map_err(|source| {
            tracing::error!("Failed to update book {}: {}", book.id, source);
            StoreError::Update { id: book.id, source }
        })?;

        tracing::info!(id = book.id, rows = result.rows_affected(), "Book updated");
        Ok(())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let result = sqlx::query("DELETE FROM libros WHERE Id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|source| {
                tracing::error!("Failed to delete book {}: {}", id, source);
                StoreError::Delete { id, source }
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::info!(id, "Book deleted");
        Ok(())
    }

    async fn summary(&self) -> StoreResult<CatalogSummary> {
        let mut conn = self.connection().await?;
        let rows: Vec<(BorrowStatus, i64)> =
            sqlx::query_as("SELECT Prestado, COUNT(*) FROM libros GROUP BY Prestado")
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count books: {}", e);
                    StoreError::Query(e)
                })?;

        // Several raw tokens may decode to the same status.
        let mut summary = CatalogSummary::default();
        for (status, count) in rows {
            summary.total += count;
            if status.is_borrowed() {
                summary.borrowed += count;
            } else {
                summary.available += count;
            }
        }
        Ok(summary)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }
}
