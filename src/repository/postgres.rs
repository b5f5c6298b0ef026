//! PostgreSQL book store

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, FromRow, Pool, Postgres};

use super::BookStore;
use crate::{
    config::StorageConfig,
    error::StoreError,
    models::book::{Book, NewBook},
};

#[derive(FromRow)]
struct BookRow {
    id: i64,
    isbn: String,
    author: String,
    title: String,
    pages: i64,
    year: i32,
    price: Decimal,
    cover: Option<String>,
}

impl TryFrom<BookRow> for Book {
    type Error = StoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let pages = u32::try_from(row.pages).map_err(|_| {
            StoreError::Rejected(format!("book {} has invalid page count {}", row.id, row.pages))
        })?;
        Ok(Self {
            id: row.id,
            isbn: row.isbn,
            author: row.author,
            title: row.title,
            pages,
            year: row.year,
            price: row.price,
            cover: row.cover,
        })
    }
}

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Connect to the configured database and apply pending migrations
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, isbn, author, title, pages, year, price, cover
            FROM books
            WHERE isbn = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (isbn, author, title, pages, year, price, cover)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, isbn, author, title, pages, year, price, cover
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.author)
        .bind(&book.title)
        .bind(i64::from(book.pages))
        .bind(book.year)
        .bind(book.price)
        .bind(&book.cover)
        .fetch_one(&self.pool)
        .await?;

        Book::try_from(row)
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            DELETE FROM books
            WHERE id = (SELECT id FROM books WHERE isbn = $1 ORDER BY id LIMIT 1)
            RETURNING id, isbn, author, title, pages, year, price, cover
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
