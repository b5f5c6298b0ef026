//! Book store collaborators
//!
//! The catalog only needs find, create and delete keyed by isbn. Where several
//! records share an isbn, find and delete act on the one with the lowest id.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::book::{Book, NewBook},
};

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError>;

    /// Persist a book and return it with its newly assigned id
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Remove a book, returning the record as it was before deletion
    async fn delete_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError>;

    /// Cheap connectivity check used by the readiness probe
    async fn ping(&self) -> Result<(), StoreError>;
}
