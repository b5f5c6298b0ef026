//! In-process book store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::StoreError,
    models::book::{Book, NewBook},
};

/// Books kept in memory, keyed by id; ids start at 1
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<i64, Book>>,
    last_id: AtomicI64,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().await;
        Ok(books.values().find(|book| book.isbn == isbn).cloned())
    }

    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let book = book.into_book(id);
        self.books.write().await.insert(id, book.clone());
        Ok(book)
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;
        let id = books
            .values()
            .find(|book| book.isbn == isbn)
            .map(|book| book.id);
        Ok(id.and_then(|id| books.remove(&id)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
