//! Catalog management service

use std::sync::Arc;

use crate::{
    error::{AppResult, DomainError, StoreError, STORE_FAILURE},
    models::book::{Book, NewBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Get a book by isbn, failing with `unknown.book` when none matches
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        match self.store.find_by_isbn(isbn).await.map_err(store_failure)? {
            Some(book) => Ok(book),
            None => Err(not_found(isbn)),
        }
    }

    /// Create a new book; the store assigns its id
    pub async fn create(&self, book: NewBook) -> AppResult<Book> {
        let created = self.store.insert(book).await.map_err(store_failure)?;
        tracing::info!(id = created.id, isbn = %created.isbn, "Catalog: book created");
        Ok(created)
    }

    /// Delete a book by isbn and return the removed record
    pub async fn delete_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        match self.store.delete_by_isbn(isbn).await.map_err(store_failure)? {
            Some(book) => {
                tracing::info!(id = book.id, isbn = %book.isbn, "Catalog: book deleted");
                Ok(book)
            }
            None => Err(not_found(isbn)),
        }
    }

    pub async fn is_ready(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Catalog store not ready: {}", e);
                false
            }
        }
    }
}

fn not_found(isbn: &str) -> DomainError {
    let error = DomainError::unknown_book(isbn);
    tracing::debug!(isbn, debug_id = %error.debug_id, "Catalog: book not found");
    error
}

// Store details stay in the log; callers only see the debug id.
fn store_failure(e: StoreError) -> DomainError {
    let error = DomainError::new(STORE_FAILURE, "The catalog store could not complete the operation");
    tracing::error!(debug_id = %error.debug_id, "Catalog store failure: {}", e);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::UNKNOWN_BOOK, repository::MockBookStore};
    use rust_decimal::Decimal;

    fn new_book(isbn: &str) -> NewBook {
        NewBook {
            isbn: isbn.to_string(),
            author: "A. Author".to_string(),
            title: "T".to_string(),
            pages: 200,
            year: 2020,
            price: Decimal::new(999, 2),
            cover: Some("c.jpg".to_string()),
        }
    }

    fn service(store: MockBookStore) -> CatalogService {
        CatalogService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_find_returns_stored_book() {
        let mut store = MockBookStore::new();
        store
            .expect_find_by_isbn()
            .withf(|isbn: &str| isbn == "978-1")
            .times(1)
            .returning(|_| Ok(Some(new_book("978-1").into_book(7))));

        let book = service(store).find_by_isbn("978-1").await.unwrap();
        assert_eq!(book.id, 7);
        assert_eq!(book.isbn, "978-1");
    }

    #[tokio::test]
    async fn test_find_unknown_raises_unknown_book() {
        let mut store = MockBookStore::new();
        store.expect_find_by_isbn().returning(|_| Ok(None));

        let error = service(store).find_by_isbn("9").await.unwrap_err();
        assert_eq!(error.message_id, UNKNOWN_BOOK);
        assert!(!error.debug_id.is_empty());
    }

    #[tokio::test]
    async fn test_create_passes_request_fields_to_store() {
        let mut store = MockBookStore::new();
        store
            .expect_insert()
            .withf(|book: &NewBook| *book == new_book("978-1"))
            .times(1)
            .returning(|book| Ok(book.into_book(1)));

        let created = service(store).create(new_book("978-1")).await.unwrap();
        assert_eq!(created, new_book("978-1").into_book(1));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let mut store = MockBookStore::new();
        store
            .expect_delete_by_isbn()
            .times(1)
            .returning(|_| Ok(Some(new_book("978-1").into_book(3))));

        let deleted = service(store).delete_by_isbn("978-1").await.unwrap();
        assert_eq!(deleted.id, 3);
    }

    #[tokio::test]
    async fn test_delete_unknown_raises_unknown_book() {
        let mut store = MockBookStore::new();
        store.expect_delete_by_isbn().returning(|_| Ok(None));

        let error = service(store).delete_by_isbn("missing").await.unwrap_err();
        assert_eq!(error.message_id, UNKNOWN_BOOK);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_leaked() {
        let mut store = MockBookStore::new();
        store
            .expect_find_by_isbn()
            .returning(|_| Err(StoreError::Rejected("connection reset".to_string())));

        let error = service(store).find_by_isbn("978-1").await.unwrap_err();
        assert_eq!(error.message_id, STORE_FAILURE);
        assert!(!error.message.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_readiness_follows_store_ping() {
        let mut store = MockBookStore::new();
        store
            .expect_ping()
            .returning(|| Err(StoreError::Rejected("down".to_string())));
        assert!(!service(store).is_ready().await);

        let mut store = MockBookStore::new();
        store.expect_ping().returning(|| Ok(()));
        assert!(service(store).is_ready().await);
    }
}
