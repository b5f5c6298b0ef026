//! Book model and wire payloads
//!
//! [`Book`] and [`NewBook`] are the internal records; [`BookRequest`] and
//! [`BookResponse`] are what travels over HTTP. Conversions between them
//! are written out field by field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Catalogued book with a store-assigned identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub author: String,
    pub title: String,
    pub pages: u32,
    pub year: i32,
    pub price: Decimal,
    pub cover: Option<String>,
}

/// Book fields before the store assigns an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: String,
    pub author: String,
    pub title: String,
    pub pages: u32,
    pub year: i32,
    pub price: Decimal,
    pub cover: Option<String>,
}

impl NewBook {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            isbn: self.isbn,
            author: self.author,
            title: self.title,
            pages: self.pages,
            year: self.year,
            price: self.price,
            cover: self.cover,
        }
    }
}

/// Create book request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookRequest {
    #[schema(example = "978-1")]
    pub isbn: String,
    pub author: String,
    pub title: String,
    pub pages: u32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    /// Cover image reference
    #[serde(default)]
    pub cover: Option<String>,
}

/// Book as returned by every successful endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: i64,
    pub isbn: String,
    pub author: String,
    pub title: String,
    pub pages: u32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidBook {
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),
}

impl TryFrom<BookRequest> for NewBook {
    type Error = InvalidBook;

    fn try_from(request: BookRequest) -> Result<Self, Self::Error> {
        if request.price.is_sign_negative() && !request.price.is_zero() {
            return Err(InvalidBook::NegativePrice(request.price));
        }
        Ok(Self {
            isbn: request.isbn,
            author: request.author,
            title: request.title,
            pages: request.pages,
            year: request.year,
            price: request.price,
            cover: request.cover,
        })
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            isbn: book.isbn,
            author: book.author,
            title: book.title,
            pages: book.pages,
            year: book.year,
            price: book.price,
            cover: book.cover,
        }
    }
}
