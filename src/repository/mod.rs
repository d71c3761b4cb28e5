//! Repository layer for database operations
//!
//! The service layer talks to the stores through [`GenreStore`] and
//! [`BookStore`]; the PostgreSQL implementations live in the submodules.

pub mod books;
pub mod genres;

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, Genre, NewBook},
};

/// Genre persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn create(&self, name: &str) -> AppResult<Genre>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Genre>;

    /// Returns the genres that exist among `ids`. Unknown ids are omitted.
    async fn find_all_by_ids(&self, ids: &HashSet<Uuid>) -> AppResult<Vec<Genre>>;

    /// Renames a genre, returning the number of rows updated (0 or 1)
    async fn update(&self, id: Uuid, name: &str) -> AppResult<u64>;

    async fn list(&self) -> AppResult<Vec<Genre>>;

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<(Vec<Genre>, i64)>;

    async fn count(&self) -> AppResult<i64>;
}

/// Book persistence. Every returned [`Book`] carries its loaded genre set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, book: NewBook) -> AppResult<Book>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Book>;

    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// Overwrites name and association of book `id`. The association written
    /// is exactly `book.genres`; previous links are dropped in the same
    /// transaction.
    async fn replace(&self, id: Uuid, book: NewBook) -> AppResult<Book>;

    /// Overwrites only the association, leaving the name untouched
    async fn replace_genres(&self, id: Uuid, genres: Vec<Genre>) -> AppResult<Book>;

    /// Returns 1 if the book existed, 0 otherwise
    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}
