//! Business logic services

pub mod books;
pub mod genres;
pub mod reconcile;

use std::sync::Arc;

use crate::repository::{BookStore, GenreStore, Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub genres: genres::GenreService,
    pub books: books::BookService,
}

impl Services {
    /// Create all services backed by the PostgreSQL repository
    pub fn new(repository: Repository) -> Self {
        Self::with_stores(Arc::new(repository.genres), Arc::new(repository.books))
    }

    /// Create all services over arbitrary store implementations
    pub fn with_stores(genre_store: Arc<dyn GenreStore>, book_store: Arc<dyn BookStore>) -> Self {
        Self {
            genres: genres::GenreService::new(genre_store.clone()),
            books: books::BookService::new(book_store, genre_store),
        }
    }
}
