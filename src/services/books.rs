//! Book service
//!
//! Create, full update and genres-only update all resolve the requested genre
//! ids first and then hand the resolved set to the store, which replaces the
//! whole association atomically.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::reconcile::resolve_genres;
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, NewBook, UpdateBook, UpdateBookGenres},
    repository::{BookStore, GenreStore},
};

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    genres: Arc<dyn GenreStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, genres: Arc<dyn GenreStore>) -> Self {
        Self { books, genres }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.books.find_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.books.find_all().await
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        let genres = resolve_genres(self.genres.as_ref(), &data.genres).await?;

        let book = self
            .books
            .create(NewBook {
                name: data.name,
                genres,
            })
            .await?;
        tracing::info!("Book created: id={} genres={}", book.id, book.genres.len());
        Ok(book)
    }

    /// Replace name and genres together
    pub async fn update(&self, data: UpdateBook) -> AppResult<Book> {
        data.validate()?;
        let genres = resolve_genres(self.genres.as_ref(), &data.genres).await?;

        let book = self
            .books
            .replace(
                data.id,
                NewBook {
                    name: data.name,
                    genres,
                },
            )
            .await?;
        tracing::info!("Book updated: id={} genres={}", book.id, book.genres.len());
        Ok(book)
    }

    /// Replace only the genre set; the stored name is kept
    pub async fn update_genres(&self, data: UpdateBookGenres) -> AppResult<Book> {
        let genres = resolve_genres(self.genres.as_ref(), &data.genres).await?;

        let book = self.books.replace_genres(data.id, genres).await?;
        tracing::info!("Book genres replaced: id={} genres={}", book.id, book.genres.len());
        Ok(book)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.books.delete_by_id(id).await? == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
