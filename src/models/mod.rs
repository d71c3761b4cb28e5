//! Data models for Bookshelf

pub mod book;
pub mod genre;

use validator::ValidationError;

// Re-export commonly used types
pub use book::{Book, CreateBook, NewBook, UpdateBook, UpdateBookGenres};
pub use genre::{CreateGenre, Genre, GenreQuery, UpdateGenre};

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
