//! Genre service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateGenre, Genre, GenreQuery, UpdateGenre},
    repository::GenreStore,
};

#[derive(Clone)]
pub struct GenreService {
    store: Arc<dyn GenreStore>,
}

impl GenreService {
    pub fn new(store: Arc<dyn GenreStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.store.create(data.name.trim()).await?;
        tracing::info!("Genre created: id={} name={}", genre.id, genre.name);
        Ok(genre)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Genre> {
        self.store.find_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.list().await
    }

    /// List genres one page at a time
    pub async fn list_page(&self, query: &GenreQuery) -> AppResult<(Vec<Genre>, i64)> {
        self.store.list_page(query.offset(), query.per_page()).await
    }

    /// Rename a genre; returns the number of rows updated
    pub async fn rename(&self, data: &UpdateGenre) -> AppResult<u64> {
        data.validate()?;
        let updated = self.store.update(data.id, data.name.trim()).await?;
        if updated == 0 {
            return Err(AppError::NotFound(format!("Genre {} not found", data.id)));
        }
        tracing::info!("Genre renamed: id={}", data.id);
        Ok(updated)
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.store.count().await
    }
}
