//! In-memory store used by the integration tests

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use bookshelf_server::{
    models::{Book, Genre, NewBook},
    repository::{BookStore, GenreStore},
    services::Services,
    AppError, AppResult, AppState,
};

struct BookRecord {
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    genres: HashMap<Uuid, Genre>,
    books: HashMap<Uuid, BookRecord>,
    /// Join relation; a set so a pair can only appear once
    links: BTreeSet<(Uuid, Uuid)>,
}

impl State {
    fn load(&self, id: Uuid) -> AppResult<Book> {
        let record = self
            .books
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let mut genres: Vec<Genre> = self
            .links
            .iter()
            .filter(|(book_id, _)| *book_id == id)
            .filter_map(|(_, genre_id)| self.genres.get(genre_id).cloned())
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Book {
            id,
            name: record.name.clone(),
            genres,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Supersede the book's links; nothing changes if the new set is invalid
    fn write_links(&mut self, book_id: Uuid, genres: &[Genre]) -> AppResult<()> {
        let mut pairs = BTreeSet::new();
        for genre in genres {
            if !self.genres.contains_key(&genre.id) {
                return Err(AppError::ConstraintViolation(format!(
                    "genre {} does not exist",
                    genre.id
                )));
            }
            if !pairs.insert((book_id, genre.id)) {
                return Err(AppError::ConstraintViolation("book_genres_pkey".to_string()));
            }
        }
        self.links.retain(|(b, _)| *b != book_id);
        self.links.extend(pairs);
        Ok(())
    }
}

/// Implements both store traits over shared state
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }

    pub fn services(&self) -> Services {
        Services::with_stores(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            services: Arc::new(self.services()),
        }
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn create(&self, name: &str) -> AppResult<Genre> {
        let now = Utc::now();
        let genre = Genre {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Genre> {
        self.state
            .lock()
            .unwrap()
            .genres
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    async fn find_all_by_ids(&self, ids: &HashSet<Uuid>) -> AppResult<Vec<Genre>> {
        let state = self.state.lock().unwrap();
        Ok(ids.iter().filter_map(|id| state.genres.get(id).cloned()).collect())
    }

    async fn update(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        match state.genres.get_mut(&id) {
            Some(genre) => {
                genre.name = name.to_string();
                genre.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list(&self) -> AppResult<Vec<Genre>> {
        let state = self.state.lock().unwrap();
        let mut genres: Vec<Genre> = state.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(genres)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<(Vec<Genre>, i64)> {
        let all = GenreStore::list(self).await?;
        let total = all.len() as i64;
        let page = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.state.lock().unwrap().genres.len() as i64)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create(&self, book: NewBook) -> AppResult<Book> {
        let mut state = self.state.lock().unwrap();
        let id = Uuid::new_v4();
        let now = Utc::now();
        state.write_links(id, &book.genres)?;
        state.books.insert(
            id,
            BookRecord {
                name: book.name,
                created_at: now,
                updated_at: now,
            },
        );
        state.load(id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.state.lock().unwrap().load(id)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let state = self.state.lock().unwrap();
        let mut books = state
            .books
            .keys()
            .map(|id| state.load(*id))
            .collect::<AppResult<Vec<_>>>()?;
        books.sort_by_key(|b| (b.created_at, b.id));
        Ok(books)
    }

    async fn replace(&self, id: Uuid, book: NewBook) -> AppResult<Book> {
        let mut state = self.state.lock().unwrap();
        if !state.books.contains_key(&id) {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        state.write_links(id, &book.genres)?;
        if let Some(record) = state.books.get_mut(&id) {
            record.name = book.name;
            record.updated_at = Utc::now();
        }
        state.load(id)
    }

    async fn replace_genres(&self, id: Uuid, genres: Vec<Genre>) -> AppResult<Book> {
        let mut state = self.state.lock().unwrap();
        if !state.books.contains_key(&id) {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        state.write_links(id, &genres)?;
        if let Some(record) = state.books.get_mut(&id) {
            record.updated_at = Utc::now();
        }
        state.load(id)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        if state.books.remove(&id).is_none() {
            return Ok(0);
        }
        state.links.retain(|(b, _)| *b != id);
        Ok(1)
    }
}
