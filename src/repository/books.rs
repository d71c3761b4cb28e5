//! Books repository.
//!
//! Genre links live in the `book_genres` junction table. Writes to the
//! association are full supersedes: every link for the book is deleted and
//! the new set inserted inside the same transaction as the book row update.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, NewBook},
};

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookRow {
    fn with_genres(self, genres: Vec<Genre>) -> Book {
        Book {
            id: self.id,
            name: self.name,
            genres,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookGenreRow {
    book_id: Uuid,
    #[sqlx(flatten)]
    genre: Genre,
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load a book and its genres
    async fn load(con: &mut PgConnection, id: Uuid) -> AppResult<Option<Book>> {
        let Some(row) = sqlx::query_as::<_, BookRow>(
            "SELECT id, name, created_at, updated_at FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *con)
        .await?
        else {
            return Ok(None);
        };

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name, g.created_at, g.updated_at
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&mut *con)
        .await?;

        Ok(Some(row.with_genres(genres)))
    }

    async fn load_existing(con: &mut PgConnection, id: Uuid) -> AppResult<Book> {
        Self::load(con, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Replace all genre links for a book: delete existing rows then insert new ones.
    async fn write_genres(con: &mut PgConnection, book_id: Uuid, genres: &[Genre]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *con)
            .await?;

        if genres.is_empty() {
            return Ok(());
        }

        let genre_ids: Vec<Uuid> = genres.iter().map(|g| g.id).collect();
        sqlx::query(
            r#"
            INSERT INTO book_genres (book_id, genre_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(book_id)
        .bind(&genre_ids)
        .execute(&mut *con)
        .await?;

        Ok(())
    }

    async fn touch(con: &mut PgConnection, id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query("UPDATE books SET updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(id)
            .execute(&mut *con)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn create(&self, book: NewBook) -> AppResult<Book> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO books (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            "#,
        )
        .bind(id)
        .bind(&book.name)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        Self::write_genres(&mut tx, id, &book.genres).await?;
        let created = Self::load_existing(&mut tx, id).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Book> {
        let mut con = self.pool.acquire().await?;
        Self::load_existing(&mut con, id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT id, name, created_at, updated_at FROM books ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let links = sqlx::query_as::<_, BookGenreRow>(
            r#"
            SELECT bg.book_id, g.id, g.name, g.created_at, g.updated_at
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = ANY($1)
            ORDER BY g.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_book: HashMap<Uuid, Vec<Genre>> = HashMap::new();
        for link in links {
            by_book.entry(link.book_id).or_default().push(link.genre);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let genres = by_book.remove(&row.id).unwrap_or_default();
                row.with_genres(genres)
            })
            .collect())
    }

    async fn replace(&self, id: Uuid, book: NewBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE books SET name = $1, updated_at = $2 WHERE id = $3")
            .bind(&book.name)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        Self::write_genres(&mut tx, id, &book.genres).await?;
        let updated = Self::load_existing(&mut tx, id).await?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn replace_genres(&self, id: Uuid, genres: Vec<Genre>) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        Self::touch(&mut tx, id, Utc::now()).await?;
        Self::write_genres(&mut tx, id, &genres).await?;
        let updated = Self::load_existing(&mut tx, id).await?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
