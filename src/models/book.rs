//! Book model and request types

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::genre::Genre;

/// Book with its resolved genre set.
///
/// `genres` is always loaded; an empty vector means the book has no
/// association rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub name: Option<String>,
    pub genres: Vec<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn genre_ids(&self) -> HashSet<Uuid> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

/// Book about to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: Option<String>,
    pub genres: Vec<Genre>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    /// Genre ids; unknown ids are ignored
    #[serde(default, alias = "genreIds")]
    #[schema(value_type = Vec<Uuid>)]
    pub genres: HashSet<Uuid>,
}

/// Full update request: name and genres are both replaced
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub id: Uuid,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[serde(default, alias = "genreIds")]
    #[schema(value_type = Vec<Uuid>)]
    pub genres: HashSet<Uuid>,
}

/// Partial update request: only the genre set is replaced
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookGenres {
    pub id: Uuid,
    #[serde(default, alias = "genreIds")]
    #[schema(value_type = Vec<Uuid>)]
    pub genres: HashSet<Uuid>,
}
