//! Genre id resolution shared by book create and update paths.
//!
//! Requested ids are looked up through the genre store and only the genres
//! that exist are kept. Unknown ids are dropped without error; the caller
//! writes the resolved set as a full replacement of the book's association.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{error::AppResult, models::Genre, repository::GenreStore};

/// Resolve `ids` to the genres that currently exist
pub async fn resolve_genres(store: &dyn GenreStore, ids: &HashSet<Uuid>) -> AppResult<Vec<Genre>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let genres = store.find_all_by_ids(ids).await?;

    // The store may hand back more than asked for; keep the association exact.
    let mut seen = HashSet::with_capacity(genres.len());
    let resolved: Vec<Genre> = genres
        .into_iter()
        .filter(|g| ids.contains(&g.id) && seen.insert(g.id))
        .collect();

    if resolved.len() < ids.len() {
        let dropped: Vec<Uuid> = ids
            .iter()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        tracing::debug!(?dropped, "Ignoring unknown genre ids");
    }

    Ok(resolved)
}
