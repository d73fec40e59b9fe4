use async_trait::async_trait;

use cinelist_model::{Movie, MovieId, NewMovie, PageMetadata};

use crate::error::Result;
use crate::filters::Filters;

/// One page of search results with its pagination summary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub metadata: PageMetadata,
}

/// Persistence for movie records.
///
/// Implementations hold no per-record state: every read reflects the
/// committed store at call time, and concurrent writers are separated only
/// by the `version` compare-and-swap in [`MoviesRepository::update`].
#[async_trait]
pub trait MoviesRepository: Send + Sync {
    /// Store a new record. Identity, creation time and version 1 are
    /// assigned together with the write and returned on the record.
    async fn insert(&self, movie: &NewMovie) -> Result<Movie>;

    /// Ids below 1 are `NotFound` without touching the store.
    async fn get(&self, id: MovieId) -> Result<Movie>;

    /// Write every mutable field if the stored version still equals
    /// `movie.version`, then bump `movie.version` to the stored value.
    /// A stale version or a missing id is `EditConflict`.
    async fn update(&self, movie: &mut Movie) -> Result<()>;

    /// Ids below 1, and ids with no row, are `NotFound`.
    async fn delete(&self, id: MovieId) -> Result<()>;

    /// Empty `title` and empty `genres` each match everything. Results are
    /// ordered by the filter's sort column, then by id ascending.
    ///
    /// The total comes from the returned rows, so a page past the last one
    /// yields no movies and all-zero metadata.
    async fn search(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<MoviePage>;
}
