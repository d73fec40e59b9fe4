use std::collections::HashMap;

use tracing::warn;

use cinelist_model::{Movie, MovieId, MoviePatch, NewMovie};

use crate::database::ports::movies::{MoviePage, MoviesRepository};
use crate::error::{CatalogError, Result};
use crate::filters::{MovieListQuery, validate_filters};
use crate::movies::{validate_movie, validate_new_movie};
use crate::validator::Validator;

/// Catalog operations as a request handler performs them: validate with a
/// fresh [`Validator`], then call the repository.
///
/// Conflicts are reported, never retried.
#[derive(Debug, Clone)]
pub struct MovieCatalog<R> {
    repository: R,
}

impl<R: MoviesRepository> MovieCatalog<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn create(&self, input: NewMovie) -> Result<Movie> {
        let mut v = Validator::new();
        validate_new_movie(&mut v, &input);
        v.finish()?;

        self.repository.insert(&input).await
    }

    pub async fn show(&self, id: MovieId) -> Result<Movie> {
        self.repository.get(id).await
    }

    /// Fetch, merge `patch`, validate and write back.
    ///
    /// When `expected_version` is given and the fetched record has moved
    /// past it, the write is skipped and `EditConflict` returned.
    pub async fn patch(
        &self,
        id: MovieId,
        expected_version: Option<i32>,
        patch: MoviePatch,
    ) -> Result<Movie> {
        let mut movie = self.repository.get(id).await?;

        if let Some(expected) = expected_version
            && expected != movie.version
        {
            warn!(
                id = %id,
                expected,
                actual = movie.version,
                "Rejecting patch against stale version"
            );
            return Err(CatalogError::EditConflict);
        }

        patch.apply(&mut movie);

        let mut v = Validator::new();
        validate_movie(&mut v, &movie);
        v.finish()?;

        self.repository.update(&mut movie).await?;
        Ok(movie)
    }

    pub async fn remove(&self, id: MovieId) -> Result<()> {
        self.repository.delete(id).await
    }

    pub async fn list(&self, query: &MovieListQuery) -> Result<MoviePage> {
        let mut v = Validator::new();
        validate_filters(&mut v, &query.filters);
        v.finish()?;

        self.repository
            .search(&query.title, &query.genres, &query.filters)
            .await
    }

    /// Parse query-string pairs and list in one step. Parse and range
    /// failures are reported together.
    pub async fn list_from_pairs(
        &self,
        pairs: &HashMap<String, String>,
    ) -> Result<MoviePage> {
        let mut v = Validator::new();
        let query = MovieListQuery::from_query(pairs, &mut v);
        validate_filters(&mut v, &query.filters);
        v.finish()?;

        self.repository
            .search(&query.title, &query.genres, &query.filters)
            .await
    }
}
