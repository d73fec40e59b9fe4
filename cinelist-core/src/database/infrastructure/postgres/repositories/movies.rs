use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, warn};

use cinelist_model::{Movie, MovieId, NewMovie, PageMetadata, Runtime};

use crate::database::bounded;
use crate::database::ports::movies::{MoviePage, MoviesRepository};
use crate::error::{CatalogError, Result};
use crate::filters::Filters;

/// PostgreSQL-backed implementation of the `MoviesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresMoviesRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: MovieId,
    created_at: DateTime<Utc>,
    title: String,
    year: i32,
    runtime: Runtime,
    genres: Vec<String>,
    version: i32,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            created_at: row.created_at,
            title: row.title,
            year: row.year,
            runtime: row.runtime,
            genres: row.genres,
            version: row.version,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SearchRow {
    total_records: i64,
    #[sqlx(flatten)]
    movie: MovieRow,
}

impl PostgresMoviesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MoviesRepository for PostgresMoviesRepository {
    async fn insert(&self, movie: &NewMovie) -> Result<Movie> {
        let row = bounded(
            "insert movie",
            sqlx::query_as::<_, MovieRow>(
                r#"
                INSERT INTO movies (title, year, runtime, genres)
                VALUES ($1, $2, $3, $4)
                RETURNING id, created_at, title, year, runtime, genres, version
                "#,
            )
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(movie.genres.as_slice())
            .fetch_one(self.pool()),
        )
        .await?;

        info!(id = %row.id, title = %row.title, "Created movie");
        Ok(row.into())
    }

    async fn get(&self, id: MovieId) -> Result<Movie> {
        if !id.is_assignable() {
            return Err(CatalogError::NotFound);
        }

        let row = bounded(
            "get movie",
            sqlx::query_as::<_, MovieRow>(
                r#"
                SELECT id, created_at, title, year, runtime, genres, version
                FROM movies
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool()),
        )
        .await?;

        row.map(Movie::from).ok_or(CatalogError::NotFound)
    }

    async fn update(&self, movie: &mut Movie) -> Result<()> {
        let version = bounded(
            "update movie",
            sqlx::query_scalar::<_, i32>(
                r#"
                UPDATE movies
                SET title = $1, year = $2, runtime = $3, genres = $4,
                    version = version + 1
                WHERE id = $5 AND version = $6
                RETURNING version
                "#,
            )
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(movie.genres.as_slice())
            .bind(movie.id)
            .bind(movie.version)
            .fetch_optional(self.pool()),
        )
        .await?;

        match version {
            Some(version) => {
                debug!(id = %movie.id, version, "Updated movie");
                movie.version = version;
                Ok(())
            }
            None => {
                warn!(
                    id = %movie.id,
                    expected_version = movie.version,
                    "Edit conflict on movie update"
                );
                Err(CatalogError::EditConflict)
            }
        }
    }

    async fn delete(&self, id: MovieId) -> Result<()> {
        if !id.is_assignable() {
            return Err(CatalogError::NotFound);
        }

        let result = bounded(
            "delete movie",
            sqlx::query("DELETE FROM movies WHERE id = $1")
                .bind(id)
                .execute(self.pool()),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }

        info!(id = %id, "Deleted movie");
        Ok(())
    }

    async fn search(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<MoviePage> {
        // Resolve ordering before any SQL exists so an unchecked sort key
        // can never reach the builder.
        let column = filters.sort_column()?;
        let direction = filters.sort_direction()?;

        let mut sql_builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT count(*) OVER() AS total_records,
                   id, created_at, title, year, runtime, genres, version
            FROM movies
            WHERE 1=1"#,
        );

        let title = title.trim();
        if !title.is_empty() {
            sql_builder.push(
                " AND to_tsvector('simple', title) @@ plainto_tsquery('simple', ",
            );
            sql_builder.push_bind(title);
            sql_builder.push(")");
        }

        if !genres.is_empty() {
            sql_builder.push(" AND genres @> ");
            sql_builder.push_bind(genres);
        }

        sql_builder.push(" ORDER BY ");
        sql_builder.push(column.as_sql());
        sql_builder.push(" ");
        sql_builder.push(direction.as_sql());
        sql_builder.push(", id ASC");

        sql_builder.push(" LIMIT ");
        sql_builder.push_bind(filters.limit());
        sql_builder.push(" OFFSET ");
        sql_builder.push_bind(filters.offset());

        debug!(
            sort = column.as_sql(),
            direction = direction.as_sql(),
            page = filters.page,
            page_size = filters.page_size,
            "Searching movies"
        );

        let rows = bounded(
            "search movies",
            sql_builder
                .build_query_as::<SearchRow>()
                .fetch_all(self.pool()),
        )
        .await?;

        let total_records = rows.first().map(|row| row.total_records).unwrap_or(0);
        let movies = rows.into_iter().map(|row| row.movie.into()).collect();

        Ok(MoviePage {
            movies,
            metadata: PageMetadata::calculate(
                total_records,
                filters.page,
                filters.page_size,
            ),
        })
    }
}
