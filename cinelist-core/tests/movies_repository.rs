//! Store behaviour against a live PostgreSQL (`DATABASE_URL`).
#![cfg(feature = "pg-tests")]

use anyhow::Result;
use cinelist_core::database::{MoviesRepository, PostgresDatabase};
use cinelist_core::error::CatalogError;
use cinelist_core::filters::{Filters, MOVIE_SORT_SAFELIST};
use cinelist_core::model::{MovieId, NewMovie, PageMetadata, Runtime};
use sqlx::PgPool;

fn new_movie(title: &str, year: i32, runtime: i32, genres: &[&str]) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year,
        runtime: Runtime::new(runtime),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
    Filters::new(page, page_size, sort, MOVIE_SORT_SAFELIST)
}

async fn seed(db: &PostgresDatabase) -> Result<()> {
    let repo = db.movies();
    for movie in [
        new_movie("Black Panther", 2018, 134, &["action", "adventure"]),
        new_movie("Deadpool", 2016, 108, &["action", "comedy"]),
        new_movie("The Breakfast Club", 1985, 96, &["drama"]),
        new_movie("Moana", 2016, 107, &["animation", "adventure"]),
        new_movie("Black Swan", 2010, 108, &["drama", "thriller"]),
    ] {
        repo.insert(&movie).await?;
    }
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn insert_assigns_identity_and_first_version(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let repo = db.movies();

    let stored = repo
        .insert(&new_movie("Casablanca", 1942, 102, &["drama", "romance"]))
        .await?;
    assert!(stored.id.value() >= 1);
    assert_eq!(stored.version, 1);
    assert_eq!(stored.runtime, Runtime::new(102));

    let fetched = repo.get(stored.id).await?;
    assert_eq!(fetched, stored);
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn get_and_delete_reject_non_positive_ids(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let repo = db.movies();

    assert!(matches!(repo.get(MovieId(0)).await, Err(CatalogError::NotFound)));
    assert!(matches!(repo.get(MovieId(-4)).await, Err(CatalogError::NotFound)));
    assert!(matches!(repo.get(MovieId(9_999)).await, Err(CatalogError::NotFound)));
    assert!(matches!(repo.delete(MovieId(0)).await, Err(CatalogError::NotFound)));
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn update_bumps_version_by_one(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let repo = db.movies();

    let mut movie = repo
        .insert(&new_movie("Moana", 2016, 107, &["animation"]))
        .await?;
    movie.title = "Moana (Sing-Along)".into();
    movie.genres.push("musical".into());

    repo.update(&mut movie).await?;
    assert_eq!(movie.version, 2);

    let fetched = repo.get(movie.id).await?;
    assert_eq!(fetched.title, "Moana (Sing-Along)");
    assert_eq!(fetched.genres, vec!["animation", "musical"]);
    assert_eq!(fetched.version, 2);
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn stale_version_is_an_edit_conflict(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let repo = db.movies();

    let original = repo
        .insert(&new_movie("Deadpool", 2016, 108, &["action"]))
        .await?;

    let mut first = original.clone();
    let mut second = original.clone();

    first.runtime = Runtime::new(109);
    repo.update(&mut first).await?;

    second.runtime = Runtime::new(110);
    let err = repo.update(&mut second).await.unwrap_err();
    assert!(matches!(err, CatalogError::EditConflict));
    assert_eq!(second.version, original.version);

    let stored = repo.get(original.id).await?;
    assert_eq!(stored.version, 2);
    assert_eq!(stored.runtime, Runtime::new(109));

    // Missing ids are conflicts on update, not NotFound.
    let mut ghost = stored.clone();
    ghost.id = MovieId(stored.id.value() + 1_000);
    assert!(matches!(repo.update(&mut ghost).await, Err(CatalogError::EditConflict)));
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn delete_removes_once(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let repo = db.movies();

    let movie = repo
        .insert(&new_movie("Black Swan", 2010, 108, &["drama"]))
        .await?;
    repo.delete(movie.id).await?;

    assert!(matches!(repo.get(movie.id).await, Err(CatalogError::NotFound)));
    assert!(matches!(repo.delete(movie.id).await, Err(CatalogError::NotFound)));
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn unfiltered_search_orders_by_sort_then_id(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    seed(&db).await?;

    let page = db.movies().search("", &[], &filters(1, 20, "id")).await?;
    let ids: Vec<i64> = page.movies.iter().map(|m| m.id.value()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids.len(), 5);
    assert_eq!(ids, sorted);
    assert_eq!(page.metadata, PageMetadata::calculate(5, 1, 20));

    // Two movies share a runtime of 108; id breaks the tie ascending even
    // when the primary key is descending.
    let page = db.movies().search("", &[], &filters(1, 20, "-runtime")).await?;
    let titles: Vec<&str> = page.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Black Panther", "Deadpool", "Black Swan", "Moana", "The Breakfast Club"]
    );
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn search_matches_title_words_and_genre_superset(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    seed(&db).await?;
    let repo = db.movies();

    let page = repo.search("black", &[], &filters(1, 20, "title")).await?;
    let titles: Vec<&str> = page.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Black Panther", "Black Swan"]);

    let genres = vec!["action".to_string(), "adventure".to_string()];
    let page = repo.search("", &genres, &filters(1, 20, "id")).await?;
    assert_eq!(page.movies.len(), 1);
    assert_eq!(page.movies[0].title, "Black Panther");

    let page = repo
        .search("black", &["drama".to_string()], &filters(1, 20, "id"))
        .await?;
    assert_eq!(page.movies.len(), 1);
    assert_eq!(page.movies[0].title, "Black Swan");

    let page = repo.search("nonexistent", &[], &filters(1, 20, "id")).await?;
    assert!(page.movies.is_empty());
    assert_eq!(page.metadata, PageMetadata::default());
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn pagination_uses_page_minus_one_offset(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    seed(&db).await?;
    let repo = db.movies();

    let all = repo.search("", &[], &filters(1, 20, "id")).await?;
    let second = repo.search("", &[], &filters(2, 2, "id")).await?;

    assert_eq!(second.movies, all.movies[2..4].to_vec());
    assert_eq!(second.metadata.current_page, 2);
    assert_eq!(second.metadata.last_page, 3);
    assert_eq!(second.metadata.total_records, 5);

    let last = repo.search("", &[], &filters(3, 2, "id")).await?;
    assert_eq!(last.movies, all.movies[4..].to_vec());
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn page_past_the_end_has_empty_metadata(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    seed(&db).await?;

    let page = db.movies().search("", &[], &filters(4, 2, "id")).await?;
    assert!(page.movies.is_empty());
    assert_eq!(page.metadata, PageMetadata::default());
    Ok(())
}

#[sqlx::test(migrator = "cinelist_core::MIGRATOR")]
async fn unsafe_sort_fails_before_querying(pool: PgPool) -> Result<()> {
    let db = PostgresDatabase::from_pool(pool);
    let f = Filters::new(1, 20, "year;drop", &["id", "-id", "title", "-title"]);

    let err = db.movies().search("", &[], &f).await.unwrap_err();
    assert!(matches!(err, CatalogError::UnsafeSort(_)));
    Ok(())
}
