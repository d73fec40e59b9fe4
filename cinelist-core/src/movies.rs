//! Field rules for movie records.

use chrono::{Datelike, Utc};

use cinelist_model::{Movie, NewMovie, Runtime};

use crate::validator::{Validator, unique};

pub const MAX_TITLE_CHARS: usize = 500;
pub const EARLIEST_YEAR: i32 = 1888;
pub const MAX_GENRES: usize = 5;

/// Validate a stored record, typically after a patch has been merged.
pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    validate_fields(
        v,
        &movie.title,
        movie.year,
        movie.runtime,
        &movie.genres,
        Utc::now().year(),
    );
}

/// Validate a candidate before insertion.
pub fn validate_new_movie(v: &mut Validator, movie: &NewMovie) {
    validate_fields(
        v,
        &movie.title,
        movie.year,
        movie.runtime,
        &movie.genres,
        Utc::now().year(),
    );
}

fn validate_fields(
    v: &mut Validator,
    title: &str,
    year: i32,
    runtime: Runtime,
    genres: &[String],
    current_year: i32,
) {
    v.check(!title.is_empty(), "title", "must be provided");
    v.check(
        title.chars().count() <= MAX_TITLE_CHARS,
        "title",
        "must not be more than 500 characters long",
    );

    v.check(year != 0, "year", "must be provided");
    v.check(year >= EARLIEST_YEAR, "year", "must be greater than 1888");
    v.check(year <= current_year, "year", "must not be in the future");

    v.check(runtime.minutes() != 0, "runtime", "must be provided");
    v.check(runtime.minutes() > 0, "runtime", "must be a positive integer");

    v.check(!genres.is_empty(), "genre", "must contain at least 1 genre");
    v.check(
        genres.len() <= MAX_GENRES,
        "genre",
        "must not contain more than 5 genres",
    );
    v.check(unique(genres), "genres", "must not contain duplicate values");
}
