use chrono::{DateTime, Utc};

use crate::ids::MovieId;
use crate::runtime::Runtime;

/// A stored movie record.
///
/// `id`, `created_at` and the initial `version` are assigned by the store.
/// `version` is the optimistic-concurrency token: it starts at 1 and grows
/// by exactly one per successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub id: MovieId,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: i32,
}

/// Caller-supplied candidate for insertion.
///
/// Missing numeric fields decode to zero, which the validator reports as
/// "must be provided".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

/// Partial update: every field is optional and only provided fields
/// overwrite the fetched record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoviePatch {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub year: Option<i32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub runtime: Option<Runtime>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub genres: Option<Vec<String>>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.runtime.is_none()
            && self.genres.is_none()
    }

    /// Merge into a fetched record. Identity, creation time and version are
    /// never touched.
    pub fn apply(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(runtime) = self.runtime {
            movie.runtime = runtime;
        }
        if let Some(genres) = self.genres {
            movie.genres = genres;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched() -> Movie {
        Movie {
            id: MovieId(7),
            created_at: Utc::now(),
            title: "Moana".into(),
            year: 2016,
            runtime: Runtime::new(107),
            genres: vec!["animation".into(), "adventure".into()],
            version: 3,
        }
    }

    #[test]
    fn patch_overwrites_only_provided_fields() {
        let mut movie = fetched();
        let before = movie.clone();

        MoviePatch {
            year: Some(2017),
            genres: Some(vec!["family".into()]),
            ..MoviePatch::default()
        }
        .apply(&mut movie);

        assert_eq!(movie.year, 2017);
        assert_eq!(movie.genres, vec!["family".to_string()]);
        assert_eq!(movie.title, before.title);
        assert_eq!(movie.runtime, before.runtime);
        assert_eq!(movie.id, before.id);
        assert_eq!(movie.version, before.version);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut movie = fetched();
        let before = movie.clone();
        let patch = MoviePatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut movie);
        assert_eq!(movie, before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn wire_shape_matches_contract() {
        let movie = fetched();
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["runtime"], "107 mins");
        assert_eq!(value["version"], 3);
        assert!(value["created_at"].is_string());
        assert_eq!(value["genres"][1], "adventure");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn patch_distinguishes_absent_fields() {
        let patch: MoviePatch =
            serde_json::from_str(r#"{"runtime": "95 mins"}"#).unwrap();
        assert_eq!(patch.runtime, Some(Runtime::new(95)));
        assert!(patch.title.is_none());
        assert!(patch.genres.is_none());
    }
}
