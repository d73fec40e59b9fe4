/// Store-assigned identity of a movie record.
///
/// Valid identities are positive; lookups with anything below 1 are
/// answered as not found without touching the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct MovieId(pub i64);

impl MovieId {
    pub fn new(id: i64) -> Self {
        MovieId(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this id could ever name a stored record.
    pub fn is_assignable(&self) -> bool {
        self.0 >= 1
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        MovieId(id)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
