use cinelist_model::RuntimeFormatError;
use thiserror::Error;

use crate::validator::FieldErrors;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("record not found")]
    NotFound,

    /// The record's version moved on since the caller read it. Refetch and
    /// retry; the store never retries on its own.
    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,

    #[error("validation failed: {0}")]
    ValidationFailed(FieldErrors),

    #[error(transparent)]
    InvalidRuntimeFormat(#[from] RuntimeFormatError),

    /// A sort key reached query construction without passing the
    /// allow-list. This is a caller bug, not a user input error.
    #[error("unsafe sort parameter: {0}")]
    UnsafeSort(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    /// Whether the caller can act on this outcome (refetch, fix input).
    /// Only storage failures and contract violations are unexpected.
    pub fn is_expected(&self) -> bool {
        !matches!(self, CatalogError::Storage(_) | CatalogError::UnsafeSort(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use cinelist_model::Runtime;

    use super::*;
    use crate::validator::Validator;

    fn parse_runtime(raw: &str) -> Result<Runtime> {
        Ok(raw.parse::<Runtime>()?)
    }

    #[test]
    fn runtime_format_errors_convert() {
        assert!(matches!(
            parse_runtime("10 minutes"),
            Err(CatalogError::InvalidRuntimeFormat(RuntimeFormatError::Shape))
        ));
        assert_eq!(parse_runtime("10 mins").ok(), Some(Runtime::new(10)));
    }

    #[test]
    fn only_storage_and_unsafe_sort_are_unexpected() {
        let mut v = Validator::new();
        v.add_error("title", "must be provided");

        for err in [
            CatalogError::NotFound,
            CatalogError::EditConflict,
            CatalogError::ValidationFailed(v.into_errors()),
            CatalogError::from(RuntimeFormatError::Shape),
        ] {
            assert!(err.is_expected(), "{err}");
        }

        assert!(!CatalogError::Storage("connection reset".into()).is_expected());
        assert!(!CatalogError::UnsafeSort("year;drop".into()).is_expected());
    }
}
