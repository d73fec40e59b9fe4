use std::fmt::{self, Display};

/// Why a runtime string was rejected by the `"<N> mins"` codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeFormatError {
    /// The JSON form was not a well-formed quoted string.
    Quoting,
    /// The text did not split into exactly `<value> mins`.
    Shape,
    /// The value token was not a base-10 integer in range.
    Value,
}

impl Display for RuntimeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = match self {
            RuntimeFormatError::Quoting => "expected a quoted string",
            RuntimeFormatError::Shape => "expected the form \"<N> mins\"",
            RuntimeFormatError::Value => "minute count is not an integer",
        };
        write!(f, "invalid runtime format: {detail}")
    }
}

impl std::error::Error for RuntimeFormatError {}
