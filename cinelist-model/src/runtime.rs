use std::fmt;
use std::str::FromStr;

use crate::error::RuntimeFormatError;

const UNIT: &str = "mins";

/// Running time of a movie in whole minutes.
///
/// On the wire a runtime is the string `"<N> mins"`; in the store it is a
/// plain integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Runtime(i32);

impl Runtime {
    pub fn new(minutes: i32) -> Self {
        Runtime(minutes)
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }

    /// Quoted JSON form, e.g. `"102 mins"`.
    pub fn to_json(&self) -> String {
        // Display only ever emits a sign, digits, one space and the unit,
        // none of which need escaping.
        format!("\"{self}\"")
    }

    /// Decode the quoted JSON form.
    ///
    /// The input must be a JSON string literal whose contents are exactly
    /// `<integer> mins`; anything else is a [`RuntimeFormatError`].
    #[cfg(feature = "serde")]
    pub fn from_json(raw: &str) -> Result<Self, RuntimeFormatError> {
        if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
            return Err(RuntimeFormatError::Quoting);
        }
        let unquoted: String = serde_json::from_str(raw)
            .map_err(|_| RuntimeFormatError::Quoting)?;
        unquoted.parse()
    }
}

impl From<i32> for Runtime {
    fn from(minutes: i32) -> Self {
        Runtime(minutes)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {UNIT}", self.0)
    }
}

impl FromStr for Runtime {
    type Err = RuntimeFormatError;

    /// Parse the unquoted `<N> mins` text. Tokens are separated by exactly
    /// one space, so `"10  mins"` is three tokens and rejected.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split(' ');
        let (Some(value), Some(unit), None) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(RuntimeFormatError::Shape);
        };

        if unit != UNIT {
            return Err(RuntimeFormatError::Shape);
        }

        value
            .parse::<i32>()
            .map(Runtime)
            .map_err(|_| RuntimeFormatError::Value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Runtime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Runtime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RuntimeVisitor;

        impl serde::de::Visitor<'_> for RuntimeVisitor {
            type Value = Runtime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string of the form \"<N> mins\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Runtime, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(RuntimeVisitor)
    }
}
