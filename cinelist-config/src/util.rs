use std::time::Duration;

use crate::error::ConfigLoadError;

/// Treat blank values the same as unset ones.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn parse_u32(key: &'static str, raw: &str) -> Result<u32, ConfigLoadError> {
    raw.trim().parse().map_err(|_| ConfigLoadError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Parse a human duration such as `15m` or `30s`.
pub fn parse_duration(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim())
        .map_err(|source| ConfigLoadError::InvalidDuration { key, source })
}
