//! Environment lookups shared by every configuration loader.

use std::env;
use std::str::FromStr;

/// The parsed value of `key`, or `default` when it is unset or unparsable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment value");
            default
        }),
        Err(_) => default,
    }
}
