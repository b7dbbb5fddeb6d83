//! Storage key derivation

use super::KEY_PREFIX;

/// Lower-case an email so that lookups and writes agree on the key.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Storage key for an email: the cache prefix plus the normalized email.
pub fn cache_key(email: &str) -> String {
    format!("{}{}", KEY_PREFIX, normalize_email(email))
}

/// Whether a storage key belongs to the logo cache
pub fn is_cache_key(key: &str) -> bool {
    key.starts_with(KEY_PREFIX)
}
