//! Organization logo cache
//!
//! Remembers an organization's name and logo per user email so a sign-in
//! screen can show branding before authentication completes. Entries expire
//! after [`EXPIRY_WINDOW`] and are evicted lazily when read.

pub mod key;
pub mod logo;
pub mod record;

use std::time::Duration;

/// Prefix separating cache entries from unrelated storage keys
pub const KEY_PREFIX: &str = "org_logo_cache_";

/// How long an entry stays valid after it is written
pub const EXPIRY_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60); // 30 days

pub(crate) fn expiry_window() -> chrono::Duration {
    chrono::Duration::seconds(EXPIRY_WINDOW.as_secs() as i64)
}

// Re-export main types
pub use key::{cache_key, normalize_email};
pub use logo::{CacheStats, ClearStats, EntryReport, OrganizationLogoCache, Outcome};
pub use record::{CachedOrganization, Organization};
