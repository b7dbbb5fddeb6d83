//! Per-email organization logo cache with lazy expiry
//!
//! Branding is cosmetic, so nothing here returns `Err` to the caller. Writes
//! and clears report an [`Outcome`] that callers are free to ignore; reads
//! degrade to `None`. Failures are logged through the `log` facade.

use chrono::{DateTime, Utc};

use super::key::{cache_key, is_cache_key, normalize_email};
use super::record::{CachedOrganization, Organization};
use super::{EXPIRY_WINDOW, expiry_window};
use crate::clock::{Clock, SystemClock};
use crate::error::CacheError;
use crate::storage::KeyValueStore;

/// Result of a best-effort cache mutation
#[derive(Debug)]
pub enum Outcome<T = ()> {
    /// The operation took effect
    Done(T),
    /// Nothing to do (empty email)
    Skipped,
    /// The operation had no effect because of the carried error
    Failed(CacheError),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            _ => None,
        }
    }
}

/// Statistics about a clear-all operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// State of one stored entry, as seen by [`OrganizationLogoCache::inspect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryReport {
    Valid(CachedOrganization),
    Expired(CachedOrganization),
    Malformed { key: String },
}

/// Statistics about cache state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub malformed_entries: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}

/// Organization branding cache keyed by user email.
///
/// Holds no state besides its store and clock; construct one per process
/// and share it by reference.
pub struct OrganizationLogoCache<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> OrganizationLogoCache<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> OrganizationLogoCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Remember `organization` as the branding for `email`, replacing any
    /// previous entry for that email.
    pub fn write(&self, email: &str, organization: Organization) -> Outcome {
        if email.is_empty() {
            return Outcome::Skipped;
        }

        let normalized = normalize_email(email);
        let key = cache_key(&normalized);
        let record = CachedOrganization::new(organization, normalized, self.clock.now());

        let result = record
            .to_json()
            .map_err(CacheError::from)
            .and_then(|json| self.store.set_item(&key, &json).map_err(CacheError::from));

        match result {
            Ok(()) => {
                log::debug!("Cached organization {} for {}", record.id, record.email);
                Outcome::Done(())
            }
            Err(e) => {
                log::warn!("Failed to cache organization logo: {}", e);
                Outcome::Failed(e)
            }
        }
    }

    /// Cached branding for `email`.
    ///
    /// Expired and unparseable entries are removed on the way out.
    pub fn read(&self, email: &str) -> Option<CachedOrganization> {
        if email.is_empty() {
            return None;
        }

        let key = cache_key(email);
        let raw = match self.store.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read cached organization: {}", e);
                return None;
            }
        };

        let record = match CachedOrganization::from_json(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Dropping malformed cache entry {}: {}", key, e);
                self.remove_quietly(&key);
                return None;
            }
        };

        if record.is_expired(self.clock.now(), expiry_window()) {
            log::debug!("Evicting expired cache entry for {}", record.email);
            self.remove_quietly(&key);
            return None;
        }

        Some(record)
    }

    /// [`read`](Self::read) for callers that may not know the email yet
    pub fn read_opt(&self, email: Option<&str>) -> Option<CachedOrganization> {
        email.and_then(|email| self.read(email))
    }

    /// The most recently written valid entry across all emails.
    ///
    /// Does not modify storage: expired and malformed entries are skipped,
    /// not removed. Ties go to the first key in ascending order.
    pub fn read_most_recent(&self) -> Option<CachedOrganization> {
        self.inspect()
            .into_iter()
            .filter_map(|entry| match entry {
                EntryReport::Valid(record) => Some(record),
                EntryReport::Expired(_) | EntryReport::Malformed { .. } => None,
            })
            // Strictly newer replaces, so ties keep the earlier key
            .reduce(|best, record| {
                if record.cached_at > best.cached_at {
                    record
                } else {
                    best
                }
            })
    }

    /// Forget the entry for `email`. `Done(true)` if one was stored.
    pub fn clear(&self, email: &str) -> Outcome<bool> {
        if email.is_empty() {
            return Outcome::Skipped;
        }

        let key = cache_key(email);
        let result = self
            .store
            .get_item(&key)
            .and_then(|existing| self.store.remove_item(&key).map(|()| existing.is_some()));

        match result {
            Ok(existed) => Outcome::Done(existed),
            Err(e) => {
                log::warn!("Failed to clear cached organization: {}", e);
                Outcome::Failed(e.into())
            }
        }
    }

    /// Remove every cache entry, leaving keys outside the cache prefix alone.
    ///
    /// Keeps going past individual removal failures and reports the last one.
    pub fn clear_all(&self) -> Outcome<ClearStats> {
        let keys = match self.cache_keys() {
            Ok(keys) => keys,
            Err(e) => {
                log::warn!("Failed to list cache entries: {}", e);
                return Outcome::Failed(e.into());
            }
        };

        let mut stats = ClearStats::default();
        let mut last_error = None;

        for key in keys {
            match self.store.remove_item(&key) {
                Ok(()) => stats.entries_removed += 1,
                Err(e) => {
                    log::warn!("Failed to remove cache entry {}: {}", key, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Outcome::Failed(e.into()),
            None => Outcome::Done(stats),
        }
    }

    /// Every stored entry with its validity, ordered by key. Read-only.
    pub fn inspect(&self) -> Vec<EntryReport> {
        let keys = match self.cache_keys() {
            Ok(keys) => keys,
            Err(e) => {
                log::warn!("Failed to list cache entries: {}", e);
                return Vec::new();
            }
        };

        let now = self.clock.now();
        let window = expiry_window();

        keys.into_iter()
            .filter_map(|key| {
                // A key that vanished between listing and reading is skipped
                let raw = match self.store.get_item(&key) {
                    Ok(Some(raw)) => raw,
                    Ok(None) => return None,
                    Err(e) => {
                        log::debug!("Failed to read cache entry {}: {}", key, e);
                        return None;
                    }
                };

                Some(match CachedOrganization::from_json(&raw) {
                    Ok(record) if record.is_expired(now, window) => EntryReport::Expired(record),
                    Ok(record) => EntryReport::Valid(record),
                    Err(_) => EntryReport::Malformed { key },
                })
            })
            .collect()
    }

    /// Counts of valid, expired and malformed entries
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();

        for entry in self.inspect() {
            stats.total_entries += 1;
            match entry {
                EntryReport::Valid(record) => {
                    stats.valid_entries += 1;
                    let at = record.cached_at;
                    stats.oldest_entry = Some(stats.oldest_entry.map_or(at, |o| o.min(at)));
                    stats.newest_entry = Some(stats.newest_entry.map_or(at, |n| n.max(at)));
                }
                EntryReport::Expired(_) => stats.expired_entries += 1,
                EntryReport::Malformed { .. } => stats.malformed_entries += 1,
            }
        }

        stats
    }

    /// Expiry window in whole days, for display
    pub fn expiry_days(&self) -> i64 {
        EXPIRY_WINDOW.as_secs() as i64 / (24 * 60 * 60)
    }

    fn cache_keys(&self) -> Result<Vec<String>, crate::error::StorageError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|key| is_cache_key(key))
            .collect())
    }

    fn remove_quietly(&self, key: &str) {
        if let Err(e) = self.store.remove_item(key) {
            log::warn!("Failed to remove cache entry {}: {}", key, e);
        }
    }
}
