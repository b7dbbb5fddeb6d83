//! Cached organization record and its JSON form

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Organization branding handed over by the authentication flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Organization {
    pub fn new(id: impl Into<String>, name: impl Into<String>, logo_url: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url,
        }
    }
}

/// A stored cache entry.
///
/// Wire form:
/// `{"id":..,"name":..,"logo_url":..|null,"email":..,"cached_at":"2026-10-17T08:30:00.000Z"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedOrganization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Normalized email the record is stored under
    pub email: String,
    #[serde(with = "iso8601_millis")]
    pub cached_at: DateTime<Utc>,
}

impl CachedOrganization {
    pub fn new(organization: Organization, email: String, cached_at: DateTime<Utc>) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            logo_url: organization.logo_url,
            email,
            cached_at,
        }
    }

    /// Time elapsed since the record was written. Negative if the record is
    /// stamped in the future.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }

    /// Expired once strictly older than `window`; a record exactly `window`
    /// old is still valid.
    pub fn is_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) > window
    }

    /// Logo URL, treating an empty string as no logo
    pub fn logo(&self) -> Option<&str> {
        self.logo_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// `cached_at` is written like JavaScript's `toISOString()` and read as any
/// RFC 3339 timestamp.
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
