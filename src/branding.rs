//! Branding selection for the sign-in page and tab icon
//!
//! Picks the icon to show from the logo cache, falling back to the default
//! asset whenever no usable logo is cached or the logo fails to load.

use serde::Serialize;

use crate::cache::OrganizationLogoCache;
use crate::clock::Clock;
use crate::storage::KeyValueStore;

/// Default icon shipped with the site
pub const DEFAULT_ICON: &str = "/favicon.ico";

/// Where the chosen icon came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandingSource {
    Cached,
    Default,
}

/// Icon and organization name to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branding {
    pub icon_url: String,
    pub organization: Option<String>,
    pub source: BrandingSource,
}

impl Branding {
    fn default_icon(default_icon: &str, organization: Option<String>) -> Self {
        Self {
            icon_url: default_icon.to_string(),
            organization,
            source: BrandingSource::Default,
        }
    }

    /// The cached logo could not be loaded; switch to the default icon but
    /// keep the organization name.
    pub fn on_load_failure(self, default_icon: &str) -> Self {
        Self::default_icon(default_icon, self.organization)
    }
}

/// Resolves branding from a logo cache
pub struct BrandingResolver<'a, S, C> {
    cache: &'a OrganizationLogoCache<S, C>,
    default_icon: String,
}

impl<'a, S: KeyValueStore, C: Clock> BrandingResolver<'a, S, C> {
    pub fn new(cache: &'a OrganizationLogoCache<S, C>, default_icon: impl Into<String>) -> Self {
        Self {
            cache,
            default_icon: default_icon.into(),
        }
    }

    /// Branding for `email`, or for the most recent cached organization when
    /// no email is known yet.
    pub fn resolve(&self, email: Option<&str>) -> Branding {
        let cached = match email {
            Some(email) => self.cache.read(email),
            None => self.cache.read_most_recent(),
        };

        match cached {
            Some(record) => match record.logo() {
                Some(url) => Branding {
                    icon_url: url.to_string(),
                    organization: Some(record.name.clone()),
                    source: BrandingSource::Cached,
                },
                None => Branding::default_icon(&self.default_icon, Some(record.name.clone())),
            },
            None => Branding::default_icon(&self.default_icon, None),
        }
    }

    /// [`resolve`](Self::resolve), then apply the load-failure fallback if the
    /// caller reports that the cached logo did not load.
    pub fn resolve_with_load(&self, email: Option<&str>, loaded: impl FnOnce(&str) -> bool) -> Branding {
        let branding = self.resolve(email);
        if branding.source == BrandingSource::Cached && !loaded(&branding.icon_url) {
            log::debug!("Logo {} failed to load, using default icon", branding.icon_url);
            return branding.on_load_failure(&self.default_icon);
        }
        branding
    }
}
