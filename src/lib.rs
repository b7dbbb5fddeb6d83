//! orgbrand - organization logo cache for sign-in branding
//!
//! A best-effort, per-email cache of organization name and logo, layered over
//! a local-storage style key-value store with a 30-day expiry.

pub mod branding;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;

pub use cache::{CachedOrganization, Organization, OrganizationLogoCache, Outcome};
pub use error::{Error, Result};
