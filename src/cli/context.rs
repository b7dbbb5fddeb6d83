//! Command execution context
//!
//! Loads configuration, resolves the store location and output format, and
//! opens the logo cache once for the command being run.

use std::path::PathBuf;

use crate::cache::OrganizationLogoCache;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::storage::SqliteStore;

/// Context for command execution containing config, cache, and runtime options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Logo cache over the on-disk store
    pub cache: OrganizationLogoCache<SqliteStore>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if an explicit config file cannot be loaded or the store
    /// cannot be opened.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let format = Self::resolve_format(opts, &config);
        let store = match Self::store_override(opts, &config) {
            Some(dir) => SqliteStore::open_at(&dir)?,
            None => SqliteStore::open()?,
        };

        Ok(Self {
            config,
            cache: OrganizationLogoCache::new(store),
            format,
        })
    }

    /// Output format: flag/env, then config preference, then pretty.
    pub fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
        if let Some(format) = opts.format {
            return format;
        }

        match config.preferences.format.as_deref() {
            Some(name) => OutputFormat::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown output format '{}' in config, using pretty", name);
                OutputFormat::Pretty
            }),
            None => OutputFormat::Pretty,
        }
    }

    /// Store directory: flag/env, then config, then the user cache dir.
    pub fn resolve_store_dir(opts: &GlobalOptions, config: &Config) -> Result<PathBuf> {
        match Self::store_override(opts, config) {
            Some(dir) => Ok(dir),
            None => Ok(SqliteStore::default_dir()?),
        }
    }

    /// Store directory named by flag/env or config, if any
    fn store_override(opts: &GlobalOptions, config: &Config) -> Option<PathBuf> {
        opts.store_ref()
            .map(PathBuf::from)
            .or_else(|| config.store_dir.clone())
    }
}
