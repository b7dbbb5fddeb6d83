//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod cache;
pub mod context;
pub mod icon;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// orgbrand - Organization logo cache for sign-in branding
#[derive(Parser, Debug)]
#[command(name = "orgbrand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "ORGBRAND_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "ORGBRAND_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override store directory
    #[arg(long, global = true, env = "ORGBRAND_STORE", hide_env = true)]
    pub store: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ORGBRAND_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cache an organization's branding for a user email
    #[command(after_help = "EXAMPLES:\n  \
        orgbrand put alice@acme.com --id org_123 --name Acme --logo-url https://cdn.acme.com/logo.png")]
    Put {
        /// User email (case-insensitive)
        email: String,

        /// Organization ID
        #[arg(long)]
        id: String,

        /// Organization display name
        #[arg(long)]
        name: String,

        /// Organization logo URL
        #[arg(long)]
        logo_url: Option<String>,
    },

    /// Show the cached organization for a user email
    Get {
        /// User email (case-insensitive)
        email: String,
    },

    /// Show the most recently cached organization
    Recent,

    /// Remove the cached organization for a user email
    Clear {
        /// User email (case-insensitive)
        email: String,
    },

    /// Remove every cached organization
    ClearAll,

    /// List cached organizations, including expired and malformed entries
    #[command(visible_alias = "ls")]
    List,

    /// Resolve the icon to display for a user (or the most recent one)
    Icon {
        /// User email; defaults to the most recently cached organization
        #[arg(long)]
        email: Option<String>,

        /// Treat the cached logo as having failed to load
        #[arg(long)]
        load_failed: bool,
    },

    /// Show cache statistics
    Status,

    /// Print store directory path
    Path,

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_put() {
        let cli = Cli::parse_from([
            "orgbrand",
            "put",
            "Alice@Acme.com",
            "--id",
            "org_1",
            "--name",
            "Acme",
        ]);

        match cli.command {
            Commands::Put {
                email,
                id,
                name,
                logo_url,
            } => {
                assert_eq!(email, "Alice@Acme.com");
                assert_eq!(id, "org_1");
                assert_eq!(name, "Acme");
                assert_eq!(logo_url, None);
            }
            other => panic!("Expected Put, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_icon_flags() {
        let cli = Cli::parse_from(["orgbrand", "icon", "--load-failed"]);
        match cli.command {
            Commands::Icon { email, load_failed } => {
                assert_eq!(email, None);
                assert!(load_failed);
            }
            other => panic!("Expected Icon, got {:?}", other),
        }
    }
}
