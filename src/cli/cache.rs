//! Cache commands

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cache::{CachedOrganization, EntryReport, Organization, Outcome};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::formatters::{format_age, format_timestamp_local};
use crate::output::json::format_json;
use crate::output::table::format_table;

/// One row of `list` output
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "ORGANIZATION")]
    organization: String,
    #[tabled(rename = "LOGO")]
    logo_url: String,
    #[tabled(rename = "CACHED")]
    cached_at: String,
    #[tabled(rename = "AGE")]
    age: String,
    #[tabled(rename = "STATE")]
    state: String,
}

impl EntryRow {
    fn from_report(report: &EntryReport) -> Self {
        match report {
            EntryReport::Valid(record) => Self::from_record(record, "valid"),
            EntryReport::Expired(record) => Self::from_record(record, "expired"),
            EntryReport::Malformed { key } => Self {
                email: key.clone(),
                organization: "-".to_string(),
                logo_url: "-".to_string(),
                cached_at: "-".to_string(),
                age: "-".to_string(),
                state: "malformed".to_string(),
            },
        }
    }

    fn from_record(record: &CachedOrganization, state: &str) -> Self {
        Self {
            email: record.email.clone(),
            organization: record.name.clone(),
            logo_url: record.logo().unwrap_or("-").to_string(),
            cached_at: format_timestamp_local(record.cached_at),
            age: format_age(record.age(Utc::now())),
            state: state.to_string(),
        }
    }
}

/// Cache an organization for an email
pub fn put(ctx: &CommandContext, email: &str, organization: Organization) -> Result<()> {
    match ctx.cache.write(email, organization) {
        Outcome::Done(()) => {
            let record = ctx.cache.read(email);
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json("put", &record)?),
                _ => println!("{} Cached organization for {}", "✓".green(), email.to_lowercase()),
            }
            Ok(())
        }
        Outcome::Skipped => Err(Error::Other("Email must not be empty".to_string())),
        Outcome::Failed(e) => Err(Error::Other(format!("Failed to cache organization: {}", e))),
    }
}

/// Show the cached organization for an email
pub fn get(ctx: &CommandContext, email: &str) -> Result<()> {
    let record = ctx.cache.read(email);
    print_record(ctx.format, "get", record.as_ref(), &format!("No cached organization for {}", email))
}

/// Show the most recently cached organization
pub fn recent(ctx: &CommandContext) -> Result<()> {
    let record = ctx.cache.read_most_recent();
    print_record(ctx.format, "recent", record.as_ref(), "No cached organizations")
}

/// Remove the entry for an email
pub fn clear(ctx: &CommandContext, email: &str) -> Result<()> {
    let existed = match ctx.cache.clear(email) {
        Outcome::Done(existed) => existed,
        Outcome::Skipped => false,
        Outcome::Failed(e) => return Err(Error::Other(format!("Failed to clear entry: {}", e))),
    };

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "email": email.to_lowercase(),
                "removed": existed,
                "success": true,
            });
            println!("{}", format_json("clear", &json)?);
        }
        _ => {
            if existed {
                println!("Cleared cached organization for {}", email.to_lowercase());
            } else {
                println!("No cached organization for {}", email.to_lowercase());
            }
        }
    }

    Ok(())
}

/// Remove every cache entry
pub fn clear_all(ctx: &CommandContext) -> Result<()> {
    let stats = match ctx.cache.clear_all() {
        Outcome::Done(stats) => stats,
        Outcome::Skipped => Default::default(),
        Outcome::Failed(e) => return Err(Error::Other(format!("Failed to clear cache: {}", e))),
    };

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", format_json("clear-all", &json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cache entries", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// List every entry with its state
pub fn list(ctx: &CommandContext) -> Result<()> {
    let rows: Vec<EntryRow> = ctx.cache.inspect().iter().map(EntryRow::from_report).collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json("list", &rows)?),
        _ => println!("{}", format_table(&rows)),
    }

    Ok(())
}

/// Show cache status/statistics
pub fn status(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.cache.stats();
    let path = ctx.cache.store().dir().display().to_string();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "valid_entries": stats.valid_entries,
                "expired_entries": stats.expired_entries,
                "malformed_entries": stats.malformed_entries,
                "oldest_entry": stats.oldest_entry,
                "newest_entry": stats.newest_entry,
                "expiry_days": ctx.cache.expiry_days(),
                "path": path,
            });
            println!("{}", format_json("status", &json)?);
        }
        _ => {
            println!("{}", "Cache Status".bold());
            println!("────────────────────────────────────────");
            println!("Location:       {}", path.cyan());
            println!("Valid entries:  {}", stats.valid_entries);
            println!("Expired:        {}", stats.expired_entries);
            println!("Malformed:      {}", stats.malformed_entries);
            println!("Expiry window:  {} days", ctx.cache.expiry_days());

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_timestamp_local(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_timestamp_local(newest));
            }
        }
    }

    Ok(())
}

/// Show store path without opening the store
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_at(opts.config_ref())?;
    let dir = CommandContext::resolve_store_dir(opts, &config)?;
    println!("{}", dir.display());
    Ok(())
}

fn print_record(
    format: OutputFormat,
    command: &str,
    record: Option<&CachedOrganization>,
    miss: &str,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(command, &record)?),
        OutputFormat::Table => match record {
            Some(record) => println!("{}", format_table(&[EntryRow::from_record(record, "valid")])),
            None => println!("{}", miss),
        },
        OutputFormat::Pretty => match record {
            Some(record) => {
                println!("{}", record.name.bold());
                println!("ID:        {}", record.id);
                println!("Email:     {}", record.email);
                let logo = match record.logo() {
                    Some(url) => url.cyan().to_string(),
                    None => "none".dimmed().to_string(),
                };
                println!("Logo:      {}", logo);
                println!("Cached:    {}", format_timestamp_local(record.cached_at));
                println!("Age:       {}", format_age(record.age(Utc::now())));
            }
            None => println!("{}", miss),
        },
    }
    Ok(())
}
