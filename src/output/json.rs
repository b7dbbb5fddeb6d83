//! JSON envelope shared by every `--format json` command

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// `{"data": ..., "meta": ...}` as printed by the CLI
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Subcommand that produced the payload, e.g. `get` or `clear-all`
    pub command: String,
    pub generated_at: String,
    pub version: String,
}

impl Metadata {
    fn for_command(command: &str) -> Self {
        Self {
            command: command.to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Pretty-print `data` inside the envelope for `command`
pub fn format_json<T: Serialize + ?Sized>(
    command: &str,
    data: &T,
) -> Result<String, serde_json::Error> {
    let envelope = Envelope {
        data,
        meta: Metadata::for_command(command),
    };
    serde_json::to_string_pretty(&envelope)
}
