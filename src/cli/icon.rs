//! Icon resolution command

use colored::Colorize;

use crate::branding::{BrandingResolver, BrandingSource};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::format_json;

/// Print the icon the sign-in page would show
pub fn run(ctx: &CommandContext, email: Option<&str>, load_failed: bool) -> Result<()> {
    let resolver = BrandingResolver::new(&ctx.cache, ctx.config.default_icon.as_str());
    let branding = resolver.resolve_with_load(email, |_| !load_failed);

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json("icon", &branding)?),
        OutputFormat::Table => println!("{}", branding.icon_url),
        OutputFormat::Pretty => {
            let source = match branding.source {
                BrandingSource::Cached => "cached".green(),
                BrandingSource::Default => "default".yellow(),
            };
            println!("Icon:          {} ({})", branding.icon_url.cyan(), source);
            if let Some(ref organization) = branding.organization {
                println!("Organization:  {}", organization);
            }
        }
    }

    Ok(())
}
