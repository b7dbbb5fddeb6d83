//! orgbrand CLI - inspect and manage the organization logo cache

use clap::Parser;

use orgbrand::Result;
use orgbrand::cache::Organization;
use orgbrand::cli::{self, Cli, CommandContext, Commands, GlobalOptions};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Version => {
            println!("orgbrand version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Path => cli::cache::path(&opts),
        Commands::Put {
            email,
            id,
            name,
            logo_url,
        } => cli::cache::put(
            &CommandContext::new(&opts)?,
            &email,
            Organization::new(id, name, logo_url),
        ),
        Commands::Get { email } => cli::cache::get(&CommandContext::new(&opts)?, &email),
        Commands::Recent => cli::cache::recent(&CommandContext::new(&opts)?),
        Commands::Clear { email } => cli::cache::clear(&CommandContext::new(&opts)?, &email),
        Commands::ClearAll => cli::cache::clear_all(&CommandContext::new(&opts)?),
        Commands::List => cli::cache::list(&CommandContext::new(&opts)?),
        Commands::Icon { email, load_failed } => {
            cli::icon::run(&CommandContext::new(&opts)?, email.as_deref(), load_failed)
        }
        Commands::Status => cli::cache::status(&CommandContext::new(&opts)?),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
