//! Storefront CLI - Command line tool for the storefront catalog.
//!
//! Commands:
//! - `storefront list` - Filter, search and sort the catalog
//! - `storefront facets` - Show the sidebar filter options for a page
//! - `storefront show` - Show one product with its derived attributes
//! - `storefront validate` - Audit the catalog payload for malformed rows
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod source;
mod telemetry;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, FacetsArgs, ListArgs, ShowArgs, ValidateArgs};

/// Storefront CLI - Browse and audit the product catalog
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products for a page with filters, search and sort applied
    List(ListArgs),

    /// Show available filter values for a page
    Facets(FacetsArgs),

    /// Show one product and its derived attributes
    Show(ShowArgs),

    /// Report malformed rows in the catalog payload
    Validate(ValidateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let filter = if cli.verbose {
        "debug"
    } else {
        ctx.config.logging.filter.as_str()
    };
    if let Err(e) = telemetry::init_tracing(filter) {
        ctx.output.warn(&format!("{:#}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Validate(args) => commands::validate::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
