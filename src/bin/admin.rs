//! CLI administration tool for shortlink.
//!
//! Talks to the configured mapping store directly, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts for the URL if omitted)
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Reserve a custom code
//! cargo run --bin admin -- shorten https://example.com --code promo
//!
//! # Look up a code
//! cargo run --bin admin -- resolve promo
//!
//! # Check the store connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `shortlink::config`.

use shortlink::application::services::{
    CodeAllocator, RandomCodeGenerator, RedirectResolver, Resolution,
};
use shortlink::config::{self, Config, StoreBackend};
use shortlink::domain::MappingStore;
use shortlink::server::{build_store, connect_pool};
use shortlink::telemetry;
use shortlink::utils::short_url::compose_short_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Allocate a short code for a URL
    Shorten {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,

        /// Custom short code; characters outside [A-Za-z0-9_-] are stripped
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the target of a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init("warn", &config.log_format)?;

    match cli.command {
        Commands::Shorten { url, code, yes } => {
            let store = build_store(&config).await?;
            shorten(&config, store, url, code, yes).await?
        }
        Commands::Resolve { code } => {
            let store = build_store(&config).await?;
            resolve(store, &code).await?
        }
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Allocates a short code with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Show what will be created
/// 3. Confirm (unless `--yes`)
/// 4. Allocate through [`CodeAllocator`], same rules as the HTTP API
async fn shorten(
    config: &Config,
    store: Arc<dyn MappingStore>,
    url: Option<String>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Long URL").interact_text()?,
    };

    println!("  URL:  {}", long_url.cyan());
    match &code {
        Some(c) => println!("  Code: {}", c.bright_yellow()),
        None => println!("  Code: {}", "random".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this short link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let allocator = CodeAllocator::with_generator(
        store,
        Arc::new(RandomCodeGenerator::new()),
        config.allocation_max_attempts,
    );

    let allocated = allocator
        .allocate(&long_url, code.as_deref())
        .await
        .context("Failed to shorten")?;

    println!(
        "{} {}",
        "Created".green().bold(),
        allocated.as_str().bright_yellow().bold()
    );

    if let Some(base) = config.public_base_url()? {
        let short_url = compose_short_url(&base, &allocated)
            .context("Failed to build short URL")?;
        println!("  {}", short_url.bright_white());
    }
    println!();

    Ok(())
}

/// Prints the target of a short code.
async fn resolve(store: Arc<dyn MappingStore>, code: &str) -> Result<()> {
    let resolver = RedirectResolver::new(store);

    match resolver
        .resolve(code)
        .await
        .context("Lookup failed")?
    {
        Resolution::Redirect { target } => {
            println!("  {} -> {}", code.bright_yellow(), target.cyan());
        }
        Resolution::NotFound => {
            println!("{}", format!("  No short link for '{code}'").yellow());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking store connection...".bright_blue());

            let store = build_store(config).await?;
            store
                .ping()
                .await
                .context("Store unreachable")?;

            println!("{}", "Store connection OK".green().bold());
        }
        DbAction::Info => {
            if config.store_backend == StoreBackend::Memory {
                println!(
                    "{}",
                    "In-memory store configured; there is no database to inspect".yellow()
                );
                return Ok(());
            }

            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let pool = connect_pool(config).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL:  {}", version.bright_white());
            println!(
                "  Short links: {}",
                links_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
