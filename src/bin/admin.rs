//! CLI administration tool for shortkey.
//!
//! Provides commands for inspecting links, adjusting click counts and
//! performing database checks without going through the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # View statistics, with the ten most clicked links
//! cargo run --bin admin -- stats --top 10
//!
//! # Show one mapping
//! cargo run --bin admin -- lookup aB3dE9
//!
//! # Overwrite a click count
//! cargo run --bin admin -- clicks set aB3dE9 0
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shortkey::application::services::StatsService;
use shortkey::domain::repositories::MappingRepository;
use shortkey::infrastructure::persistence::PgMappingRepository;
use shortkey::utils::key_generator::is_valid_key;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortkey.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats {
        /// Also list the N most clicked links
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Show the mapping stored under a short key
    Lookup {
        /// Six-character short key
        key: String,
    },

    /// Manage click counts
    Clicks {
        #[command(subcommand)]
        action: ClicksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Click count subcommands.
#[derive(Subcommand)]
enum ClicksAction {
    /// Overwrite the click count of a short key
    Set {
        key: String,
        count: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repo = Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Stats { top } => handle_stats(repo, top).await?,
        Commands::Lookup { key } => lookup(repo, &key).await?,
        Commands::Clicks {
            action: ClicksAction::Set { key, count, yes },
        } => set_clicks(repo, &key, count, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays link and click totals, optionally with the most clicked links.
async fn handle_stats(repo: Arc<PgMappingRepository>, top: Option<usize>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = StatsService::new(repo)
        .resync()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Links:  {}",
        stats.total_shortened_links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        stats.total_clicks().to_string().bright_green().bold()
    );
    println!();

    if let Some(limit) = top {
        println!("  {:<8} {}", "KEY".bold(), "CLICKS".bold());
        println!("  {}", "─".repeat(20).bright_black());
        for (key, clicks) in stats.top(limit) {
            println!("  {:<8} {}", key.cyan(), clicks);
        }
        println!();
    }

    Ok(())
}

/// Prints the mapping stored under `key`.
async fn lookup(repo: Arc<PgMappingRepository>, key: &str) -> Result<()> {
    let url = repo
        .find_by_short_key(key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short key not found")?;

    let mapping = repo
        .find_by_original_url(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short key not found")?;

    println!("  Key:     {}", mapping.short_key.cyan());
    println!("  URL:     {}", mapping.original_url.bright_white());
    println!("  Clicks:  {}", mapping.clicks.to_string().bright_green());
    println!(
        "  Created: {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );

    Ok(())
}

/// Overwrites a click count after confirmation.
///
/// # Safety
///
/// - Requires confirmation unless `--yes` is given (default: No)
/// - Refuses negative counts and unknown keys
async fn set_clicks(
    repo: Arc<PgMappingRepository>,
    key: &str,
    count: i64,
    skip_confirm: bool,
) -> Result<()> {
    if !is_valid_key(key) {
        anyhow::bail!("'{}' is not a valid short key", key);
    }
    if count < 0 {
        anyhow::bail!("Click count must not be negative");
    }

    let url = repo
        .find_by_short_key(key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short key not found")?;

    println!("  Key: {}", key.cyan());
    println!("  URL: {}", url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Set click count to {count}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    StatsService::new(repo)
        .set_clicks(key, count)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update clicks: {}", e))?;

    println!("{}", "✅ Click count updated".green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let mappings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Mappings:   {}", mappings.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
