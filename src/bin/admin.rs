//! CLI administration tool for tinylink.
//!
//! Creates and inspects URL mappings and performs database checks without
//! going through the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts for the URL when omitted)
//! cargo run --bin admin -- link create https://example.com
//!
//! # Shorten with an expiry, skipping confirmation
//! cargo run --bin admin -- link create https://example.com --expire-at 2030-01-01T00:00:00Z -y
//!
//! # Show a mapping
//! cargo run --bin admin -- link show aB3dE9
//!
//! # List the most recent mappings
//! cargo run --bin admin -- link list --limit 20
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection
//! - `PUBLIC_BASE_URL` (optional): used to print fully-qualified short URLs

use tinylink::application::services::AllocationService;
use tinylink::config::Config;
use tinylink::domain::entities::UrlMapping;
use tinylink::infrastructure::persistence::PgUrlMappingRepository;
use tinylink::utils::code_generator::{RandomCodeGenerator, validate_short_code};
use tinylink::utils::request_origin::build_short_url;
use tinylink::utils::url_validator::validate_original_url;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
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
    /// Manage URL mappings
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
    /// Show mapping statistics
    Stats,
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL, or show the existing mapping for it
    Create {
        /// URL to shorten (prompted if omitted)
        url: Option<String>,
        /// Expiry as an RFC 3339 timestamp, e.g. 2030-01-01T00:00:00Z
        #[arg(long, value_parser = parse_expire_at)]
        expire_at: Option<DateTime<Utc>>,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the mapping for a short code
    Show {
        /// 6-character short code
        code: String,
    },
    /// List the most recent mappings
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn parse_expire_at(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp: {}", e))
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgUrlMappingRepository::new(Arc::new(pool.clone())));
    let service = AllocationService::new(repository, Arc::new(RandomCodeGenerator));

    match action {
        LinkAction::Create {
            url,
            expire_at,
            yes,
        } => create_link(&service, url, expire_at, yes).await?,
        LinkAction::Show { code } => show_link(&service, &code).await?,
        LinkAction::List { limit } => list_links(&service, limit).await?,
    }

    Ok(())
}

/// Creates (or fetches) the mapping for a URL with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Validate it the same way the HTTP endpoints do
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Allocate through [`AllocationService`]
async fn create_link(
    service: &AllocationService,
    url: Option<String>,
    expire_at: Option<DateTime<Utc>>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let input = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to shorten")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let original_url = validate_original_url(&input).map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "Link details:".bright_white().bold());
    println!("  URL:     {}", original_url.cyan());
    match expire_at {
        Some(ts) => println!("  Expires: {}", ts.to_rfc3339().cyan()),
        None => println!("  Expires: {}", "never".dimmed()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mapping = service
        .create_short_url(&original_url, expire_at)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "✅ Short link ready!".green().bold());
    print_mapping(&mapping);

    if expire_at.is_some() && mapping.expire_at != expire_at {
        println!();
        println!(
            "{}",
            "⚠️  URL was already shortened; the existing expiry was kept.".yellow()
        );
    }
    println!();

    Ok(())
}

async fn show_link(service: &AllocationService, code: &str) -> Result<()> {
    validate_short_code(code).map_err(|e| anyhow::anyhow!("{}", e))?;

    match service.find_mapping(code).await? {
        Some(mapping) => {
            println!("{}", "🔗 Short Link".bright_blue().bold());
            println!();
            print_mapping(&mapping);
            println!();
        }
        None => {
            println!("{}", format!("❌ No mapping for '{}'", code).red());
        }
    }

    Ok(())
}

async fn list_links(service: &AllocationService, limit: i64) -> Result<()> {
    if limit <= 0 {
        anyhow::bail!("--limit must be positive, got {}", limit);
    }

    let mappings = service.recent_mappings(limit).await?;

    if mappings.is_empty() {
        println!("{}", "No links found".yellow());
        return Ok(());
    }

    println!("{}", "🔗 Recent Links".bright_blue().bold());
    println!();

    for mapping in &mappings {
        let status = if mapping.is_expired() {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {} {} {} {}",
            mapping.short_code.bright_yellow().bold(),
            status,
            mapping.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            mapping.original_url
        );
    }

    println!();
    println!("Showing {} link(s)", mappings.len());

    Ok(())
}

fn print_mapping(mapping: &UrlMapping) {
    println!("  Code:     {}", mapping.short_code.bright_yellow().bold());

    if let Ok(base) = std::env::var("PUBLIC_BASE_URL") {
        let base = base.trim().trim_end_matches('/');
        if !base.is_empty() {
            println!(
                "  Short:    {}",
                build_short_url(base, &mapping.short_code).bright_cyan()
            );
        }
    }

    println!("  URL:      {}", mapping.original_url);
    println!("  Created:  {}", mapping.created_at.to_rfc3339());

    match mapping.expire_at {
        Some(ts) if mapping.is_expired() => {
            println!("  Expires:  {} {}", ts.to_rfc3339(), "(expired)".red())
        }
        Some(ts) => println!("  Expires:  {}", ts.to_rfc3339()),
        None => println!("  Expires:  {}", "never".dimmed()),
    }
}

/// Displays mapping statistics.
///
/// Shows:
/// - Total number of mappings
/// - Number of mappings that have expired
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await?;

    let expired: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings WHERE expire_at <= NOW()")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:   {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Expired: {}",
        expired.to_string().bright_green().bold()
    );
    println!();

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
    }

    Ok(())
}
