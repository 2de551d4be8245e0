//! # Linkstash CLI (`lks`)
//!
//! The `lks` binary is the primary interface for Linkstash. It provides
//! commands for database initialization, bulk bookmark import, single-URL
//! saves, listing, and export.
//!
//! ## Usage
//!
//! ```bash
//! lks --config ./config/lks.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lks init` | Create the SQLite database and run schema migrations |
//! | `lks import <file>` | Ingest a browser bookmark export (Netscape HTML or Chromium JSON) |
//! | `lks save <url>` | Fetch a page and save it with extracted metadata |
//! | `lks list` | List stored bookmarks |
//! | `lks export` | Emit stored bookmarks as Netscape HTML or JSON |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! lks init --config ./config/lks.toml
//!
//! # Import a Firefox/Chrome HTML export
//! lks import bookmarks.html
//!
//! # Import a Chromium profile's Bookmarks file
//! lks import ~/.config/chromium/Default/Bookmarks --format chromium
//!
//! # Save a single page
//! lks save https://example.com/article
//!
//! # Export everything back out as JSON
//! lks export --format json --output bookmarks.json
//! ```

mod category;
mod chromium;
mod config;
mod db;
mod export;
mod fetch;
mod ingest;
mod list;
mod metadata;
mod migrate;
mod models;
mod netscape;
mod save;
mod store;

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ingest::ImportFormat;

/// Linkstash CLI — bookmark ingestion and normalization.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/lks.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "lks",
    about = "Linkstash — bookmark ingestion and normalization",
    version,
    long_about = "Linkstash parses browser bookmark exports (Netscape HTML, Chromium JSON) into \
    canonical records, extracts page metadata for single-URL saves, infers topical categories, \
    and stores everything in SQLite."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/lks.toml`. Database, fetch, and import
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/lks.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the bookmarks table. This
    /// command is idempotent — running it multiple times is safe.
    Init,

    /// Ingest a browser bookmark export file.
    ///
    /// Parses the file into candidates, resolves a category for each, and
    /// inserts them in source order. Duplicates (same URL for the same
    /// user) are skipped by the store and reported separately.
    Import {
        /// Path to the export file (`.html` Netscape export or a Chromium
        /// `Bookmarks` JSON file).
        file: PathBuf,

        /// Source format: `auto`, `netscape`, or `chromium`.
        #[arg(long, default_value = "auto")]
        format: String,

        /// Owner of the imported bookmarks. Defaults to `import.default_user`.
        #[arg(long)]
        user: Option<String>,

        /// Collection to place the bookmarks in.
        #[arg(long)]
        collection: Option<String>,

        /// Parse and count without writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of candidates to import.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch a page and save it as a bookmark.
    ///
    /// Extracts title/description/preview image from the page's meta tags.
    /// A failed or timed-out fetch is a soft failure: the bookmark is
    /// still saved from the bare URL.
    Save {
        /// The http(s) URL to save.
        url: String,

        /// Owner of the bookmark. Defaults to `import.default_user`.
        #[arg(long)]
        user: Option<String>,

        /// Collection to place the bookmark in.
        #[arg(long)]
        collection: Option<String>,
    },

    /// List stored bookmarks.
    List {
        /// Filter by resolved category (e.g. `Learning`).
        #[arg(long)]
        category: Option<String>,

        /// Owner to list. Defaults to `import.default_user`.
        #[arg(long)]
        user: Option<String>,

        /// Maximum number of rows.
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Emit stored bookmarks as Netscape HTML or JSON.
    Export {
        /// Output format: `html` (Netscape, re-importable) or `json`.
        #[arg(long, default_value = "html")]
        format: String,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Owner to export. Defaults to `import.default_user`.
        #[arg(long)]
        user: Option<String>,
    },
}

/// Map the `--format` import flag; `auto` defers to detection.
fn parse_import_format(raw: &str) -> anyhow::Result<Option<ImportFormat>> {
    match raw {
        "auto" => Ok(None),
        "netscape" => Ok(Some(ImportFormat::Netscape)),
        "chromium" => Ok(Some(ImportFormat::Chromium)),
        other => bail!(
            "Unknown import format: '{}'. Must be auto, netscape, or chromium.",
            other
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import {
            file,
            format,
            user,
            collection,
            dry_run,
            limit,
        } => {
            let format = parse_import_format(&format)?;
            ingest::run_import(&cfg, &file, format, user, collection, dry_run, limit).await?;
        }
        Commands::Save {
            url,
            user,
            collection,
        } => {
            save::run_save(&cfg, &url, user, collection).await?;
        }
        Commands::List {
            category,
            user,
            limit,
        } => {
            list::run_list(&cfg, user, category, limit).await?;
        }
        Commands::Export {
            format,
            output,
            user,
        } => {
            export::run_export(&cfg, output.as_deref(), &format, user).await?;
        }
    }

    Ok(())
}
