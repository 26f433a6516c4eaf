//! # kbase CLI
//!
//! The `kbase` binary drives the document ingestion and retrieval
//! pipeline over a SQLite database.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kbase init` | Create the SQLite database and schema |
//! | `kbase ingest <file>` | Normalize, chunk, and store a text file |
//! | `kbase search "<query>"` | Rank stored chunks against a query |
//! | `kbase docs` | List ingested document records |
//! | `kbase stats` | Show document and chunk counts |
//!
//! ## Examples
//!
//! ```bash
//! kbase init --config ./kbase.toml
//! kbase ingest ./handbook.txt --config ./kbase.toml
//! kbase search "remote work policy" --config ./kbase.toml
//! kbase search "vpn" --demo            # built-in demo knowledge base
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kbase::{config, db, docs, ingest, search, stats};

/// kbase — document ingestion and lexical retrieval for membership
/// knowledge bases.
#[derive(Parser)]
#[command(
    name = "kbase",
    about = "Document ingestion and lexical retrieval for membership knowledge bases",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./kbase.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the documents/chunks
    /// tables. Idempotent — running it multiple times is safe.
    Init,

    /// Ingest a text file.
    ///
    /// Normalizes the file's text, splits it into token-budgeted
    /// chunks, and stores the chunk set plus a document metadata
    /// record. Re-ingesting under the same id replaces the previous
    /// chunk set.
    Ingest {
        /// Path to the text file to ingest.
        file: PathBuf,

        /// Document id (defaults to the file stem). Re-using an id
        /// replaces that document's chunks.
        #[arg(long)]
        id: Option<String>,

        /// File type label (defaults to the file extension).
        #[arg(long)]
        file_type: Option<String>,
    },

    /// Search stored chunks.
    ///
    /// Scores every chunk against the query by lexical overlap and
    /// prints the ranked top-K sources with relevance scores.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of sources to return (default from config).
        #[arg(long)]
        top_k: Option<usize>,

        /// Search the built-in demo knowledge base instead of the
        /// database.
        #[arg(long)]
        demo: bool,

        /// Emit results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List ingested document records.
    Docs,

    /// Show document and chunk counts.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `search --demo` runs without a database, so a missing config
    // file is tolerated there.
    let config = match &cli.command {
        Commands::Search { demo: true, .. } => config::load_config(&cli.config)
            .unwrap_or_else(|_| config::Config::minimal()),
        _ => config::load_config(&cli.config)?,
    };

    match cli.command {
        Commands::Init => {
            db::run_migrations(&config).await?;
            println!("Initialized database at {}", config.db.path.display());
        }
        Commands::Ingest {
            file,
            id,
            file_type,
        } => {
            ingest::run_ingest(&config, &file, id, file_type).await?;
        }
        Commands::Search {
            query,
            top_k,
            demo,
            json,
        } => {
            search::run_search(&config, &query, top_k, demo, json).await?;
        }
        Commands::Docs => {
            docs::run_docs(&config).await?;
        }
        Commands::Stats => {
            stats::run_stats(&config).await?;
        }
    }

    Ok(())
}
