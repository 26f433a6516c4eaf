//! `kbase ingest` — read a text file and run the ingestion pipeline.

use anyhow::{Context, Result};
use std::path::Path;

use kbase_core::ingest::ingest;
use kbase_core::models::IngestRequest;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

pub async fn run_ingest(
    config: &Config,
    file: &Path,
    id: Option<String>,
    file_type: Option<String>,
) -> Result<()> {
    let raw_text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let document_id = id.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone())
    });

    let file_type = file_type.unwrap_or_else(|| {
        file.extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "txt".to_string())
    });

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());

    let receipt = ingest(
        &store,
        IngestRequest {
            document_id,
            file_name: file_name.clone(),
            file_type,
            raw_text,
        },
        config.chunking.max_tokens,
    )
    .await?;

    println!("ingest {}", file_name);
    println!("  document id: {}", receipt.document_id);
    println!("  chunks created: {}", receipt.chunks_created);
    println!("  text length: {}", receipt.text_length);
    println!("ok");

    pool.close().await;
    Ok(())
}
