//! Database statistics overview.
//!
//! Quick summary of what's indexed: document and chunk counts plus
//! database size. Used by `kbase stats` to confirm ingestion is
//! landing where expected.

use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let total_docs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(&pool)
        .await?;

    let total_chunks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
        .fetch_one(&pool)
        .await?;

    let empty_docs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE total_chunks = 0")
            .fetch_one(&pool)
            .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("kbase — Database Stats");
    println!("======================");
    println!();
    println!("  Database:   {}", config.db.path.display());
    println!("  Size:       {} bytes", db_size);
    println!();
    println!("  Documents:  {}", total_docs);
    println!("  Chunks:     {}", total_chunks);
    println!("  Empty docs: {}", empty_docs);

    pool.close().await;
    Ok(())
}
