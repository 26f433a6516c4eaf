//! `kbase docs` — list ingested document records.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

pub async fn run_docs(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let rows = sqlx::query(
        r#"
        SELECT document_id, file_name, file_type, total_chunks, status, text_length, processed_at
        FROM documents
        ORDER BY rowid ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        println!("No documents ingested.");
        pool.close().await;
        return Ok(());
    }

    for row in &rows {
        let document_id: String = row.get("document_id");
        let file_name: String = row.get("file_name");
        let status: String = row.get("status");
        let total_chunks: i64 = row.get("total_chunks");
        let text_length: i64 = row.get("text_length");
        let processed_ts: i64 = row.get("processed_at");

        let processed = chrono::DateTime::from_timestamp(processed_ts, 0)
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            .unwrap_or_else(|| processed_ts.to_string());

        println!("{} — {}", document_id, file_name);
        println!("    status: {}", status);
        println!("    chunks: {}", total_chunks);
        println!("    text length: {}", text_length);
        println!("    processed: {}", processed);
        println!();
    }

    pool.close().await;
    Ok(())
}
