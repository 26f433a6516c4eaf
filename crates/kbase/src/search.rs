//! `kbase search` — query the knowledge base and print ranked sources.

use anyhow::Result;

use kbase_core::retrieve::{KnowledgeBase, RetrievalOutcome};
use kbase_core::seed::demo_chunks;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

pub async fn run_search(
    config: &Config,
    query: &str,
    top_k: Option<usize>,
    demo: bool,
    json: bool,
) -> Result<()> {
    let top_k = top_k.unwrap_or(config.retrieval.top_k);

    let kb = if demo {
        KnowledgeBase::from_chunks(demo_chunks())
    } else {
        let pool = db::connect(config).await?;
        let store = SqliteStore::new(pool.clone());
        let kb = KnowledgeBase::load(&store).await?;
        pool.close().await;
        kb
    };

    match kb.search(query, top_k) {
        RetrievalOutcome::NoRelevantSources => {
            if json {
                println!("[]");
            } else {
                println!("No relevant sources.");
            }
        }
        RetrievalOutcome::Sources(hits) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for (i, hit) in hits.iter().enumerate() {
                    println!("{}. [{:.2}] {}", i + 1, hit.relevance_score, hit.file_name);
                    println!("    \"{}\"", hit.snippet.replace('\n', " ").trim());
                    println!();
                }
            }
        }
    }

    Ok(())
}
