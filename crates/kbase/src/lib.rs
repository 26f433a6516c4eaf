//! # kbase
//!
//! Document ingestion and lexical retrieval for membership knowledge
//! bases, exposed as the `kbase` CLI over a SQLite store.
//!
//! ## Data flow
//!
//! 1. `kbase ingest <file>` reads a text file, normalizes it, splits
//!    it into token-budgeted chunks (`kbase-core`), and writes the
//!    chunk set plus a document metadata record to SQLite in one
//!    transaction per document.
//! 2. `kbase search "<query>"` loads the chunk collection, scores
//!    every chunk against the query by lexical overlap, and prints
//!    the ranked top-K sources — or a "no relevant sources" notice
//!    when nothing overlaps.
//!
//! All algorithmic behavior lives in `kbase-core`; this crate adds
//! the TOML configuration, the SQLite [`ChunkStore`](kbase_core::store::ChunkStore)
//! backend, and the CLI surface.

pub mod config;
pub mod db;
pub mod docs;
pub mod ingest;
pub mod search;
pub mod sqlite_store;
pub mod stats;
