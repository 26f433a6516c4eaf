//! # kbase core
//!
//! Shared logic for kbase: data models, text normalization and
//! chunking, lexical scoring, the chunk store abstraction, the
//! ingestion pipeline, and query-time retrieval.
//!
//! This crate performs no I/O of its own. All storage goes through
//! the [`store::ChunkStore`] trait, so the same pipeline runs against
//! SQLite in the application crate and against [`store::memory::MemoryStore`]
//! in tests.

pub mod chunk;
pub mod error;
pub mod ingest;
pub mod models;
pub mod retrieve;
pub mod score;
pub mod seed;
pub mod store;
pub mod token;
