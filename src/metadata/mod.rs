//! Metadata source module.
//!
//! This module defines the seam between discovery and the database: a
//! `ConnectionProvider` that yields scoped connections, and the
//! `MetadataSource` query primitives every connection exposes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      ConnectionProvider                         │
//! │         acquire(authenticated) -> Connection (drop = release)   │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       MetadataSource                            │
//! │  - catalogs()                 - columns(cat, schema%, table%)   │
//! │  - schemas()                  - primary_keys(cat, schema, table)│
//! │  - tables(cat, schema%, table%, types)                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `SnapshotProvider` is an implementation backed by serialized metadata.

mod error;
mod pattern;
mod provider;
mod snapshot;
mod types;

pub use error::{MetadataError, MetadataQuery, MetadataResult};
pub use pattern::NamePattern;
pub use provider::{
    escape_pattern, ConnectionProvider, MetadataSource, DEFAULT_SEARCH_ESCAPE, WILDCARD,
};
pub use snapshot::{
    MetadataSnapshot, SnapshotColumn, SnapshotConnection, SnapshotError, SnapshotProvider,
    SnapshotTable,
};
pub use types::{names_equal, non_blank, ColumnRow, PrimaryKeyRow, TableRow};
