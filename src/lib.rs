//! # rdbms-discovery
//!
//! Vendor-neutral discovery of relational database metadata.
//!
//! ## Layers
//!
//! Databases disagree on what a "catalog" and a "schema" are: some key
//! tables by catalog, some by schema, some populate both and some neither.
//! This crate asks a connection's metadata primitives and normalizes the
//! answers into one table/column model:
//!
//! ```text
//!   ConnectionProvider    pooling, credentials, Kerberos (host-supplied)
//!          │ acquire(authenticated)
//!          ▼
//!   MetadataSource        catalogs / schemas / tables / columns / keys
//!          │
//!          ▼
//!   SchemaDiscoverer      catalog-vs-schema disambiguation, fallbacks,
//!          │              TypeMapper column mapping
//!          ▼
//!   TableSchema { name, schema_name, fields }
//! ```

pub mod config;
pub mod discovery;
pub mod metadata;
pub mod model;
pub mod types;

/// The types most callers need.
pub mod prelude {
    pub use crate::config::{KerberosSettings, Settings};
    pub use crate::discovery::{
        DiscoveryError, DiscoveryOptions, DiscoveryResult, PrimaryKeyLookup, SchemaDiscoverer,
    };
    pub use crate::metadata::{
        ColumnRow, ConnectionProvider, MetadataError, MetadataResult, MetadataSource,
        PrimaryKeyRow, TableRow,
    };
    pub use crate::model::{Field, PrimaryKeySet, TableIdentity, TableSchema};
    pub use crate::types::{LogicalType, StandardTypeMapper, TypeMapper};
}

pub use discovery::{DiscoveryError, SchemaDiscoverer};
pub use model::{Field, TableSchema};
