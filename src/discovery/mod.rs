//! Schema discovery.
//!
//! `SchemaDiscoverer` turns the raw metadata primitives of a
//! `MetadataSource` into a normalized table/column model, reconciling the
//! different ways vendors use catalogs and schemas.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      SchemaDiscoverer                           │
//! │  - list_catalogs() / list_schemas()                             │
//! │  - list_tables(schema?, table?)     catalog/schema branching    │
//! │  - describe_table(schema?, table)   catalog disambiguation      │
//! │        └─ list_columns ─ list_primary_keys (two attempts)       │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │ acquire(authenticated)
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            ConnectionProvider / MetadataSource                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use rdbms_discovery::discovery::SchemaDiscoverer;
//! use rdbms_discovery::metadata::{MetadataSnapshot, SnapshotColumn, SnapshotProvider, SnapshotTable};
//!
//! let snapshot = MetadataSnapshot::new().with_schema("SALES").with_table(
//!     SnapshotTable::new(None, Some("SALES"), "ORDERS")
//!         .with_column(SnapshotColumn::new("ID", 4).not_null())
//!         .with_primary_key(["ID"]),
//! );
//! let discoverer = SchemaDiscoverer::new(SnapshotProvider::new(snapshot));
//!
//! assert_eq!(discoverer.list_tables(None, None).unwrap(), vec!["SALES.ORDERS"]);
//! let table = discoverer.describe_table(Some("sales"), "orders").unwrap().unwrap();
//! assert_eq!(table.schema_name, "SALES");
//! assert!(table.fields[0].primary_key);
//! ```

mod columns;
mod describe;
mod error;
mod tables;

pub use columns::{columns_to_fields, list_columns, list_primary_keys, PrimaryKeyLookup};
pub use error::{DiscoveryError, DiscoveryResult, Operation, Target};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, Span};

use crate::config::Settings;
use crate::metadata::{ConnectionProvider, MetadataSource};
use crate::model::Field;
use crate::types::{StandardTypeMapper, TypeMapper};

/// Table types requested from table enumerations by default.
pub const DEFAULT_TABLE_TYPES: [&str; 2] = ["TABLE", "VIEW"];

/// Behavior switches for a discoverer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Table types passed to table enumerations.
    pub table_types: Vec<String>,
    /// Describe tables through the authenticated connection path.
    pub authenticated: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            table_types: DEFAULT_TABLE_TYPES.iter().map(|t| t.to_string()).collect(),
            authenticated: false,
        }
    }
}

impl From<&Settings> for DiscoveryOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            table_types: settings.discovery.table_types.clone(),
            authenticated: settings.kerberos.enabled,
        }
    }
}

/// Discovers catalogs, schemas, tables and columns through a provider.
///
/// Every call acquires its own connection and drops it before returning;
/// no state is kept between calls, so one discoverer can serve concurrent
/// callers when the provider can.
pub struct SchemaDiscoverer<P: ConnectionProvider> {
    provider: P,
    type_mapper: Arc<dyn TypeMapper>,
    options: DiscoveryOptions,
    span: Span,
}

impl<P: ConnectionProvider> SchemaDiscoverer<P> {
    /// Create a discoverer with default options and the standard type mapping.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            type_mapper: Arc::new(StandardTypeMapper),
            options: DiscoveryOptions::default(),
            span: tracing::info_span!("schema_discovery"),
        }
    }

    /// Create a discoverer configured from settings.
    pub fn from_settings(provider: P, settings: &Settings) -> Self {
        Self::new(provider).with_options(DiscoveryOptions::from(settings))
    }

    pub fn with_options(mut self, options: DiscoveryOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the type code translation.
    pub fn with_type_mapper(mut self, type_mapper: Arc<dyn TypeMapper>) -> Self {
        self.type_mapper = type_mapper;
        self
    }

    /// Run every operation inside `span`.
    ///
    /// This is how hosts attach their own logging context (connection name,
    /// job id, ...) to discovery events.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Acquire a connection for use with `list_columns` / `list_primary_keys`.
    ///
    /// Uses the authenticated path when the options ask for it.
    pub fn connect(&self) -> DiscoveryResult<P::Connection> {
        self.acquire(
            Operation::DescribeTable,
            &Target::default(),
            self.options.authenticated,
        )
    }

    /// List all catalogs in source order.
    pub fn list_catalogs(&self) -> DiscoveryResult<Vec<String>> {
        let _entered = self.span.enter();
        self.fetch_catalogs(Operation::ListCatalogs, &Target::default())
    }

    /// List all schemas in source order.
    pub fn list_schemas(&self) -> DiscoveryResult<Vec<String>> {
        let _entered = self.span.enter();
        self.fetch_schemas(Operation::ListSchemas, &Target::default())
    }

    /// Resolve the primary keys of a table on an open connection.
    pub fn list_primary_keys(
        &self,
        conn: &P::Connection,
        schema: Option<&str>,
        table: &str,
    ) -> PrimaryKeyLookup {
        let _entered = self.span.enter();
        list_primary_keys(conn, schema, table)
    }

    /// List the fields of a table on an open connection.
    pub fn list_columns(
        &self,
        conn: &P::Connection,
        schema: Option<&str>,
        table: &str,
    ) -> DiscoveryResult<Vec<Field>> {
        let _entered = self.span.enter();
        list_columns(conn, schema, table, self.type_mapper.as_ref()).map_err(|e| {
            DiscoveryError::metadata(Operation::DescribeTable, Target::new(schema, Some(table)), e)
        })
    }

    fn acquire(
        &self,
        operation: Operation,
        target: &Target,
        authenticated: bool,
    ) -> DiscoveryResult<P::Connection> {
        self.provider
            .acquire(authenticated)
            .map_err(|e| DiscoveryError::metadata(operation, target.clone(), e))
    }

    fn fetch_catalogs(&self, operation: Operation, target: &Target) -> DiscoveryResult<Vec<String>> {
        let conn = self.acquire(operation, target, false)?;
        let catalogs = conn
            .catalogs()
            .map_err(|e| DiscoveryError::metadata(operation, target.clone(), e))?;
        debug!(count = catalogs.len(), "listed catalogs");
        Ok(catalogs)
    }

    fn fetch_schemas(&self, operation: Operation, target: &Target) -> DiscoveryResult<Vec<String>> {
        let conn = self.acquire(operation, target, false)?;
        let schemas = conn
            .schemas()
            .map_err(|e| DiscoveryError::metadata(operation, target.clone(), e))?;
        debug!(count = schemas.len(), "listed schemas");
        Ok(schemas)
    }
}

impl<P: ConnectionProvider + fmt::Debug> fmt::Debug for SchemaDiscoverer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDiscoverer")
            .field("provider", &self.provider)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
