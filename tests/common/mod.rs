//! Shared test fixtures: a recording, failure-injecting provider and sample
//! vendor snapshots.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rdbms_discovery::metadata::{
    ColumnRow, ConnectionProvider, MetadataError, MetadataQuery, MetadataResult,
    MetadataSnapshot, MetadataSource, PrimaryKeyRow, SnapshotColumn, SnapshotConnection,
    SnapshotProvider, SnapshotTable, TableRow,
};

/// SQL type codes used by the fixtures.
pub const INTEGER: i32 = 4;
pub const DECIMAL: i32 = 3;
pub const VARCHAR: i32 = 12;
pub const TIMESTAMP: i32 = 93;

/// One metadata call as seen by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Catalogs,
    Schemas,
    Tables {
        catalog: Option<String>,
        schema: Option<String>,
        table: String,
    },
    Columns {
        catalog: Option<String>,
        schema: Option<String>,
        table: String,
    },
    PrimaryKeys {
        catalog: Option<String>,
        schema: Option<String>,
        table: String,
    },
}

impl Call {
    pub fn query(&self) -> MetadataQuery {
        match self {
            Call::Catalogs => MetadataQuery::Catalogs,
            Call::Schemas => MetadataQuery::Schemas,
            Call::Tables { .. } => MetadataQuery::Tables,
            Call::Columns { .. } => MetadataQuery::Columns,
            Call::PrimaryKeys { .. } => MetadataQuery::PrimaryKeys,
        }
    }

    pub fn catalog(&self) -> Option<&str> {
        match self {
            Call::Tables { catalog, .. }
            | Call::Columns { catalog, .. }
            | Call::PrimaryKeys { catalog, .. } => catalog.as_deref(),
            _ => None,
        }
    }

    pub fn schema(&self) -> Option<&str> {
        match self {
            Call::Tables { schema, .. }
            | Call::Columns { schema, .. }
            | Call::PrimaryKeys { schema, .. } => schema.as_deref(),
            _ => None,
        }
    }
}

type Matcher = Box<dyn Fn(&Call) -> bool + Send + Sync>;

#[derive(Default)]
struct State {
    acquired: AtomicUsize,
    open: AtomicUsize,
    authenticated: Mutex<Vec<bool>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(Matcher, MetadataError)>>,
    acquire_failure: Mutex<Option<MetadataError>>,
}

impl State {
    fn record(&self, call: Call) -> MetadataResult<()> {
        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(matches, _)| matches(&call))
            .map(|(_, err)| err.clone());
        self.calls.lock().unwrap().push(call);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Snapshot-backed provider that records calls and injects failures.
#[derive(Clone)]
pub struct RecordingProvider {
    inner: SnapshotProvider,
    state: Arc<State>,
}

impl RecordingProvider {
    pub fn new(snapshot: MetadataSnapshot) -> Self {
        Self {
            inner: SnapshotProvider::new(snapshot),
            state: Arc::new(State::default()),
        }
    }

    /// Fail every call matching `matches` with `error`.
    pub fn fail_when<F>(self, matches: F, error: MetadataError) -> Self
    where
        F: Fn(&Call) -> bool + Send + Sync + 'static,
    {
        self.state
            .failures
            .lock()
            .unwrap()
            .push((Box::new(matches), error));
        self
    }

    /// Fail every connection acquisition.
    pub fn fail_acquire(self, error: MetadataError) -> Self {
        *self.state.acquire_failure.lock().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, query: MetadataQuery) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.query() == query)
            .collect()
    }

    /// Number of successful acquisitions.
    pub fn acquired(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    /// Connections acquired and not yet dropped.
    pub fn open_connections(&self) -> usize {
        self.state.open.load(Ordering::SeqCst)
    }

    /// The `authenticated` flag of every acquisition attempt, in order.
    pub fn authenticated_requests(&self) -> Vec<bool> {
        self.state.authenticated.lock().unwrap().clone()
    }
}

impl ConnectionProvider for RecordingProvider {
    type Connection = RecordingConnection;

    fn acquire(&self, authenticated: bool) -> MetadataResult<Self::Connection> {
        self.state.authenticated.lock().unwrap().push(authenticated);
        if let Some(err) = self.state.acquire_failure.lock().unwrap().clone() {
            return Err(err);
        }
        let inner = self.inner.acquire(authenticated)?;
        self.state.acquired.fetch_add(1, Ordering::SeqCst);
        self.state.open.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingConnection {
            inner,
            state: Arc::clone(&self.state),
        })
    }
}

pub struct RecordingConnection {
    inner: SnapshotConnection,
    state: Arc<State>,
}

impl Drop for RecordingConnection {
    fn drop(&mut self) {
        self.state.open.fetch_sub(1, Ordering::SeqCst);
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

impl MetadataSource for RecordingConnection {
    fn catalogs(&self) -> MetadataResult<Vec<String>> {
        self.state.record(Call::Catalogs)?;
        self.inner.catalogs()
    }

    fn schemas(&self) -> MetadataResult<Vec<String>> {
        self.state.record(Call::Schemas)?;
        self.inner.schemas()
    }

    fn tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        table_types: &[String],
    ) -> MetadataResult<Vec<TableRow>> {
        self.state.record(Call::Tables {
            catalog: owned(catalog),
            schema: owned(schema_pattern),
            table: table_pattern.to_string(),
        })?;
        self.inner
            .tables(catalog, schema_pattern, table_pattern, table_types)
    }

    fn columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        column_pattern: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRow>> {
        self.state.record(Call::Columns {
            catalog: owned(catalog),
            schema: owned(schema_pattern),
            table: table_pattern.to_string(),
        })?;
        self.inner
            .columns(catalog, schema_pattern, table_pattern, column_pattern)
    }

    fn primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<PrimaryKeyRow>> {
        self.state.record(Call::PrimaryKeys {
            catalog: owned(catalog),
            schema: owned(schema),
            table: table.to_string(),
        })?;
        self.inner.primary_keys(catalog, schema, table)
    }
}

pub fn query_error(query: MetadataQuery) -> MetadataError {
    MetadataError::query(query, "injected failure")
}

pub fn connection_error() -> MetadataError {
    MetadataError::ConnectionFailed("connection reset by peer".to_string())
}

/// A schema-keyed vendor with no catalogs.
pub fn schema_vendor() -> MetadataSnapshot {
    MetadataSnapshot::new()
        .with_schema("SALES")
        .with_schema("HR")
        .with_table(
            SnapshotTable::new(None, Some("SALES"), "ORDERS")
                .with_column(SnapshotColumn::new("ID", INTEGER).not_null())
                .with_column(SnapshotColumn::new("AMOUNT", DECIMAL).with_remarks("Order total"))
                .with_column(SnapshotColumn::new("PLACED_AT", TIMESTAMP))
                .with_primary_key(["ID"]),
        )
        .with_table(
            SnapshotTable::new(None, Some("SALES"), "CUSTOMERS")
                .with_column(SnapshotColumn::new("CUSTOMER_ID", INTEGER).not_null())
                .with_column(SnapshotColumn::new("NAME", VARCHAR))
                .with_primary_key(["CUSTOMER_ID"]),
        )
        .with_table(
            SnapshotTable::new(None, Some("SALES"), "ORDER_SUMMARY")
                .view()
                .with_column(SnapshotColumn::new("TOTAL", DECIMAL)),
        )
        .with_table(
            SnapshotTable::new(None, Some("HR"), "EMPLOYEES")
                .with_column(SnapshotColumn::new("EMP_ID", INTEGER).not_null())
                .with_primary_key(["EMP_ID"]),
        )
}

/// A catalog-only vendor: one catalog per database, no schemas.
pub fn catalog_vendor() -> MetadataSnapshot {
    MetadataSnapshot::new()
        .without_schema_support()
        .with_catalog("shop")
        .with_catalog("warehouse")
        .with_table(
            SnapshotTable::new(Some("shop"), None, "items")
                .with_column(SnapshotColumn::new("sku", VARCHAR).not_null())
                .with_column(SnapshotColumn::new("price", DECIMAL))
                .with_primary_key(["sku"]),
        )
        .with_table(
            SnapshotTable::new(Some("shop"), None, "carts")
                .with_column(SnapshotColumn::new("cart_id", INTEGER).not_null()),
        )
        .with_table(
            SnapshotTable::new(Some("warehouse"), None, "bins")
                .with_column(SnapshotColumn::new("bin_id", INTEGER).not_null())
                .with_primary_key(["bin_id"]),
        )
}

/// A vendor populating both catalog and schema.
pub fn two_level_vendor() -> MetadataSnapshot {
    MetadataSnapshot::new()
        .with_catalog("erp")
        .with_schema("dbo")
        .with_schema("audit")
        .with_table(
            SnapshotTable::new(Some("erp"), Some("dbo"), "invoices")
                .with_column(SnapshotColumn::new("invoice_id", INTEGER).not_null())
                .with_primary_key(["invoice_id"]),
        )
        .with_table(
            SnapshotTable::new(Some("erp"), Some("audit"), "events")
                .with_column(SnapshotColumn::new("event_id", INTEGER).not_null()),
        )
}

/// Two catalogs holding the same `schema.table`.
pub fn multi_catalog_vendor() -> MetadataSnapshot {
    MetadataSnapshot::new()
        .with_catalog("erp")
        .with_catalog("crm")
        .with_schema("dbo")
        .with_table(
            SnapshotTable::new(Some("erp"), Some("dbo"), "invoices")
                .with_column(SnapshotColumn::new("invoice_id", INTEGER).not_null())
                .with_column(SnapshotColumn::new("erp_ref", VARCHAR))
                .with_primary_key(["invoice_id"]),
        )
        .with_table(
            SnapshotTable::new(Some("crm"), Some("dbo"), "invoices")
                .with_column(SnapshotColumn::new("invoice_no", INTEGER).not_null())
                .with_column(SnapshotColumn::new("crm_ref", VARCHAR))
                .with_primary_key(["invoice_no"]),
        )
}
