//! Snapshot-backed metadata source.
//!
//! A `MetadataSnapshot` is a serialized picture of a database's metadata
//! (catalogs, schemas, tables with their columns and primary keys). The
//! `SnapshotProvider` answers metadata queries from it with the same pattern
//! and namespace conventions a live driver uses, which makes it usable for
//! offline discovery against exported metadata as well as for tests.
//!
//! # Example
//!
//! ```
//! use rdbms_discovery::metadata::{MetadataSnapshot, SnapshotColumn, SnapshotProvider, SnapshotTable};
//!
//! let snapshot = MetadataSnapshot::new()
//!     .with_schema("SALES")
//!     .with_table(
//!         SnapshotTable::new(None, Some("SALES"), "ORDERS")
//!             .with_column(SnapshotColumn::new("ID", 4).not_null())
//!             .with_primary_key(["ID"]),
//!     );
//! let provider = SnapshotProvider::new(snapshot);
//! # let _ = provider;
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{MetadataError, MetadataQuery, MetadataResult};
use super::pattern::NamePattern;
use super::provider::{ConnectionProvider, MetadataSource};
use super::types::{names_equal, non_blank, ColumnRow, PrimaryKeyRow, TableRow};

/// Errors loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Serialized metadata of one database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSnapshot {
    /// Whether name comparisons respect case.
    pub case_sensitive: bool,

    /// Whether the vendor understands schema arguments in key lookups.
    ///
    /// Catalog-only vendors reject a schema in primary-key lookups.
    pub supports_schemas: bool,

    /// Catalog enumeration result, in order.
    pub catalogs: Vec<String>,

    /// Schema enumeration result, in order.
    pub schemas: Vec<String>,

    /// Tables and views.
    pub tables: Vec<SnapshotTable>,
}

impl Default for MetadataSnapshot {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            supports_schemas: true,
            catalogs: Vec::new(),
            schemas: Vec::new(),
            tables: Vec::new(),
        }
    }
}

impl MetadataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Emulate a catalog-only vendor.
    pub fn without_schema_support(mut self) -> Self {
        self.supports_schemas = false;
        self
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalogs.push(catalog.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schemas.push(schema.into());
        self
    }

    pub fn with_table(mut self, table: SnapshotTable) -> Self {
        self.tables.push(table);
        self
    }

    fn name_eq(&self, left: &str, right: &str) -> bool {
        if self.case_sensitive {
            left == right
        } else {
            names_equal(left, right)
        }
    }

    /// Exact namespace match using the `None` / `""` conventions.
    fn namespace_eq(&self, wanted: Option<&str>, actual: Option<&str>) -> bool {
        match wanted {
            None => true,
            Some(w) if w.is_empty() => non_blank(actual).is_none(),
            Some(w) => actual.is_some_and(|a| self.name_eq(w, a)),
        }
    }

    /// Pattern namespace match; a pure wildcard also accepts absent values.
    fn namespace_like(&self, pattern: Option<&str>, actual: Option<&str>) -> bool {
        match pattern {
            None => true,
            Some(p) if p.is_empty() => non_blank(actual).is_none(),
            Some(p) => {
                let pattern = NamePattern::new(p, self.case_sensitive);
                if pattern.is_wildcard() {
                    return true;
                }
                actual.is_some_and(|a| pattern.matches(a))
            }
        }
    }

    fn matching_tables<'a>(
        &'a self,
        catalog: Option<&'a str>,
        schema_pattern: Option<&'a str>,
        table_pattern: &str,
    ) -> impl Iterator<Item = &'a SnapshotTable> + 'a {
        let table_pattern = NamePattern::new(table_pattern, self.case_sensitive);
        self.tables.iter().filter(move |t| {
            self.namespace_eq(catalog, t.catalog.as_deref())
                && self.namespace_like(schema_pattern, t.schema.as_deref())
                && table_pattern.matches(&t.name)
        })
    }
}

/// One table or view in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTable {
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    pub name: String,
    #[serde(rename = "type", default = "default_table_type")]
    pub table_type: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub columns: Vec<SnapshotColumn>,
    /// Primary-key column names in key order.
    #[serde(default)]
    pub primary_key: Vec<String>,
}

impl SnapshotTable {
    pub fn new(catalog: Option<&str>, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            catalog: catalog.map(str::to_string),
            schema: schema.map(str::to_string),
            name: name.into(),
            table_type: default_table_type(),
            remarks: None,
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    pub fn view(mut self) -> Self {
        self.table_type = "VIEW".to_string();
        self
    }

    pub fn with_column(mut self, column: SnapshotColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    fn to_row(&self) -> TableRow {
        TableRow {
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
            name: self.name.clone(),
            table_type: self.table_type.clone(),
            remarks: self.remarks.clone(),
        }
    }
}

/// One column in a snapshot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotColumn {
    pub name: String,
    /// Vendor numeric type code.
    pub data_type: i32,
    /// `None` when the vendor reports unknown nullability.
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SnapshotColumn {
    pub fn new(name: impl Into<String>, data_type: i32) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: Some(true),
            remarks: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    pub fn unknown_nullability(mut self) -> Self {
        self.nullable = None;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    fn is_nullable(&self) -> String {
        match self.nullable {
            Some(true) => "YES".to_string(),
            Some(false) => "NO".to_string(),
            None => String::new(),
        }
    }
}

fn default_table_type() -> String {
    "TABLE".to_string()
}

/// Connection provider over a shared snapshot.
///
/// Every acquired connection reads the same immutable snapshot; the
/// authenticated flag is accepted and ignored.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    snapshot: Arc<MetadataSnapshot>,
}

impl SnapshotProvider {
    pub fn new(snapshot: MetadataSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> &MetadataSnapshot {
        &self.snapshot
    }
}

impl ConnectionProvider for SnapshotProvider {
    type Connection = SnapshotConnection;

    fn acquire(&self, _authenticated: bool) -> MetadataResult<Self::Connection> {
        Ok(SnapshotConnection {
            snapshot: Arc::clone(&self.snapshot),
        })
    }
}

/// A connection answering queries from a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotConnection {
    snapshot: Arc<MetadataSnapshot>,
}

impl MetadataSource for SnapshotConnection {
    fn catalogs(&self) -> MetadataResult<Vec<String>> {
        Ok(self.snapshot.catalogs.clone())
    }

    fn schemas(&self) -> MetadataResult<Vec<String>> {
        if !self.snapshot.supports_schemas {
            return Ok(Vec::new());
        }
        Ok(self.snapshot.schemas.clone())
    }

    fn tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        table_types: &[String],
    ) -> MetadataResult<Vec<TableRow>> {
        Ok(self
            .snapshot
            .matching_tables(catalog, schema_pattern, table_pattern)
            .filter(|t| {
                table_types.is_empty()
                    || table_types
                        .iter()
                        .any(|ty| ty.eq_ignore_ascii_case(&t.table_type))
            })
            .map(SnapshotTable::to_row)
            .collect())
    }

    fn columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        column_pattern: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRow>> {
        let column_pattern =
            column_pattern.map(|p| NamePattern::new(p, self.snapshot.case_sensitive));

        let mut rows = Vec::new();
        for table in self
            .snapshot
            .matching_tables(catalog, schema_pattern, table_pattern)
        {
            for (idx, column) in table.columns.iter().enumerate() {
                if column_pattern
                    .as_ref()
                    .is_some_and(|p| !p.matches(&column.name))
                {
                    continue;
                }
                rows.push(ColumnRow {
                    catalog: table.catalog.clone(),
                    schema: table.schema.clone(),
                    table: table.name.clone(),
                    name: column.name.clone(),
                    data_type: column.data_type,
                    remarks: column.remarks.clone(),
                    is_nullable: Some(column.is_nullable()),
                    ordinal_position: idx as u32 + 1,
                });
            }
        }
        Ok(rows)
    }

    fn primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<PrimaryKeyRow>> {
        let snapshot = &self.snapshot;
        if !snapshot.supports_schemas && non_blank(schema).is_some() {
            return Err(MetadataError::query(
                MetadataQuery::PrimaryKeys,
                "schemas are not supported by this database",
            ));
        }

        let found = snapshot.tables.iter().find(|t| {
            snapshot.namespace_eq(catalog, t.catalog.as_deref())
                && snapshot.namespace_eq(schema, t.schema.as_deref())
                && snapshot.name_eq(&t.name, table)
        });

        Ok(found
            .map(|t| {
                t.primary_key
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| PrimaryKeyRow {
                        column_name: column.clone(),
                        key_seq: idx as u32 + 1,
                        pk_name: Some(format!("PK_{}", t.name)),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
