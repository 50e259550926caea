//! Raw rows returned by metadata sources.
//!
//! These mirror the result sets of the standard metadata calls: one row per
//! table, column or primary-key column, with vendor-populated namespace
//! columns left as `Option` because vendors fill them inconsistently.

use serde::{Deserialize, Serialize};

/// One row of a table enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// `TABLE_CAT`
    #[serde(default)]
    pub catalog: Option<String>,
    /// `TABLE_SCHEM`
    #[serde(default)]
    pub schema: Option<String>,
    /// `TABLE_NAME`
    pub name: String,
    /// `TABLE_TYPE` ("TABLE", "VIEW", ...)
    #[serde(default = "default_table_type")]
    pub table_type: String,
    /// `REMARKS`
    #[serde(default)]
    pub remarks: Option<String>,
}

impl TableRow {
    pub fn new(catalog: Option<&str>, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            catalog: catalog.map(str::to_string),
            schema: schema.map(str::to_string),
            name: name.into(),
            table_type: default_table_type(),
            remarks: None,
        }
    }

    /// The schema if the vendor populated it, otherwise the catalog.
    pub fn namespace(&self) -> Option<&str> {
        non_blank(self.schema.as_deref()).or_else(|| non_blank(self.catalog.as_deref()))
    }
}

/// One row of a column enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// `TABLE_CAT`
    #[serde(default)]
    pub catalog: Option<String>,
    /// `TABLE_SCHEM`
    #[serde(default)]
    pub schema: Option<String>,
    /// `TABLE_NAME`
    pub table: String,
    /// `COLUMN_NAME`
    pub name: String,
    /// `DATA_TYPE`, the vendor numeric type code.
    pub data_type: i32,
    /// `REMARKS`
    #[serde(default)]
    pub remarks: Option<String>,
    /// `IS_NULLABLE`: "YES", "NO" or empty when unknown.
    #[serde(default)]
    pub is_nullable: Option<String>,
    /// `ORDINAL_POSITION`, 1-based.
    #[serde(default)]
    pub ordinal_position: u32,
}

/// One row of a primary-key enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyRow {
    /// `COLUMN_NAME`
    pub column_name: String,
    /// `KEY_SEQ`, 1-based position within the key.
    pub key_seq: u32,
    /// `PK_NAME`
    #[serde(default)]
    pub pk_name: Option<String>,
}

fn default_table_type() -> String {
    "TABLE".to_string()
}

/// Treat empty and whitespace-only names as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Compare two identifiers ignoring case.
pub fn names_equal(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right) || left.to_lowercase() == right.to_lowercase()
}
