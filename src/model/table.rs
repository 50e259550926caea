//! Table model types.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::discovery::DiscoveryError;
use crate::metadata::{names_equal, non_blank, TableRow};

/// `qualifier.table`, either part optionally double-quoted.
static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"([^"]*)"|([^".]*))\.(?:"([^"]*)"|(.*))$"#)
        .expect("qualified name regex is valid")
});

/// Where a table lives, as reported by a table enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentity {
    /// The schema if the vendor populated it, otherwise the catalog.
    pub schema_or_catalog: Option<String>,
    /// The catalog, when reported.
    pub catalog: Option<String>,
    /// Table name; never empty.
    pub table: String,
}

impl TableIdentity {
    /// Create an identity, rejecting an empty table name.
    pub fn new(
        schema_or_catalog: Option<&str>,
        catalog: Option<&str>,
        table: impl Into<String>,
    ) -> Result<Self, DiscoveryError> {
        let table = table.into();
        if table.is_empty() {
            return Err(DiscoveryError::InvalidArgument(
                "table name expected".to_string(),
            ));
        }
        Ok(Self {
            schema_or_catalog: non_blank(schema_or_catalog).map(str::to_string),
            catalog: non_blank(catalog).map(str::to_string),
            table,
        })
    }

    /// Parse a `qualifier.table` name as produced by table listing.
    ///
    /// Splits at the first dot; either part may be double-quoted to contain
    /// dots. A name without a dot has no qualifier.
    pub fn parse(qualified: &str) -> Result<Self, DiscoveryError> {
        match QUALIFIED_NAME.captures(qualified.trim()) {
            Some(caps) => {
                let qualifier = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
                let table = caps
                    .get(3)
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                Self::new(qualifier, None, table)
            }
            None => Self::new(None, None, qualified.trim().trim_matches('"')),
        }
    }

    /// Build the identity of an enumerated table row.
    pub(crate) fn from_row(row: &TableRow) -> Option<Self> {
        Self::new(row.namespace(), row.catalog.as_deref(), row.name.clone()).ok()
    }

    /// `"<schemaOrCatalog>.<table>"`, or just the table without a qualifier.
    pub fn qualified_name(&self) -> String {
        match &self.schema_or_catalog {
            Some(qualifier) => format!("{}.{}", qualifier, self.table),
            None => self.table.clone(),
        }
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// The normalized description of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name as reported by the source.
    pub name: String,
    /// The row's schema, or its catalog when the vendor has no schemas.
    pub schema_name: String,
    /// Columns in enumeration order.
    pub fields: Vec<Field>,
}

impl TableSchema {
    /// Find a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| names_equal(&f.name, name))
    }

    /// Fields flagged as primary-key columns, in column order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    pub fn qualified_name(&self) -> String {
        if self.schema_name.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema_name, self.name)
        }
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())?;
        for field in &self.fields {
            write!(
                f,
                "\n  {} {} ({})",
                field.name, field.native_type_name, field.logical_type
            )?;
            if !field.nullable {
                f.write_str(" NOT NULL")?;
            }
            if field.primary_key {
                f.write_str(" PRIMARY KEY")?;
            }
            if let Some(description) = &field.description {
                write!(f, " -- {}", description)?;
            }
        }
        Ok(())
    }
}
