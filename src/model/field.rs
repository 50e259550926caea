//! Field and primary-key model types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::LogicalType;

/// A column of a discovered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name, case as returned by the source.
    pub name: String,
    /// Native type name derived from the vendor type code.
    pub native_type_name: String,
    /// Logical type derived from the vendor type code.
    pub logical_type: LogicalType,
    /// Column remarks.
    #[serde(default)]
    pub description: Option<String>,
    /// False only when the source reports the column as not nullable.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
}

fn default_nullable() -> bool {
    true
}

impl Field {
    /// Create a nullable, non-key field.
    pub fn new(
        name: impl Into<String>,
        native_type_name: impl Into<String>,
        logical_type: LogicalType,
    ) -> Self {
        Self {
            name: name.into(),
            native_type_name: native_type_name.into(),
            logical_type,
            description: None,
            nullable: true,
            primary_key: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Names of the primary-key columns of one table.
///
/// Membership is exact: a key column reported as `id` does not mark a
/// column listed as `ID`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeySet(BTreeSet<String>);

impl PrimaryKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key column names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PrimaryKeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
