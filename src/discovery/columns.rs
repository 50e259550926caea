//! Column listing and primary-key resolution.

use tracing::{debug, trace};

use crate::metadata::{escape_pattern, ColumnRow, MetadataResult, MetadataSource, PrimaryKeyRow};
use crate::model::{Field, PrimaryKeySet};
use crate::types::TypeMapper;

/// Outcome of the two-attempt primary-key lookup.
///
/// Key information is enrichment only: when neither attempt succeeds the
/// lookup is `Unavailable`, which reads as an empty key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKeyLookup {
    /// The name was accepted as a schema.
    BySchema(PrimaryKeySet),
    /// The schema lookup failed; the name was accepted as a catalog.
    ByCatalog(PrimaryKeySet),
    /// Both lookups failed.
    Unavailable,
}

impl PrimaryKeyLookup {
    /// The key columns, empty when unavailable.
    pub fn into_set(self) -> PrimaryKeySet {
        match self {
            Self::BySchema(keys) | Self::ByCatalog(keys) => keys,
            Self::Unavailable => PrimaryKeySet::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

fn key_set(rows: Vec<PrimaryKeyRow>) -> PrimaryKeySet {
    rows.into_iter().map(|row| row.column_name).collect()
}

/// Look up the primary-key columns of `table`.
///
/// `schema` is tried in the schema position first; if the source rejects
/// that, the same name is tried in the catalog position. Never fails.
pub fn list_primary_keys<S: MetadataSource + ?Sized>(
    conn: &S,
    schema: Option<&str>,
    table: &str,
) -> PrimaryKeyLookup {
    match conn.primary_keys(None, schema, table) {
        Ok(rows) => return PrimaryKeyLookup::BySchema(key_set(rows)),
        Err(err) => {
            debug!(schema = ?schema, table, error = %err, "primary key lookup by schema failed, trying catalog");
        }
    }

    match conn.primary_keys(schema, None, table) {
        Ok(rows) => PrimaryKeyLookup::ByCatalog(key_set(rows)),
        Err(err) => {
            debug!(schema = ?schema, table, error = %err, "primary key lookup by catalog failed");
            PrimaryKeyLookup::Unavailable
        }
    }
}

/// List the fields of `table`, flagging primary-key columns.
///
/// Columns are looked up with `schema` as the schema first. When that finds
/// nothing, the name is retried as the catalog, which is how catalog-only
/// vendors expose their databases.
pub fn list_columns<S: MetadataSource + ?Sized>(
    conn: &S,
    schema: Option<&str>,
    table: &str,
    type_mapper: &dyn TypeMapper,
) -> MetadataResult<Vec<Field>> {
    let keys = list_primary_keys(conn, schema, table).into_set();

    let escape = conn.search_string_escape();
    let schema_pattern = schema.map(|s| escape_pattern(s, escape));
    let table_pattern = escape_pattern(table, escape);

    let rows = conn.columns(None, schema_pattern.as_deref(), &table_pattern, None)?;
    let mut fields = columns_to_fields(rows, &keys, type_mapper);

    if fields.is_empty() {
        if let Some(catalog) = schema {
            debug!(catalog, table, "no columns by schema, retrying with catalog");
            let rows = conn.columns(Some(catalog), None, &table_pattern, None)?;
            fields = columns_to_fields(rows, &keys, type_mapper);
        }
    }

    trace!(table, count = fields.len(), "listed columns");
    Ok(fields)
}

/// List the fields of a table whose catalog is known.
///
/// Keys and columns are both looked up inside `catalog`. `schema` is `None`
/// for tables the vendor keys by catalog alone. A failed key lookup leaves
/// every field unflagged.
pub(crate) fn list_catalog_columns<S: MetadataSource + ?Sized>(
    conn: &S,
    catalog: &str,
    schema: Option<&str>,
    table: &str,
    type_mapper: &dyn TypeMapper,
) -> MetadataResult<Vec<Field>> {
    let keys = match conn.primary_keys(Some(catalog), schema, table) {
        Ok(rows) => key_set(rows),
        Err(err) => {
            debug!(catalog, schema = ?schema, table, error = %err, "primary key lookup failed");
            PrimaryKeySet::new()
        }
    };

    let escape = conn.search_string_escape();
    let schema_pattern = schema.map(|s| escape_pattern(s, escape));
    let table_pattern = escape_pattern(table, escape);
    let rows = conn.columns(Some(catalog), schema_pattern.as_deref(), &table_pattern, None)?;
    let fields = columns_to_fields(rows, &keys, type_mapper);

    trace!(catalog, table, count = fields.len(), "listed columns");
    Ok(fields)
}

/// Map column rows to fields, keeping row order.
pub fn columns_to_fields<I>(rows: I, keys: &PrimaryKeySet, type_mapper: &dyn TypeMapper) -> Vec<Field>
where
    I: IntoIterator<Item = ColumnRow>,
{
    rows.into_iter()
        .map(|row| {
            let primary_key = keys.contains(&row.name);
            Field {
                native_type_name: type_mapper.native_type_name(row.data_type),
                logical_type: type_mapper.logical_type(row.data_type),
                description: row.remarks,
                nullable: row.is_nullable.as_deref() != Some("NO"),
                primary_key,
                name: row.name,
            }
        })
        .collect()
}
