//! Single-table description.

use tracing::debug;

use super::columns::{list_catalog_columns, list_columns};
use super::error::{DiscoveryError, DiscoveryResult, Operation, Target};
use super::SchemaDiscoverer;
use crate::metadata::{
    escape_pattern, names_equal, non_blank, ConnectionProvider, MetadataSource, TableRow, WILDCARD,
};
use crate::model::{TableIdentity, TableSchema};

impl<P: ConnectionProvider> SchemaDiscoverer<P> {
    /// Describe one table.
    ///
    /// `schema` may name a schema or, for vendors that conflate the two, a
    /// catalog: if it equals a catalog (ignoring case) it is used as the
    /// catalog instead. Returns `Ok(None)` when no such table exists.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty table name, before any connection is
    /// opened. Connection and query failures carry the schema and table.
    pub fn describe_table(
        &self,
        schema: Option<&str>,
        table: &str,
    ) -> DiscoveryResult<Option<TableSchema>> {
        let _entered = self.span.enter();

        if table.is_empty() {
            return Err(DiscoveryError::InvalidArgument(
                "table name expected".to_string(),
            ));
        }

        let schema = non_blank(schema);
        let target = Target::new(schema, Some(table));

        let catalog = match schema {
            Some(name) => self
                .fetch_catalogs(Operation::DescribeTable, &target)?
                .into_iter()
                .find(|catalog| names_equal(catalog, name)),
            None => None,
        };
        let schema_pattern = if catalog.is_some() {
            Some(WILDCARD)
        } else {
            schema
        };
        if let Some(catalog) = &catalog {
            debug!(catalog = %catalog, "schema resolved to catalog");
        }

        let conn = self.acquire(Operation::DescribeTable, &target, self.options.authenticated)?;
        let rows = conn
            .tables(catalog.as_deref(), schema_pattern, table, &self.options.table_types)
            .map_err(|e| DiscoveryError::metadata(Operation::DescribeTable, target.clone(), e))?;

        let Some(row) = rows.into_iter().find(|row| row_matches(row, schema, table)) else {
            debug!(schema = ?schema, table, "table not found");
            return Ok(None);
        };

        // Catalog-only rows are looked up by catalog name
        let namespace = row.namespace().or(schema);
        let fields = list_columns(&conn, namespace, &row.name, self.type_mapper.as_ref())
            .map_err(|e| DiscoveryError::metadata(Operation::DescribeTable, target, e))?;

        let schema_name = row.namespace().unwrap_or_default().to_string();
        Ok(Some(TableSchema {
            name: row.name,
            schema_name,
            fields,
        }))
    }

    /// Describe a table from a listing result.
    ///
    /// An identity that carries its catalog is looked up within that catalog
    /// only, so identical `schema.table` names in other catalogs are never
    /// mixed in. Identities without a catalog (such as parsed listing
    /// names) go through [`describe_table`](Self::describe_table).
    pub fn describe_identity(
        &self,
        identity: &TableIdentity,
    ) -> DiscoveryResult<Option<TableSchema>> {
        let qualifier = identity.schema_or_catalog.as_deref();
        let Some(catalog) = identity.catalog.as_deref() else {
            return self.describe_table(qualifier, &identity.table);
        };

        let _entered = self.span.enter();
        let target = Target::new(qualifier, Some(identity.table.as_str()));

        let conn = self.acquire(Operation::DescribeTable, &target, self.options.authenticated)?;
        let table_pattern = escape_pattern(&identity.table, conn.search_string_escape());
        let rows = conn
            .tables(Some(catalog), None, &table_pattern, &self.options.table_types)
            .map_err(|e| DiscoveryError::metadata(Operation::DescribeTable, target.clone(), e))?;

        let Some(row) = rows.into_iter().find(|row| {
            names_equal(&row.name, &identity.table)
                && match (row.namespace(), qualifier) {
                    (Some(actual), Some(wanted)) => names_equal(actual, wanted),
                    (actual, wanted) => actual.is_none() && wanted.is_none(),
                }
        }) else {
            debug!(catalog, qualifier = ?qualifier, table = %identity.table, "table not found in catalog");
            return Ok(None);
        };

        let row_catalog = row.catalog.as_deref().unwrap_or(catalog);
        let fields = list_catalog_columns(
            &conn,
            row_catalog,
            non_blank(row.schema.as_deref()),
            &row.name,
            self.type_mapper.as_ref(),
        )
        .map_err(|e| DiscoveryError::metadata(Operation::DescribeTable, target, e))?;

        let schema_name = row.namespace().unwrap_or_default().to_string();
        Ok(Some(TableSchema {
            name: row.name,
            schema_name,
            fields,
        }))
    }
}

/// Whether an enumerated row is the requested table.
///
/// Vendors that leave the schema column empty match any requested schema.
fn row_matches(row: &TableRow, schema: Option<&str>, table: &str) -> bool {
    if !names_equal(&row.name, table) {
        return false;
    }
    match (schema, non_blank(row.schema.as_deref())) {
        (Some(wanted), Some(actual)) => names_equal(wanted, actual),
        _ => true,
    }
}
