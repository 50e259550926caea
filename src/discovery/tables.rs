//! Table listing across catalog- and schema-keyed vendors.
//!
//! Some databases key tables by catalog (one catalog per database), some by
//! schema, and some populate both. Listing branches on whether the source
//! reports any catalogs so it never queries with a namespace concept the
//! vendor does not have.

use tracing::{debug, trace};

use super::error::{DiscoveryError, DiscoveryResult, Operation, Target};
use super::SchemaDiscoverer;
use crate::metadata::{escape_pattern, non_blank, ConnectionProvider, MetadataSource, WILDCARD};
use crate::model::TableIdentity;

/// One table enumeration to run: a catalog and a schema pattern.
#[derive(Debug)]
struct Partition {
    catalog: Option<String>,
    schema_pattern: String,
}

impl<P: ConnectionProvider> SchemaDiscoverer<P> {
    /// List tables as `"<schema-or-catalog>.<table>"`.
    ///
    /// Absent or blank filters match everything. See
    /// [`list_table_identities`](Self::list_table_identities).
    pub fn list_tables(
        &self,
        schema: Option<&str>,
        table_name: Option<&str>,
    ) -> DiscoveryResult<Vec<String>> {
        Ok(self
            .list_table_identities(schema, table_name)?
            .iter()
            .map(TableIdentity::qualified_name)
            .collect())
    }

    /// List the identities of all tables matching the filters.
    ///
    /// Both filters are name patterns. When either is given, each catalog
    /// (or the whole database, for vendors without catalogs) is searched
    /// with them. Without filters, each catalog is listed in full, or, for
    /// vendors without catalogs, each schema in turn.
    ///
    /// A query error on one catalog or schema skips it; connection errors
    /// abort the listing.
    pub fn list_table_identities(
        &self,
        schema: Option<&str>,
        table_name: Option<&str>,
    ) -> DiscoveryResult<Vec<TableIdentity>> {
        let _entered = self.span.enter();

        let schema = non_blank(schema);
        let table_name = non_blank(table_name);
        let target = Target::new(schema, table_name);
        let schema_pattern = schema.unwrap_or(WILDCARD);
        let table_pattern = table_name.unwrap_or(WILDCARD);

        let catalogs = self.fetch_catalogs(Operation::ListTables, &target)?;
        let has_catalogs = !catalogs.is_empty();
        let filtered = schema.is_some() || table_name.is_some();

        // Schema enumeration opens its own connection, so run it first
        let schemas = if !filtered && !has_catalogs {
            self.fetch_schemas(Operation::ListTables, &target)?
        } else {
            Vec::new()
        };

        let conn = self.acquire(Operation::ListTables, &target, false)?;
        let partitions: Vec<Partition> = match (filtered, has_catalogs) {
            (true, true) => catalogs
                .into_iter()
                .map(|catalog| Partition {
                    catalog: Some(catalog),
                    schema_pattern: schema_pattern.to_string(),
                })
                .collect(),
            (true, false) => vec![Partition {
                catalog: None,
                schema_pattern: schema_pattern.to_string(),
            }],
            (false, true) => catalogs
                .into_iter()
                .map(|catalog| Partition {
                    catalog: Some(catalog),
                    schema_pattern: WILDCARD.to_string(),
                })
                .collect(),
            (false, false) => schemas
                .into_iter()
                .map(|schema| Partition {
                    catalog: None,
                    // Enumerated schema names are literal, not patterns
                    schema_pattern: escape_pattern(&schema, conn.search_string_escape()),
                })
                .collect(),
        };

        let mut tables = Vec::new();
        for partition in &partitions {
            let rows = match conn.tables(
                partition.catalog.as_deref(),
                Some(partition.schema_pattern.as_str()),
                table_pattern,
                &self.options.table_types,
            ) {
                Ok(rows) => rows,
                Err(err) if err.is_connection_error() => {
                    return Err(DiscoveryError::metadata(Operation::ListTables, target, err));
                }
                Err(err) => {
                    debug!(
                        catalog = ?partition.catalog,
                        schema = %partition.schema_pattern,
                        table = table_pattern,
                        error = %err,
                        "failed to list tables, skipping"
                    );
                    continue;
                }
            };
            trace!(catalog = ?partition.catalog, count = rows.len(), "listed tables");
            tables.extend(rows.iter().filter_map(TableIdentity::from_row));
        }

        debug!(count = tables.len(), partitions = partitions.len(), "table listing complete");
        Ok(tables)
    }
}
