//! MetadataSource and ConnectionProvider trait definitions.
//!
//! A `ConnectionProvider` hands out live connections; every connection is a
//! `MetadataSource` exposing the standard metadata enumerations. Releasing a
//! connection is dropping it, so scoped use is guaranteed on every exit path.

use super::error::MetadataResult;
use super::types::{ColumnRow, PrimaryKeyRow, TableRow};

/// Pattern matching every name.
pub const WILDCARD: &str = "%";

/// Default escape used to quote `%` and `_` inside name patterns.
pub const DEFAULT_SEARCH_ESCAPE: &str = "\\";

/// The metadata query primitives of a live connection.
///
/// Namespace arguments follow the usual metadata conventions:
///
/// - `None` means "do not constrain on this namespace"
/// - `Some("")` means "only objects without this namespace"
/// - anything else is matched (catalogs exactly, schema/table/column names as
///   LIKE patterns using `%` and `_`)
pub trait MetadataSource {
    /// List all catalogs, in source order.
    fn catalogs(&self) -> MetadataResult<Vec<String>>;

    /// List all schemas, in source order.
    fn schemas(&self) -> MetadataResult<Vec<String>>;

    /// List tables matching the given catalog, schema pattern and table pattern.
    ///
    /// An empty `table_types` slice means every table type.
    fn tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        table_types: &[String],
    ) -> MetadataResult<Vec<TableRow>>;

    /// List columns of the tables matching the given namespace and patterns.
    fn columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_pattern: &str,
        column_pattern: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRow>>;

    /// List primary-key columns of exactly one table.
    fn primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<PrimaryKeyRow>>;

    /// The string used to escape `%` and `_` in patterns.
    fn search_string_escape(&self) -> &str {
        DEFAULT_SEARCH_ESCAPE
    }
}

/// Yields scoped, live connections.
///
/// Pooling, credentials and ticketed authentication all live behind this
/// trait; discovery only asks whether the authenticated path is wanted.
pub trait ConnectionProvider: Send + Sync {
    /// The connection type; released when dropped.
    type Connection: MetadataSource;

    /// Acquire a connection, optionally through the authenticated path.
    fn acquire(&self, authenticated: bool) -> MetadataResult<Self::Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for std::sync::Arc<P> {
    type Connection = P::Connection;

    fn acquire(&self, authenticated: bool) -> MetadataResult<Self::Connection> {
        (**self).acquire(authenticated)
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    type Connection = P::Connection;

    fn acquire(&self, authenticated: bool) -> MetadataResult<Self::Connection> {
        (**self).acquire(authenticated)
    }
}

/// Quote `%`, `_` and the escape itself so `name` matches only literally.
pub fn escape_pattern(name: &str, escape: &str) -> String {
    if escape.is_empty() {
        return name.to_string();
    }
    let mut escaped = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(c) = rest.chars().next() {
        if rest.starts_with(escape) {
            escaped.push_str(escape);
            escaped.push_str(escape);
            rest = &rest[escape.len()..];
            continue;
        }
        if c == '%' || c == '_' {
            escaped.push_str(escape);
        }
        escaped.push(c);
        rest = &rest[c.len_utf8()..];
    }
    escaped
}
