//! Errors raised by metadata sources and connection providers.

use std::fmt;

use thiserror::Error;

/// Result type for metadata source operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// The metadata primitive a query error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataQuery {
    Catalogs,
    Schemas,
    Tables,
    Columns,
    PrimaryKeys,
}

impl MetadataQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataQuery::Catalogs => "catalogs",
            MetadataQuery::Schemas => "schemas",
            MetadataQuery::Tables => "tables",
            MetadataQuery::Columns => "columns",
            MetadataQuery::PrimaryKeys => "primary_keys",
        }
    }
}

impl fmt::Display for MetadataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to a metadata source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The connection could not be opened or was lost.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// The authenticated (ticketed) connection path was refused.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A metadata query was rejected by the source.
    #[error("metadata query `{query}` failed: {message}")]
    QueryFailed {
        /// Which primitive failed.
        query: MetadataQuery,
        /// Vendor message.
        message: String,
    },

    /// The source does not implement this primitive at all.
    #[error("metadata query `{0}` is not supported by this source")]
    Unsupported(MetadataQuery),
}

impl MetadataError {
    /// Create a query error for the given primitive.
    pub fn query(query: MetadataQuery, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            query,
            message: message.into(),
        }
    }

    /// Check if this error concerns the connection rather than a single query.
    ///
    /// Connection-level errors are never swallowed by the discovery fallbacks.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::AuthenticationFailed(_))
    }
}
