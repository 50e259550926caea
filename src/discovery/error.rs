//! Discovery error types.

use std::fmt;

use thiserror::Error;

use crate::metadata::MetadataError;

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// The public discovery call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCatalogs,
    ListSchemas,
    ListTables,
    DescribeTable,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::ListCatalogs => "list catalogs",
            Operation::ListSchemas => "list schemas",
            Operation::ListTables => "obtain table list",
            Operation::DescribeTable => "describe",
        })
    }
}

/// The schema/table an operation was working on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub schema: Option<String>,
    pub table: Option<String>,
}

impl Target {
    pub fn new(schema: Option<&str>, table: Option<&str>) -> Self {
        Self {
            schema: schema.map(str::to_string),
            table: table.map(str::to_string),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, " schema [{}]", schema)?;
        }
        if let Some(table) = &self.table {
            write!(f, " table [{}]", table)?;
        }
        Ok(())
    }
}

/// Errors surfaced by `SchemaDiscoverer`.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A required argument was missing or empty. No connection was opened.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A connection could not be acquired or authenticated.
    #[error("unable to {operation}{target}: {source}")]
    Connection {
        operation: Operation,
        target: Target,
        #[source]
        source: MetadataError,
    },

    /// A metadata query failed.
    #[error("unable to {operation}{target}: {source}")]
    Query {
        operation: Operation,
        target: Target,
        #[source]
        source: MetadataError,
    },
}

impl DiscoveryError {
    /// Wrap a metadata error with the operation and target it occurred in.
    pub fn metadata(operation: Operation, target: Target, source: MetadataError) -> Self {
        if source.is_connection_error() {
            Self::Connection {
                operation,
                target,
                source,
            }
        } else {
            Self::Query {
                operation,
                target,
                source,
            }
        }
    }

    /// The operation that failed, if the error came from the database.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Connection { operation, .. } | Self::Query { operation, .. } => Some(*operation),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::Query { .. })
    }
}
