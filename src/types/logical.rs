//! Logical types derived from native type codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::native::NativeType;

/// Canonical type classification consumed by downstream ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    String,
    Date,
    Timestamp,
    Binary,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Boolean => "boolean",
            LogicalType::TinyInt => "tinyint",
            LogicalType::SmallInt => "smallint",
            LogicalType::Int => "int",
            LogicalType::BigInt => "bigint",
            LogicalType::Float => "float",
            LogicalType::Double => "double",
            LogicalType::Decimal => "decimal",
            LogicalType::String => "string",
            LogicalType::Date => "date",
            LogicalType::Timestamp => "timestamp",
            LogicalType::Binary => "binary",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NativeType> for LogicalType {
    fn from(native: NativeType) -> Self {
        match native {
            NativeType::Bit | NativeType::Boolean => LogicalType::Boolean,
            NativeType::TinyInt => LogicalType::TinyInt,
            NativeType::SmallInt => LogicalType::SmallInt,
            NativeType::Integer => LogicalType::Int,
            NativeType::BigInt => LogicalType::BigInt,
            NativeType::Real => LogicalType::Float,
            NativeType::Float | NativeType::Double => LogicalType::Double,
            NativeType::Numeric | NativeType::Decimal => LogicalType::Decimal,
            NativeType::Date => LogicalType::Date,
            NativeType::Timestamp | NativeType::TimestampWithTimezone => LogicalType::Timestamp,
            NativeType::Binary
            | NativeType::VarBinary
            | NativeType::LongVarBinary
            | NativeType::Blob => LogicalType::Binary,
            // Character data, TIME and everything without a natural mapping
            _ => LogicalType::String,
        }
    }
}

/// Translates vendor type codes into type names and logical types.
///
/// Discovery calls this for every column row; implementations must be pure.
pub trait TypeMapper: Send + Sync {
    /// Human-readable native type name for a code.
    fn native_type_name(&self, code: i32) -> String;

    /// Logical type for a code.
    fn logical_type(&self, code: i32) -> LogicalType;
}

/// The standard SQL type code mapping.
///
/// Unknown codes are named `UNKNOWN(<code>)` and treated as strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypeMapper;

impl TypeMapper for StandardTypeMapper {
    fn native_type_name(&self, code: i32) -> String {
        match NativeType::from_code(code) {
            Some(native) => native.name().to_string(),
            None => format!("UNKNOWN({})", code),
        }
    }

    fn logical_type(&self, code: i32) -> LogicalType {
        NativeType::from_code(code)
            .map(LogicalType::from)
            .unwrap_or(LogicalType::String)
    }
}
