//! Native SQL type codes.
//!
//! Vendors report column types as the standard numeric SQL type codes
//! (the `DATA_TYPE` column of a column enumeration). This enum names the
//! known codes.

use std::fmt;

/// Standard SQL type codes as reported in column metadata.
///
/// # Examples
///
/// ```
/// use rdbms_discovery::types::NativeType;
///
/// assert_eq!(NativeType::from_code(4), Some(NativeType::Integer));
/// assert_eq!(NativeType::Integer.name(), "INTEGER");
/// assert_eq!(NativeType::from_code(424242), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NativeType {
    Bit = -7,
    TinyInt = -6,
    SmallInt = 5,
    Integer = 4,
    BigInt = -5,
    Float = 6,
    Real = 7,
    Double = 8,
    Numeric = 2,
    Decimal = 3,
    Char = 1,
    Varchar = 12,
    LongVarchar = -1,
    Date = 91,
    Time = 92,
    Timestamp = 93,
    Binary = -2,
    VarBinary = -3,
    LongVarBinary = -4,
    Null = 0,
    Other = 1111,
    JavaObject = 2000,
    Distinct = 2001,
    Struct = 2002,
    Array = 2003,
    Blob = 2004,
    Clob = 2005,
    Ref = 2006,
    DataLink = 70,
    Boolean = 16,
    RowId = -8,
    NChar = -15,
    NVarchar = -9,
    LongNVarchar = -16,
    NClob = 2011,
    SqlXml = 2009,
    RefCursor = 2012,
    TimeWithTimezone = 2013,
    TimestampWithTimezone = 2014,
}

const ALL: [NativeType; 39] = [
    NativeType::Bit,
    NativeType::TinyInt,
    NativeType::SmallInt,
    NativeType::Integer,
    NativeType::BigInt,
    NativeType::Float,
    NativeType::Real,
    NativeType::Double,
    NativeType::Numeric,
    NativeType::Decimal,
    NativeType::Char,
    NativeType::Varchar,
    NativeType::LongVarchar,
    NativeType::Date,
    NativeType::Time,
    NativeType::Timestamp,
    NativeType::Binary,
    NativeType::VarBinary,
    NativeType::LongVarBinary,
    NativeType::Null,
    NativeType::Other,
    NativeType::JavaObject,
    NativeType::Distinct,
    NativeType::Struct,
    NativeType::Array,
    NativeType::Blob,
    NativeType::Clob,
    NativeType::Ref,
    NativeType::DataLink,
    NativeType::Boolean,
    NativeType::RowId,
    NativeType::NChar,
    NativeType::NVarchar,
    NativeType::LongNVarchar,
    NativeType::NClob,
    NativeType::SqlXml,
    NativeType::RefCursor,
    NativeType::TimeWithTimezone,
    NativeType::TimestampWithTimezone,
];

impl NativeType {
    /// Look up a type by its numeric code.
    pub fn from_code(code: i32) -> Option<Self> {
        ALL.iter().copied().find(|t| t.code() == code)
    }

    /// The numeric code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// The standard upper-case type name.
    pub fn name(self) -> &'static str {
        match self {
            NativeType::Bit => "BIT",
            NativeType::TinyInt => "TINYINT",
            NativeType::SmallInt => "SMALLINT",
            NativeType::Integer => "INTEGER",
            NativeType::BigInt => "BIGINT",
            NativeType::Float => "FLOAT",
            NativeType::Real => "REAL",
            NativeType::Double => "DOUBLE",
            NativeType::Numeric => "NUMERIC",
            NativeType::Decimal => "DECIMAL",
            NativeType::Char => "CHAR",
            NativeType::Varchar => "VARCHAR",
            NativeType::LongVarchar => "LONGVARCHAR",
            NativeType::Date => "DATE",
            NativeType::Time => "TIME",
            NativeType::Timestamp => "TIMESTAMP",
            NativeType::Binary => "BINARY",
            NativeType::VarBinary => "VARBINARY",
            NativeType::LongVarBinary => "LONGVARBINARY",
            NativeType::Null => "NULL",
            NativeType::Other => "OTHER",
            NativeType::JavaObject => "JAVA_OBJECT",
            NativeType::Distinct => "DISTINCT",
            NativeType::Struct => "STRUCT",
            NativeType::Array => "ARRAY",
            NativeType::Blob => "BLOB",
            NativeType::Clob => "CLOB",
            NativeType::Ref => "REF",
            NativeType::DataLink => "DATALINK",
            NativeType::Boolean => "BOOLEAN",
            NativeType::RowId => "ROWID",
            NativeType::NChar => "NCHAR",
            NativeType::NVarchar => "NVARCHAR",
            NativeType::LongNVarchar => "LONGNVARCHAR",
            NativeType::NClob => "NCLOB",
            NativeType::SqlXml => "SQLXML",
            NativeType::RefCursor => "REF_CURSOR",
            NativeType::TimeWithTimezone => "TIME_WITH_TIMEZONE",
            NativeType::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
