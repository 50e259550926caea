//! Column type translation.
//!
//! Vendors report a numeric type code per column. `NativeType` names the
//! standard codes and `LogicalType` is the canonical classification handed
//! to ingestion. Discovery goes through the `TypeMapper` trait so hosts can
//! plug in their own vendor taxonomy; `StandardTypeMapper` is the default.

mod logical;
mod native;

pub use logical::{LogicalType, StandardTypeMapper, TypeMapper};
pub use native::NativeType;
