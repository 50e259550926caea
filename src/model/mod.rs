//! Normalized discovery model.
//!
//! Every value here is built fresh by one discovery call and handed to the
//! caller; nothing is cached or shared between calls.

mod field;
mod table;

pub use field::{Field, PrimaryKeySet};
pub use table::{TableIdentity, TableSchema};
