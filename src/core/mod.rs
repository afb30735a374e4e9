/// Core Module
///
/// Value types, the ordered container every record is built on, the row
/// decoder and the SQLite adapter that feeds it.

pub mod db;
pub mod error;
pub mod ordered_map;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{RecordsError, Result};
pub use ordered_map::OrderedMap;
pub use value::{RawValue, Value};
