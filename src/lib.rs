// Core infrastructure modules
pub mod core;

// Records and their conversions
pub mod config;
pub mod export;
pub mod record;
pub mod records;

pub use crate::core::db::{database_name, Database, RowDecoder};
pub use crate::core::{OrderedMap, RawValue, RecordsError, Result, Value};
pub use export::{CsvOptions, Export, ExportFormat, SingleExport};
pub use record::Record;
pub use records::Records;
