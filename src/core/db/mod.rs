/// Database Module
///
/// The path from a SQLite database to decoded records.
///
/// ## Architecture
///
/// - **Connection Management** (`connection.rs`): opens and closes the database, derives its name
/// - **Schema Introspection** (`schema.rs`): lists tables
/// - **Query Execution** (`query.rs`): runs SQL and collects raw rows
/// - **Row Decoding** (`decode.rs`): normalizes raw rows into records
///
/// ## Error Handling
///
/// All database operations use the standardized `RecordsError` type for consistent error propagation.
pub mod connection;
pub mod decode;
pub mod query;
pub mod schema;

pub use connection::*;
pub use decode::*;
pub use query::*;
pub use schema::*;
