/// Schema Introspection Module
///
/// Lists the user tables of a database.

use crate::core::Result;
use rusqlite::Connection;

/// Returns the names of all user-defined tables, sorted by name.
///
/// SQLite's internal `sqlite_*` tables are left out.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type='table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;

    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(names)
}
