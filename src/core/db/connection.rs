/// Connection Management Module
///
/// Opens and closes the SQLite connection that queries run against, and
/// derives a database name from the connection URL.

use crate::core::db::query::{Outcome, QueryExecutor};
use crate::core::db::schema;
use crate::core::{RecordsError, Result};
use crate::records::Records;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

/// Extracts the database name from a connection URL.
///
/// The name is the text after the last `/`, cut at the first `?`:
/// `user:pw@tcp(host:3306)/cron?tls=skip-verify` yields `cron`, and
/// `file:/var/data/app.db?mode=ro` yields `app.db`.
pub fn database_name(url: &str) -> &str {
    let tail = url.rsplit('/').next().unwrap_or(url);
    match tail.find('?') {
        Some(end) => &tail[..end],
        None => tail,
    }
}

/// An open SQLite database.
#[derive(Debug)]
pub struct Database {
    url: String,
    connection: Connection,
}

impl Database {
    /// Opens the database at `url`.
    ///
    /// Accepts `:memory:`, a file path, or a `file:` URI (query parameters
    /// such as `mode=ro` are honored).
    ///
    /// # Errors
    ///
    /// Returns `RecordsError::Database` if SQLite cannot open the target.
    pub fn open(url: &str) -> Result<Self> {
        let connection = if url.starts_with("file:") {
            let flags = OpenFlags::default() | OpenFlags::SQLITE_OPEN_URI;
            Connection::open_with_flags(url, flags)?
        } else {
            Connection::open(url)?
        };
        info!("Opened database '{}'", database_name(url));
        Ok(Database {
            url: url.to_string(),
            connection,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Closes the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        debug!("Closing database '{}'", database_name(&self.url));
        self.connection
            .close()
            .map_err(|(_, e)| RecordsError::Database(e))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Database name derived from the URL; see [`database_name`].
    pub fn name(&self) -> &str {
        database_name(&self.url)
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Names of the user tables, sorted.
    pub fn table_names(&self) -> Result<Vec<String>> {
        schema::table_names(&self.connection)
    }

    /// Runs a query and decodes the whole result set.
    pub fn query(&self, sql: &str) -> Result<Records> {
        QueryExecutor::new(&self.connection).query(sql)
    }

    /// Runs any statement, decoding rows when it produces a result set.
    pub fn run(&self, sql: &str) -> Result<Outcome> {
        QueryExecutor::new(&self.connection).run(sql)
    }

    /// Runs a statement that returns no rows and reports how many rows changed.
    pub fn exec(&self, sql: &str) -> Result<usize> {
        QueryExecutor::new(&self.connection).exec(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_with_params() {
        let url = "user:password@tcp(localhost:3306)/cron?tls=skip-verify&autocommit=true";
        assert_eq!(database_name(url), "cron");
    }

    #[test]
    fn test_database_name_without_params() {
        assert_eq!(database_name("/var/data/app.db"), "app.db");
        assert_eq!(database_name("file:/tmp/x.db?mode=ro"), "x.db");
        assert_eq!(database_name(":memory:"), ":memory:");
        assert_eq!(database_name("host/"), "");
    }

    #[test]
    fn test_open_and_close() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.name(), ":memory:");
        db.close().unwrap();
    }

    #[test]
    fn test_open_failure() {
        let result = Database::open("/nonexistent/path/database.db");
        match result.unwrap_err() {
            RecordsError::Database(_) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uri.db");
        let url = format!("file:{}?mode=rwc", path.display());
        let db = Database::open(&url).unwrap();
        assert_eq!(db.name(), "uri.db");
        db.exec("CREATE TABLE t (id INTEGER)").unwrap();
        assert_eq!(db.table_names().unwrap(), vec!["t".to_string()]);
    }
}
