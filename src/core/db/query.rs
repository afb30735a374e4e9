/// Query Execution Module
///
/// Runs SQL against a connection and hands the raw rows to the row decoder.

use crate::core::db::decode::RowDecoder;
use crate::core::{RawValue, RecordsError, Result};
use crate::records::Records;
use rusqlite::{types::ValueRef, Connection, Statement};
use tracing::debug;

/// Query execution service that operates on a database connection
pub struct QueryExecutor<'a> {
    connection: &'a Connection,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new QueryExecutor for the given connection
    pub fn new(connection: &'a Connection) -> Self {
        QueryExecutor { connection }
    }

    /// Executes a SQL query and decodes every row.
    ///
    /// # Arguments
    ///
    /// * `sql` - The SQL query to execute
    ///
    /// # Returns
    ///
    /// Returns the materialized result set, one record per row, with each
    /// record's columns in SELECT order.
    ///
    /// # Errors
    ///
    /// Returns `RecordsError::Query` if the SQL cannot be prepared or run, and
    /// `RecordsError::Decode` if a row does not line up with the columns.
    pub fn query(&self, sql: &str) -> Result<Records> {
        let mut stmt = self.prepare(sql)?;
        decode_statement(&mut stmt, sql)
    }

    /// Executes a statement that returns no rows.
    ///
    /// # Returns
    ///
    /// The number of rows inserted, updated or deleted.
    pub fn exec(&self, sql: &str) -> Result<usize> {
        let changed = self
            .connection
            .execute(sql, [])
            .map_err(|e| RecordsError::Query(format!("Statement execution failed: {}", e)))?;
        debug!("Statement changed {} rows", changed);
        Ok(changed)
    }

    /// Prepares `sql` once and either decodes its rows or executes it,
    /// depending on whether it produces a result set.
    pub fn run(&self, sql: &str) -> Result<Outcome> {
        let mut stmt = self.prepare(sql)?;
        if stmt.column_count() > 0 {
            return decode_statement(&mut stmt, sql).map(Outcome::Rows);
        }
        let changed = stmt
            .execute([])
            .map_err(|e| RecordsError::Query(format!("Statement execution failed: {}", e)))?;
        debug!("Statement changed {} rows", changed);
        Ok(Outcome::Changed(changed))
    }

    fn prepare(&self, sql: &str) -> Result<Statement<'a>> {
        self.connection
            .prepare(sql)
            .map_err(|e| RecordsError::Query(format!("Failed to prepare statement: {}", e)))
    }
}

/// What running a statement produced.
#[derive(Debug)]
pub enum Outcome {
    /// A decoded result set
    Rows(Records),
    /// Rows inserted, updated or deleted
    Changed(usize),
}

fn decode_statement(stmt: &mut Statement, sql: &str) -> Result<Records> {
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let column_count = columns.len();
    debug!("Running query with {} columns: {}", column_count, sql);

    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(raw_value(row.get_ref(i)?));
            }
            Ok(values)
        })
        .map_err(|e| RecordsError::Query(format!("Query execution failed: {}", e)))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| RecordsError::Query(format!("Result processing failed: {}", e)))?;

    RowDecoder::new(columns).decode_all(rows)
}

/// Maps a SQLite cell to the driver-level value kinds.
///
/// SQLite hands back text and blobs as byte slices; both travel on as
/// `RawValue::Bytes` and become text at decode time.
fn raw_value(value: ValueRef) -> RawValue {
    match value {
        ValueRef::Null => RawValue::Null,
        ValueRef::Integer(i) => RawValue::Integer(i),
        ValueRef::Real(f) => RawValue::Float(f),
        ValueRef::Text(t) => RawValue::Bytes(t.to_vec()),
        ValueRef::Blob(b) => RawValue::Bytes(b.to_vec()),
    }
}

/// Convenience function to run a query on a connection
pub fn query_on_connection(conn: &Connection, sql: &str) -> Result<Records> {
    QueryExecutor::new(conn).query(sql)
}
