/// Row Decoding Module
///
/// Turns a column list plus positional raw values into records. The decoder
/// never looks at a database; it only needs what the query step hands over.
use crate::core::{OrderedMap, RawValue, RecordsError, Result, Value};
use crate::record::Record;
use crate::records::Records;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Decodes raw rows that share one column list.
#[derive(Debug, Clone)]
pub struct RowDecoder {
    columns: Vec<String>,
}

impl RowDecoder {
    /// Creates a decoder for the given column names, in SELECT order.
    pub fn new(columns: Vec<String>) -> Self {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                warn!("Duplicate column name '{}'; the last value wins", column);
            }
        }
        RowDecoder { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Decodes one row.
    ///
    /// # Errors
    ///
    /// Returns `RecordsError::Decode` if `values` does not have exactly one
    /// entry per column.
    pub fn decode(&self, values: Vec<RawValue>) -> Result<Record> {
        decode_row(&self.columns, values).map(Record::new)
    }

    /// Decodes every row, stopping at the first row that fails.
    pub fn decode_all<I>(&self, rows: I) -> Result<Records>
    where
        I: IntoIterator<Item = Vec<RawValue>>,
    {
        let records = rows
            .into_iter()
            .map(|values| self.decode(values))
            .collect::<Result<Records>>()?;
        debug!(
            "Decoded {} rows across {} columns",
            records.len(),
            self.columns.len()
        );
        Ok(records)
    }
}

/// Normalizes `values` and pairs them with `columns` in a fresh map.
///
/// Values are written with overwrite enabled, so a repeated column name keeps
/// its first position and its last value.
pub fn decode_row(columns: &[String], values: Vec<RawValue>) -> Result<OrderedMap<Value>> {
    if columns.len() != values.len() {
        return Err(RecordsError::Decode {
            columns: columns.len(),
            values: values.len(),
        });
    }

    let mut fields = OrderedMap::with_capacity(columns.len());
    for (column, raw) in columns.iter().zip(values) {
        fields.set(column.as_str(), raw.normalize(), true);
    }
    Ok(fields)
}
