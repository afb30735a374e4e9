use crate::core::{RecordsError, Result, Value};
use crate::export::{CsvOptions, Export, SingleExport};
use crate::record::Record;
use indexmap::IndexMap;
use serde::Serialize;
use std::ops::Index;
use tracing::warn;

/// A full result set, in the row order the query returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Records {
    rows: Vec<Record>,
}

impl Records {
    pub fn new() -> Self {
        Records { rows: Vec::new() }
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn first(&self) -> Option<&Record> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Record>> for Records {
    fn from(rows: Vec<Record>) -> Self {
        Records { rows }
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Records {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Records {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Index<usize> for Records {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.rows[index]
    }
}

impl Export for Records {
    fn to_maps(&self) -> Vec<IndexMap<String, Value>> {
        self.rows.iter().map(|record| record.to_map()).collect()
    }

    fn to_slices(&self) -> Vec<Vec<Value>> {
        self.rows.iter().map(|record| record.to_slice()).collect()
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_csv_with(&self, with_header: bool, options: &CsvOptions) -> Result<Vec<Vec<String>>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        if with_header {
            let first = self.rows.first().ok_or_else(|| {
                warn!("CSV header requested from an empty result set");
                RecordsError::EmptyBatchHeader
            })?;
            grid.push(first.columns());
        }
        grid.extend(self.rows.iter().map(|record| record.csv_row(options)));
        Ok(grid)
    }
}
