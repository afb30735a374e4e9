/// Export Module
///
/// The conversion surface shared by a single [`Record`](crate::record::Record)
/// and a [`Records`](crate::records::Records) batch, plus the outer pieces a
/// caller needs to hand the result to a file or terminal: format selection and
/// CSV text encoding.
use crate::core::{RecordsError, Result, Value};
use crate::records::Records;
use indexmap::IndexMap;
use serde::Deserialize;
use csv::{Terminator, WriterBuilder};
use std::io::Write;

/// Options for turning values into CSV cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvOptions {
    /// Text written for null cells. Defaults to the empty string.
    pub null_text: String,
}

impl CsvOptions {
    pub fn with_null_text(null_text: impl Into<String>) -> Self {
        CsvOptions {
            null_text: null_text.into(),
        }
    }
}

/// Conversions available on one decoded row.
pub trait SingleExport {
    /// Column name to value, in column order.
    fn to_map(&self) -> IndexMap<String, Value>;

    /// Values only, in column order.
    fn to_slice(&self) -> Vec<Value>;

    /// A JSON object with keys in column order.
    fn to_json(&self) -> Result<String>;

    /// One data row, preceded by a header row when `with_header` is set.
    fn to_csv_with(&self, with_header: bool, options: &CsvOptions) -> Vec<Vec<String>>;

    /// Same as [`to_csv_with`](SingleExport::to_csv_with) with nulls written as `""`.
    fn to_csv(&self, with_header: bool) -> Vec<Vec<String>> {
        self.to_csv_with(with_header, &CsvOptions::default())
    }
}

/// Conversions available on a whole result set.
///
/// Each element-wise result equals the matching [`SingleExport`] call on the
/// record at the same index.
pub trait Export {
    fn to_maps(&self) -> Vec<IndexMap<String, Value>>;

    fn to_slices(&self) -> Vec<Vec<Value>>;

    /// A JSON array of objects; `[]` for an empty batch.
    fn to_json(&self) -> Result<String>;

    /// All rows, with the first record's columns as a single header row when
    /// `with_header` is set.
    ///
    /// # Errors
    ///
    /// Returns `RecordsError::EmptyBatchHeader` if a header is requested and
    /// the batch has no records.
    fn to_csv_with(&self, with_header: bool, options: &CsvOptions) -> Result<Vec<Vec<String>>>;

    fn to_csv(&self, with_header: bool) -> Result<Vec<Vec<String>>> {
        self.to_csv_with(with_header, &CsvOptions::default())
    }
}

/// Output format selectable from the command line or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Maps,
    Slices,
}

impl std::str::FromStr for ExportFormat {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "maps" => Ok(ExportFormat::Maps),
            "slices" => Ok(ExportFormat::Slices),
            _ => Err(RecordsError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Renders a batch as text in the requested format.
///
/// `Maps` and `Slices` are written as pretty-printed JSON. CSV output follows
/// [`write_csv`].
pub fn render(
    records: &Records,
    format: ExportFormat,
    with_header: bool,
    options: &CsvOptions,
) -> Result<String> {
    match format {
        ExportFormat::Json => records.to_json(),
        ExportFormat::Maps => Ok(serde_json::to_string_pretty(&records.to_maps())?),
        ExportFormat::Slices => Ok(serde_json::to_string_pretty(&records.to_slices())?),
        ExportFormat::Csv => {
            let grid = records.to_csv_with(with_header, options)?;
            let mut out = Vec::new();
            write_csv(&grid, &mut out)?;
            String::from_utf8(out)
                .map_err(|e| RecordsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
        }
    }
}

/// Writes a grid as CSV text.
///
/// Fields are quoted only when they need it (delimiter, quote, CR or LF), and
/// every row ends with `\n`.
pub fn write_csv<W: Write>(grid: &[Vec<String>], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    for row in grid {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
