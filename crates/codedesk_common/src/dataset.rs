//! Dataset loading.
//!
//! Reads a delimited text file (CSV by default) or the first sheet of a
//! spreadsheet workbook into `Record`s according to a `Schema`. The schema says which column holds the lookup code, which
//! holds the descriptive name, and which detail columns are shown for each
//! row. All required columns must be present or loading fails; the matcher
//! never sees a partially-valid dataset.

use crate::error::DatasetError;
use calamine::{open_workbook_auto, Reader};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One detail column and the heading it is shown under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailColumn {
    /// Column header in the dataset file
    pub column: String,
    /// Table heading in rendered answers
    pub label: String,
}

impl DetailColumn {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Column layout of a knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Column holding the lookup code
    pub code_column: String,
    /// Column holding the descriptive name of the code
    pub name_column: String,
    /// How the code is called in answers (e.g. "08 Code")
    pub code_label: String,
    /// How the name is called in answers
    pub name_label: String,
    /// Detail columns, in display order
    pub details: Vec<DetailColumn>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            code_column: "Access Code".to_string(),
            name_column: "Setting item name".to_string(),
            code_label: "08 Code".to_string(),
            name_label: "Setting Item Name".to_string(),
            details: vec![
                DetailColumn::new("Sub Code", "Sub Code"),
                DetailColumn::new("Meaning of sub code", "Meaning"),
            ],
        }
    }
}

impl Schema {
    /// Every column the dataset must carry, in schema order
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.code_column.as_str(), self.name_column.as_str()];
        columns.extend(self.details.iter().map(|d| d.column.as_str()));
        columns
    }

    /// Detail table headings, in display order
    pub fn detail_labels(&self) -> Vec<&str> {
        self.details.iter().map(|d| d.label.as_str()).collect()
    }
}

/// One row of the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub code: String,
    pub name: String,
    /// Detail values, aligned with `Schema::details`
    pub details: Vec<String>,
}

impl Record {
    pub fn new(code: impl Into<String>, name: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            details,
        }
    }
}

/// File extensions read as spreadsheet workbooks
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether a path names a spreadsheet workbook
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
        .unwrap_or(false)
}

/// Load a dataset, picking the reader from the file extension.
///
/// `delimiter` only applies to delimited text.
pub fn load_dataset(path: &Path, schema: &Schema, delimiter: u8) -> Result<Vec<Record>, DatasetError> {
    if is_workbook(path) {
        load_workbook(path, schema)
    } else {
        load_csv(path, schema, delimiter)
    }
}

/// Load a delimited dataset file
pub fn load_csv(path: &Path, schema: &Schema, delimiter: u8) -> Result<Vec<Record>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|e| DatasetError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let records = parse_records(file, schema, delimiter, path)?;
    info!(
        "Loaded {} rows from {} ({} detail columns)",
        records.len(),
        path.display(),
        schema.details.len()
    );
    Ok(records)
}

/// Load the first sheet of a workbook; its first row is the header.
pub fn load_workbook(path: &Path, schema: &Schema) -> Result<Vec<Record>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    let unreadable = |reason: String| DatasetError::Unreadable {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable("workbook has no sheets".to_string()))?
        .map_err(|e| unreadable(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();
    let columns = ColumnMap::locate(&headers, schema)?;

    let mut records = Vec::new();
    for (row, cells) in rows.enumerate() {
        match columns.record(&cells) {
            Some(record) => records.push(record),
            None => warn!("Skipping row {} with an empty {}", row + 2, schema.code_column),
        }
    }

    info!(
        "Loaded {} rows from workbook {} ({} detail columns)",
        records.len(),
        path.display(),
        schema.details.len()
    );
    Ok(records)
}

/// Parse records from any reader (used for in-memory datasets)
pub fn read_records<R: Read>(
    input: R,
    schema: &Schema,
    delimiter: u8,
) -> Result<Vec<Record>, DatasetError> {
    parse_records(input, schema, delimiter, Path::new("<memory>"))
}

/// Positions of the schema columns in a header row
struct ColumnMap {
    code: usize,
    name: usize,
    details: Vec<usize>,
}

impl ColumnMap {
    fn locate<S: AsRef<str>>(headers: &[S], schema: &Schema) -> Result<Self, DatasetError> {
        let position = |column: &str| headers.iter().position(|h| h.as_ref() == column);

        let missing: Vec<String> = schema
            .required_columns()
            .into_iter()
            .filter(|column| position(*column).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }

        // Checked above
        Ok(Self {
            code: position(schema.code_column.as_str()).unwrap_or_default(),
            name: position(schema.name_column.as_str()).unwrap_or_default(),
            details: schema
                .details
                .iter()
                .filter_map(|d| position(d.column.as_str()))
                .collect(),
        })
    }

    /// Build a record from one row; `None` when the code cell is empty
    fn record<S: AsRef<str>>(&self, cells: &[S]) -> Option<Record> {
        let cell = |idx: usize| cells.get(idx).map(|c| c.as_ref()).unwrap_or("");
        let code = cell(self.code);
        if code.is_empty() {
            return None;
        }
        let details = self.details.iter().map(|&idx| cell(idx).to_string()).collect();
        Some(Record::new(code, cell(self.name), details))
    }
}

fn parse_records<R: Read>(
    input: R,
    schema: &Schema,
    delimiter: u8,
    origin: &Path,
) -> Result<Vec<Record>, DatasetError> {
    let unreadable = |e: csv::Error| DatasetError::Unreadable {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = ColumnMap::locate(&headers, schema)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_cells = result.map_err(unreadable)?;
        let cells: Vec<&str> = row_cells.iter().collect();
        match columns.record(&cells) {
            Some(record) => records.push(record),
            // +2: header line plus one-based numbering
            None => warn!("Skipping row {} with an empty {}", row + 2, schema.code_column),
        }
    }

    Ok(records)
}

/// Convert a configured delimiter into the byte the csv reader expects
pub fn delimiter_byte(delimiter: char) -> Option<u8> {
    if delimiter.is_ascii() {
        Some(delimiter as u8)
    } else {
        None
    }
}
