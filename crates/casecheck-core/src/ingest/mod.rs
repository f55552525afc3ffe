pub mod csv_source;
pub mod xlsx;

use crate::error::CasecheckError;
use crate::model::{normalize_key, Record};
use std::path::Path;

/// Records read from a tabular source, with the normalized header row.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Fail if any of `required` is not among the columns.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), CasecheckError> {
        for column in required {
            let key = normalize_key(column);
            if !self.columns.iter().any(|c| *c == key) {
                return Err(CasecheckError::MissingColumn { column: key });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Normalize a header cell: strip a UTF-8 BOM, trim and lowercase.
pub fn normalize_header(raw: &str) -> String {
    normalize_key(raw.trim_start_matches('\u{feff}'))
}

/// Build a record from a header row and the cells of one data row.
///
/// Cells past the end of a short row are left absent. Columns with an
/// empty header are skipped.
pub(crate) fn record_from_cells<I>(columns: &[String], cells: I) -> Record
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut record = Record::new();
    for (column, cell) in columns.iter().zip(cells) {
        if column.is_empty() {
            continue;
        }
        if let Some(value) = cell {
            record.insert(column, value);
        }
    }
    record
}

/// Load records from a CSV or Excel file, chosen by extension.
pub fn load_records(path: &Path) -> Result<RecordSet, CasecheckError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let set = match ext.as_str() {
        "xlsx" | "xlsm" => {
            let bytes = std::fs::read(path).map_err(|e| CasecheckError::RecordSource {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            xlsx::read_xlsx_records(&bytes)
        }
        _ => csv_source::read_csv_path(path),
    }
    .map_err(|e| CasecheckError::RecordSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        path = %path.display(),
        records = set.len(),
        columns = set.columns.len(),
        "loaded records"
    );
    Ok(set)
}
