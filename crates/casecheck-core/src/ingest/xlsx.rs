use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::CasecheckError;
use crate::ingest::{normalize_header, record_from_cells, RecordSet};

/// Read records from the first worksheet of an Excel workbook.
///
/// Row 1 is the header. Empty cells are left absent.
pub fn read_xlsx_records(bytes: &[u8]) -> Result<RecordSet, CasecheckError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| CasecheckError::UnsupportedInput(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CasecheckError::UnsupportedInput("workbook has no worksheets".into()))?
        .map_err(|e| CasecheckError::UnsupportedInput(format!("failed to read worksheet: {e}")))?;

    let mut rows = sheet.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|c| cell_as_string(c).map(|s| normalize_header(&s)).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let records = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| record_from_cells(&columns, row.iter().map(cell_as_string)))
        .collect();

    Ok(RecordSet { columns, records })
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_string() {
        assert_eq!(cell_as_string(&Data::String(" x ".into())), Some(" x ".into()));
        assert_eq!(cell_as_string(&Data::Float(68.0)), Some("68".into()));
        assert_eq!(cell_as_string(&Data::Int(3)), Some("3".into()));
        assert_eq!(cell_as_string(&Data::Empty), None);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = read_xlsx_records(b"not a workbook").unwrap_err();
        assert!(matches!(err, CasecheckError::UnsupportedInput(_)));
    }
}
