use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::CasecheckError;
use crate::ingest::{normalize_header, record_from_cells, RecordSet};

/// Read records from CSV text.
///
/// The first row is the header. Headers are normalized (BOM stripped,
/// trimmed, lowercased) and values are trimmed. Rows may be shorter or
/// longer than the header.
pub fn read_csv_records<R: Read>(reader: R) -> Result<RecordSet, CasecheckError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(record_from_cells(
            &columns,
            row.iter().map(|v| Some(v.to_string())),
        ));
    }

    Ok(RecordSet { columns, records })
}

pub fn read_csv_path(path: &Path) -> Result<RecordSet, CasecheckError> {
    let file = std::fs::File::open(path)?;
    read_csv_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_records() {
        let csv = "\u{feff}Client Name , Report Type,Risk Profile\nJane Doe,Annual Review,\nJohn Roe,New Business,low\n";
        let set = read_csv_records(csv.as_bytes()).unwrap();
        assert_eq!(set.columns, vec!["client name", "report type", "risk profile"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0].get("Client Name"), Some("Jane Doe"));
        assert_eq!(set.records[0].get("risk profile"), Some(""));
        assert_eq!(set.records[1].get("risk profile"), Some("low"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let csv = "client name,report type,signature\n  Jane Doe , annual review ,   \n";
        let set = read_csv_records(csv.as_bytes()).unwrap();
        assert_eq!(set.records[0].get("client name"), Some("Jane Doe"));
        assert_eq!(set.records[0].get("report type"), Some("annual review"));
        assert_eq!(set.records[0].get("signature"), Some(""));
    }

    #[test]
    fn test_short_rows_are_accepted() {
        let csv = "client name,report type,signature\nJane Doe,annual review\n";
        let set = read_csv_records(csv.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].get("signature"), None);
        assert!(set.records[0].is_missing("signature"));
    }

    #[test]
    fn test_header_only() {
        let set = read_csv_records("client name,report type\n".as_bytes()).unwrap();
        assert!(set.is_empty());
        assert!(set.require_columns(&["client name", "report type"]).is_ok());
    }
}
