//! CSV Data Loader Module
//! Reads the fleet fuel CSV into raw string-keyed records using Polars.

use crate::data::records::RawRecord;
use polars::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads the fleet CSV as raw records: first row is the header, every cell
/// kept as a string. Type coercion happens later, per record.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into one `RawRecord` per non-empty data row, in file
    /// order. A trailing newline produces no record.
    pub fn load(file_path: &str) -> Result<Vec<RawRecord>, LoaderError> {
        // Schema inference off: every column reads as a string.
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let mut record = RawRecord::new();
            for column in df.get_columns() {
                if let Ok(value) = column.get(i) {
                    if !value.is_null() {
                        record.insert(
                            column.name().to_string(),
                            value.to_string().trim_matches('"').to_string(),
                        );
                    }
                }
            }
            records.push(record);
        }

        info!(path = file_path, rows = records.len(), "loaded fleet CSV");
        Ok(records)
    }

    /// Load, degrading any failure (missing file, unreadable content) to an
    /// empty record list. The dashboard renders an empty fleet the same way
    /// it renders one that has not arrived yet.
    pub fn load_or_empty(file_path: &str) -> Vec<RawRecord> {
        match Self::load(file_path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = file_path, error = %e, "CSV load failed, continuing with empty fleet");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn preserves_row_count_with_trailing_newline() {
        let file = write_csv(
            "Registration,Distance,Litres,MPG,Cost\n\
             AA11 AAA,100,50,20,60\n\
             BB22 BBB,200,80,18,95\n\
             CC33 CCC,300,120,15,140\n",
        );

        let records = DataLoader::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].get("Registration").map(String::as_str),
            Some("AA11 AAA")
        );
        assert_eq!(records[2].get("Cost").map(String::as_str), Some("140"));
    }

    #[test]
    fn cells_stay_strings_until_coercion() {
        let file = write_csv("Registration,Litres\nAA11 AAA,412.3\n");

        let records = DataLoader::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records[0].get("Litres").map(String::as_str), Some("412.3"));
    }

    #[test]
    fn header_only_file_yields_zero_records() {
        let file = write_csv("Registration,Distance,Litres,MPG,Cost\n");

        let records = DataLoader::load(file.path().to_str().unwrap()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unrecognized_columns_are_kept() {
        let file = write_csv("Registration,Litres,Depot\nAA11 AAA,50,Leeds\n");

        let records = DataLoader::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records[0].get("Depot").map(String::as_str), Some("Leeds"));
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let records = DataLoader::load_or_empty("/no/such/dir/fleet.csv");
        assert!(records.is_empty());
    }
}
