use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::DataError;
use super::model::{Dataset, Record};

/// Column holding the categorical label.
pub const KEY_COLUMN: &str = "Drug";
/// Column holding the sodium-to-potassium ratio.
pub const VALUE_COLUMN: &str = "Na_to_K";
/// File gathered by the viewer, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "drug200.csv";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Dataset, DataError> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|source| DataError::SourceUnavailable {
        name: name.clone(),
        source,
    })?;
    let dataset = load_reader(file, &name)?;
    log::info!(
        "Loaded {} rows ({} distinct {KEY_COLUMN} values) from {name}",
        dataset.len(),
        dataset.distinct_keys()
    );
    Ok(dataset)
}

/// Load a dataset from any CSV source.  `name` is only used in error messages.
///
/// Layout: a header row naming at least [`KEY_COLUMN`] and [`VALUE_COLUMN`];
/// any other columns are ignored.  The first bad row aborts the load.
pub fn load_reader<R: Read>(source: R, name: &str) -> Result<Dataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| classify_csv_error(e, name))?
        .clone();

    let key_idx = column_index(&headers, KEY_COLUMN)?;
    let value_idx = column_index(&headers, VALUE_COLUMN)?;

    let mut dataset = Dataset::default();

    for result in reader.records() {
        let record = result.map_err(|e| classify_csv_error(e, name))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let key = record
            .get(key_idx)
            .ok_or_else(|| DataError::malformed(line, format!("missing '{KEY_COLUMN}' value")))?;
        let raw = record
            .get(value_idx)
            .ok_or_else(|| DataError::malformed(line, format!("missing '{VALUE_COLUMN}' value")))?;

        let value = parse_ratio(raw).ok_or_else(|| {
            DataError::malformed(line, format!("'{VALUE_COLUMN}' value '{raw}' is not a number"))
        })?;

        dataset.push(Record::new(key, value));
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataError::malformed(1, format!("header is missing the '{column}' column")))
}

/// Finite decimal literals only; `NaN` and `inf` would poison min/max and the mean.
fn parse_ratio(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn classify_csv_error(err: csv::Error, name: &str) -> DataError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DataError::SourceUnavailable {
            name: name.to_string(),
            source,
        },
        _ => DataError::malformed(line, message),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn load_str(text: &str) -> Result<Dataset, DataError> {
        load_reader(Cursor::new(text.to_owned()), "inline")
    }

    #[test]
    fn loads_rows_in_source_order() {
        let ds = load_str(
            "Age,Sex,BP,Cholesterol,Na_to_K,Drug\n\
             23,F,HIGH,HIGH,25.355,DrugY\n\
             47,M,LOW,HIGH,13.093,drugC\n\
             47,M,LOW,HIGH,10.114,drugC\n",
        )
        .unwrap();

        assert_eq!(ds.series(), &[25.355, 13.093, 10.114]);
        assert_eq!(ds.distinct_keys(), 2);
        assert_eq!(ds.get("drugC"), Some(10.114));
    }

    #[test]
    fn header_only_source_yields_empty_dataset() {
        let ds = load_str("Drug,Na_to_K\n").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn tolerates_whitespace_and_signs_in_ratio() {
        let ds = load_str("Drug,Na_to_K\nA, 7.5 \nB,-2\nC,+3.\n").unwrap();
        assert_eq!(ds.series(), &[7.5, -2.0, 3.0]);
    }

    #[test]
    fn missing_value_column_in_header_is_malformed() {
        let err = load_str("Drug,Ratio\nA,1.0\n").unwrap_err();
        match err {
            DataError::MalformedRow { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains(VALUE_COLUMN), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_ratio_reports_its_line() {
        let err = load_str("Drug,Na_to_K\nA,1.0\nB,high\n").unwrap_err();
        match err {
            DataError::MalformedRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("high"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let err = load_str("Drug,Na_to_K\nA\n").unwrap_err();
        assert!(matches!(err, DataError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn non_finite_ratio_is_malformed() {
        assert!(matches!(
            load_str("Drug,Na_to_K\nA,NaN\n"),
            Err(DataError::MalformedRow { .. })
        ));
        assert!(matches!(
            load_str("Drug,Na_to_K\nA,inf\n"),
            Err(DataError::MalformedRow { .. })
        ));
    }

    #[test]
    fn invalid_utf8_reports_a_readable_reason() {
        let bytes = b"Drug,Na_to_K\nA,1.0\n\xff\xfe,2.0\n".to_vec();
        match load_reader(Cursor::new(bytes), "latin1") {
            Err(DataError::MalformedRow { reason, .. }) => {
                assert!(reason.to_lowercase().contains("utf-8"), "{reason}");
                assert!(!reason.contains("ErrorKind"), "{reason}");
                assert!(!reason.contains("Utf8 {"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = load_file(Path::new("definitely/not/here/drug200.csv")).unwrap_err();
        assert!(matches!(err, DataError::SourceUnavailable { .. }));
    }
}
