use crate::constants::{EXPECTED_SENTIMENT_HEADER, EXPECTED_WORD_HEADER};
use crate::error::{MoodmapError, Result};
use crate::sentiment::SentimentTable;

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Reads a sentiment table from a CSV file
///
/// # Arguments
/// * `path` - Path to the CSV file with `word,sentiment` rows
///
/// # Errors
/// Returns error if the file cannot be read or the CSV format is invalid
pub fn read_sentiments_csv<P: AsRef<Path>>(path: P) -> Result<SentimentTable> {
    let file = std::fs::File::open(path)?;
    read_sentiments_from_reader(file)
}

/// Read CSV with `word,sentiment` format.
/// - Blank rows are skipped
/// - A word listed twice keeps its last value
pub fn read_sentiments_from_reader<R: Read>(reader: R) -> Result<SentimentTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // allow additional columns
        .from_reader(reader);

    validate_csv_headers(&mut rdr)?;

    let mut values: HashMap<String, f64> = HashMap::new();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if let Some((word, value)) = parse_record(&rec, row)? {
            values.insert(word, value);
        }
    }

    Ok(SentimentTable::from_values(values))
}

/// Validates CSV headers match expected format
fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| MoodmapError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    let word_header = headers
        .get(0)
        .ok_or_else(|| MoodmapError::CsvHeader("Missing word column at index 0".to_string()))?;

    let sentiment_header = headers.get(1).ok_or_else(|| {
        MoodmapError::CsvHeader("Missing sentiment column at index 1".to_string())
    })?;

    if !word_header.eq_ignore_ascii_case(EXPECTED_WORD_HEADER) {
        return Err(MoodmapError::CsvHeader(format!(
            "Expected '{}' in column 0, found '{}'",
            EXPECTED_WORD_HEADER, word_header
        )));
    }

    if !sentiment_header.eq_ignore_ascii_case(EXPECTED_SENTIMENT_HEADER) {
        return Err(MoodmapError::CsvHeader(format!(
            "Expected '{}' in column 1, found '{}'",
            EXPECTED_SENTIMENT_HEADER, sentiment_header
        )));
    }

    Ok(())
}

fn parse_record(rec: &StringRecord, row: usize) -> Result<Option<(String, f64)>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }
    let word = get_column_value(rec, 0, row)?;
    let value_str = get_column_value(rec, 1, row)?;

    if word.is_empty() {
        return Ok(None);
    }

    let value = parse_sentiment_value(value_str, row)?;
    Ok(Some((word.to_string(), value)))
}

/// Safely extracts a column value from a CSV record
fn get_column_value(record: &StringRecord, column_index: usize, row_number: usize) -> Result<&str> {
    record
        .get(column_index)
        .map(str::trim)
        .ok_or_else(|| MoodmapError::CsvRow {
            row: row_number,
            got: record.len(),
        })
}

/// Parses a sentiment string into f64
fn parse_sentiment_value(value_str: &str, row_number: usize) -> Result<f64> {
    value_str
        .parse()
        .map_err(|parse_error| MoodmapError::SentimentParse {
            row: row_number,
            value: value_str.to_string(),
            source: parse_error,
        })
}
