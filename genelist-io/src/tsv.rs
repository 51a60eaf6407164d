use std::io::Read;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use genelist_core::utils::get_dynamic_reader_w_stdin;

/// One data row together with its 1-based line number in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TsvRow {
    pub line: usize,
    pub values: Vec<String>,
}

///
/// A tab separated table as read from disk: the first row is the header, no
/// column count is enforced so that ragged rows can be reported per row.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TsvTable {
    pub header: Vec<String>,
    pub rows: Vec<TsvRow>,
}

///
/// Read a tab separated file (optionally gzipped, or `-` for stdin).
///
/// # Arguments
/// - path: path to the file
pub fn read_tsv(path: &str) -> Result<TsvTable> {
    let reader = get_dynamic_reader_w_stdin(path)?;
    parse_tsv(reader).with_context(|| format!("Could not read file {}", path))
}

///
/// Parse tab separated records from any reader.
///
pub fn parse_tsv<R: Read>(reader: R) -> Result<TsvTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = TsvTable::default();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);
        let values: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

        if table.header.is_empty() {
            table.header = values;
        } else {
            table.rows.push(TsvRow { line, values });
        }
    }

    Ok(table)
}
