use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::error::ArchiveError;

/// A delimited table held entirely as strings, so nothing is coerced before
/// the cleaning stages decide what a value means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        Self::from_reader(file, delimiter, &path.display().to_string())
            .with_context(|| format!("Failed to read table {:?}", path))
    }

    pub fn from_reader<R: std::io::Read>(reader: R, delimiter: u8, source: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read headers")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to parse row {}", idx + 1))?;
            rows.push(pad_record(&record, headers.len()));
        }

        Ok(Table {
            source: source.to_string(),
            headers,
            rows,
        })
    }

    /// Position of a required column.
    pub fn column(&self, name: &str) -> Result<usize, ArchiveError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ArchiveError::MissingColumn {
                path: self.source.clone(),
                column: name.to_string(),
            })
    }

    /// All values of one column, in row order.
    pub fn values(&self, idx: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
            .collect()
    }

    /// Return a new table with one more column appended.
    pub fn with_column(mut self, name: &str, values: Vec<String>) -> Self {
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self
    }

    pub fn write(&self, path: &Path, delimiter: u8) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        self.to_writer(file, delimiter)
            .with_context(|| format!("Failed to write table {:?}", path))
    }

    pub fn to_writer<W: std::io::Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Short rows get empty cells; extra trailing cells are dropped.
fn pad_record(record: &StringRecord, width: usize) -> Vec<String> {
    (0..width)
        .map(|i| record.get(i).unwrap_or("").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_all_values_as_strings() {
        let t = Table::from_reader("a,b\n 01 ,x\n2,\n".as_bytes(), b',', "mem").unwrap();
        assert_eq!(t.headers, vec!["a", "b"]);
        assert_eq!(t.rows[0], vec![" 01 ", "x"]);
        assert_eq!(t.rows[1], vec!["2", ""]);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = Table::from_reader("a,b,c\n1\n".as_bytes(), b',', "mem").unwrap();
        assert_eq!(t.rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn missing_column_names_source() {
        let t = Table::from_reader("a,b\n".as_bytes(), b',', "raw.csv").unwrap();
        let err = t.column("Timestamp").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingColumn { ref path, ref column }
            if path == "raw.csv" && column == "Timestamp"));
    }

    #[test]
    fn pipe_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.psv");
        let t = Table::from_reader("a,b\nx|y,z\n".as_bytes(), b',', "mem")
            .unwrap()
            .with_column("c", vec!["w".into()]);
        t.write(&path, b'|').unwrap();
        let back = Table::read(&path, b'|').unwrap();
        assert_eq!(back.headers, vec!["a", "b", "c"]);
        assert_eq!(back.rows, vec![vec!["x|y", "z", "w"]]);
    }
}
