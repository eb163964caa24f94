use crate::error::Result;
use crate::models::{Column, Frame};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a delimited file with a header row into a [`Frame`].
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn load(&self, path: &Path) -> Result<Frame> {
        let file = File::open(path)?;
        let frame = self.load_from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = frame.row_count(),
            columns = frame.column_count(),
            "loaded dataset"
        );
        Ok(frame)
    }

    /// Parse CSV from any reader. Ragged rows are a parse error.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Frame> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for record in csv_reader.records() {
            let record = record?;
            for (column, value) in cells.iter_mut().zip(record.iter()) {
                column.push(value.to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::infer(name, values))
            .collect();

        Frame::new(columns)
    }
}
