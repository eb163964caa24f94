use crate::analyzers::{DescribeTable, DESCRIBE_ROWS};
use crate::error::Result;
use crate::models::AggregateTable;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes report tables as CSV.
pub struct CsvReportWriter;

impl Default for CsvReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_aggregate(&self, table: &AggregateTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_aggregate_to(table, file)?;
        tracing::info!(path = %path.display(), rows = table.len(), "wrote aggregate table");
        Ok(())
    }

    /// Index column first, then one column per averaged series.
    pub fn write_aggregate_to<W: Write>(&self, table: &AggregateTable, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![table.index_name.clone()];
        header.extend(table.columns.iter().map(|c| c.name.clone()));
        csv_writer.write_record(&header)?;

        for (row, instant) in table.instants().iter().enumerate() {
            let mut record = vec![instant.format("%Y-%m-%d %H:%M:%S%:z").to_string()];
            record.extend(table.columns.iter().map(|c| format_float(c.values[row])));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_describe(&self, describe: &DescribeTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_describe_to(describe, file)?;
        tracing::info!(path = %path.display(), columns = describe.columns.len(), "wrote describe table");
        Ok(())
    }

    /// One row per statistic, one column per numeric column.
    pub fn write_describe_to<W: Write>(&self, describe: &DescribeTable, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![String::new()];
        header.extend(describe.columns.iter().map(|(name, _)| name.clone()));
        csv_writer.write_record(&header)?;

        let rows: Vec<[f64; 8]> = describe
            .columns
            .iter()
            .map(|(_, stats)| stats.row_values())
            .collect();

        for (i, label) in DESCRIBE_ROWS.iter().enumerate() {
            let mut record = vec![label.to_string()];
            record.extend(rows.iter().map(|values| format_float(Some(values[i]))));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Shortest round-trip form, always with a fractional part; empty for missing.
pub fn format_float(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:?}", v),
        Some(v) if v.is_infinite() => (if v > 0.0 { "inf" } else { "-inf" }).to_string(),
        _ => String::new(),
    }
}
