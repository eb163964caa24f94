use crate::error::{ProcessingError, Result};
use crate::models::{Column, Frame, WeatherTable};
use crate::utils::constants::{DATE_COLUMN, LOUD_COVER_COLUMN, PRECIP_TYPE_COLUMN, UNKNOWN_PRECIP};
use crate::utils::parse_timestamp;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub unparseable_timestamps: usize,
    pub filled_values: usize,
    pub dropped_columns: Vec<String>,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Cleaning Summary:".to_string(),
            format!("  Rows before:            {}", self.rows_before),
            format!("  Rows after:             {}", self.rows_after),
            format!("  Unparseable timestamps: {}", self.unparseable_timestamps),
            format!("  Filled categories:      {}", self.filled_values),
        ];
        if !self.dropped_columns.is_empty() {
            lines.push(format!(
                "  Dropped columns:        {}",
                self.dropped_columns.join(", ")
            ));
        }
        lines.join("\n")
    }
}

/// Turns a loaded [`Frame`] into a timestamp-indexed [`WeatherTable`].
pub struct Cleaner {
    date_column: String,
    fill_column: String,
    fill_value: String,
    drop_columns: Vec<String>,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner {
    pub fn new() -> Self {
        Self {
            date_column: DATE_COLUMN.to_string(),
            fill_column: PRECIP_TYPE_COLUMN.to_string(),
            fill_value: UNKNOWN_PRECIP.to_string(),
            drop_columns: vec![LOUD_COVER_COLUMN.to_string()],
        }
    }

    pub fn clean(&self, mut frame: Frame) -> Result<(WeatherTable, CleaningReport)> {
        let mut report = CleaningReport {
            rows_before: frame.row_count(),
            ..Default::default()
        };

        frame.rename_columns(|name| name.trim().to_string());

        let date_column = frame
            .remove_column(&self.date_column)
            .ok_or_else(|| ProcessingError::MissingColumn(self.date_column.clone()))?;
        let raw_dates = date_column.as_text().map(<[_]>::to_vec).unwrap_or_else(|| {
            // A numeric date column never parses; keep row alignment with nulls.
            vec![None; date_column.len()]
        });

        let mut parsed: Vec<(usize, chrono::DateTime<chrono::Utc>)> = Vec::new();
        for (row, value) in raw_dates.iter().enumerate() {
            match value.as_deref().and_then(parse_timestamp) {
                Some(ts) => parsed.push((row, ts)),
                None => {
                    tracing::debug!(row, value = ?value, "dropping row with unparseable timestamp");
                }
            }
        }
        report.unparseable_timestamps = report.rows_before - parsed.len();

        for name in &self.drop_columns {
            if frame.remove_column(name).is_some() {
                report.dropped_columns.push(name.clone());
            }
        }

        // Stable sort keeps file order for equal instants.
        parsed.sort_by_key(|(_, ts)| *ts);
        let (order, timestamps): (Vec<usize>, Vec<_>) = parsed.into_iter().unzip();

        let mut columns: Vec<Column> = frame
            .into_columns()
            .iter()
            .map(|c| c.take(&order))
            .collect();

        if let Some(column) = columns.iter_mut().find(|c| c.name == self.fill_column) {
            report.filled_values = column.fill_text(&self.fill_value);
        }

        let table = WeatherTable::new(self.date_column.clone(), timestamps, columns)?;
        report.rows_after = table.len();

        tracing::info!(
            rows_before = report.rows_before,
            rows_after = report.rows_after,
            unparseable = report.unparseable_timestamps,
            filled = report.filled_values,
            "cleaned dataset"
        );

        Ok((table, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::CsvLoader;
    use pretty_assertions::assert_eq;

    fn load(data: &str) -> Frame {
        CsvLoader::new().load_from_reader(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_clean_sorts_and_drops() -> Result<()> {
        let frame = load(
            " Formatted Date ,Precip Type,Temperature (C),Loud Cover\n\
             2020-01-02 00:00:00.000 +0000,rain,10,0\n\
             ,snow,99,0\n\
             2020-01-01 00:00:00.000 +0000,,0,0\n",
        );

        let (table, report) = Cleaner::new().clean(frame)?;

        assert_eq!(table.len(), 2);
        assert!(table.timestamps().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(table.numeric("Temperature (C)")?, &[Some(0.0), Some(10.0)]);
        assert_eq!(
            table.text("Precip Type")?,
            &[Some("unknown".to_string()), Some("rain".to_string())]
        );
        assert!(!table.has_column("Loud Cover"));
        assert_eq!(
            report,
            CleaningReport {
                rows_before: 3,
                rows_after: 2,
                unparseable_timestamps: 1,
                filled_values: 1,
                dropped_columns: vec!["Loud Cover".to_string()],
            }
        );
        Ok(())
    }

    #[test]
    fn test_optional_columns_absent() -> Result<()> {
        let frame = load("Formatted Date,Humidity\n2020-01-01,0.5\n");

        let (table, report) = Cleaner::new().clean(frame)?;

        assert_eq!(table.len(), 1);
        assert_eq!(report.filled_values, 0);
        assert!(report.dropped_columns.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_date_column() {
        let frame = load("Date,Humidity\n2020-01-01,0.5\n");

        let result = Cleaner::new().clean(frame);

        assert!(matches!(result, Err(ProcessingError::MissingColumn(_))));
    }

    #[test]
    fn test_whitespace_in_headers_is_stripped() -> Result<()> {
        let frame = load("Formatted Date,  Humidity  \n2020-01-01,0.5\n");

        let (table, _) = Cleaner::new().clean(frame)?;

        assert!(table.has_column("Humidity"));
        Ok(())
    }
}
