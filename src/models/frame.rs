use chrono::{DateTime, Datelike, Utc};

use crate::error::{ProcessingError, Result};
use crate::models::Column;

/// Raw table as read from disk, columns in file order.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    columns: Vec<Column>,
    row_count: usize,
}

impl Frame {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                row_count
            )));
        }
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn rename_columns<F>(&mut self, rename: F)
    where
        F: Fn(&str) -> String,
    {
        for column in &mut self.columns {
            column.name = rename(&column.name);
        }
    }

    /// Remove a column by name, returning it if it existed.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(pos))
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

/// Cleaned observation table indexed by UTC timestamp, sorted ascending.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    index_name: String,
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl WeatherTable {
    pub fn new(
        index_name: impl Into<String>,
        timestamps: Vec<DateTime<Utc>>,
        columns: Vec<Column>,
    ) -> Result<Self> {
        if let Some(bad) = columns.iter().find(|c| c.len() != timestamps.len()) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Column '{}' has {} rows, index has {}",
                bad.name,
                bad.len(),
                timestamps.len()
            )));
        }
        if timestamps.windows(2).any(|w| w[0] > w[1]) {
            return Err(ProcessingError::InvalidFormat(
                "Timestamps must be sorted ascending".to_string(),
            ));
        }
        Ok(Self {
            index_name: index_name.into(),
            timestamps,
            columns,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        self.column(name)?.as_numeric().ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("Column '{}' is not numeric", name))
        })
    }

    pub fn text(&self, name: &str) -> Result<&[Option<String>]> {
        self.column(name)?.as_text().ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("Column '{}' is not text", name))
        })
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.columns
            .iter()
            .filter_map(|c| c.as_numeric().map(|v| (c.name.as_str(), v)))
    }

    /// Calendar month (1-12) of each row.
    pub fn months(&self) -> Vec<u32> {
        self.timestamps.iter().map(|t| t.month()).collect()
    }

    /// Calendar year of each row.
    pub fn years(&self) -> Vec<i32> {
        self.timestamps.iter().map(|t| t.year()).collect()
    }

    /// Non-null values of a numeric column.
    pub fn values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.numeric(name)?.iter().flatten().copied().collect())
    }
}
