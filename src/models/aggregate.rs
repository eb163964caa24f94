use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{ProcessingError, Result};

/// Calendar bucket width used for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    Daily,
    Monthly,
}

impl Period {
    /// Bucket label for an instant: the day itself, or the last day of the month.
    pub fn label(&self, ts: &DateTime<Utc>) -> NaiveDate {
        let date = ts.date_naive();
        match self {
            Period::Daily => date,
            Period::Monthly => month_end(date.year(), date.month()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Monthly => "monthly",
        }
    }
}

pub fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Averages per calendar bucket; one row per non-empty bucket, ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub period: Period,
    pub index_name: String,
    pub keys: Vec<NaiveDate>,
    pub columns: Vec<SeriesColumn>,
}

impl AggregateTable {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Keys paired with the defined values of a column.
    pub fn points(&self, name: &str) -> Result<Vec<(NaiveDate, f64)>> {
        let values = self.column(name)?;
        Ok(self
            .keys
            .iter()
            .zip(values)
            .filter_map(|(k, v)| v.map(|v| (*k, v)))
            .collect())
    }

    /// Bucket labels as midnight UTC instants.
    pub fn instants(&self) -> Vec<DateTime<Utc>> {
        self.keys
            .iter()
            .filter_map(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .collect()
    }
}

/// Fractional year of a date, used as the x coordinate of time axes.
pub fn decimal_year(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}
