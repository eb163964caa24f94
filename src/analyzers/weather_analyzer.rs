use crate::models::WeatherTable;
use crate::utils::constants::MONTH_COLUMN;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row labels of a describe table, in output order.
pub const DESCRIBE_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics of one numeric column. Everything but `count` is
/// NaN when the column has no values; `std` is NaN below two values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(values);
        Self {
            count,
            mean,
            std: sample_std(values, mean),
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            q50: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    /// Values in [`DESCRIBE_ROWS`] order.
    pub fn row_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribeTable {
    pub columns: Vec<(String, ColumnStats)>,
}

impl DescribeTable {
    pub fn get(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }
}

/// Headline facts about a cleaned table.
#[derive(Debug, Serialize)]
pub struct DatasetOverview {
    pub total_records: usize,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub describe: DescribeTable,
}

impl DatasetOverview {
    pub fn summary(&self) -> String {
        let range = match self.date_range {
            Some((start, end)) => format!(
                "{} to {} ({} days)",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M"),
                end.signed_duration_since(start).num_days()
            ),
            None => "No records".to_string(),
        };

        format!(
            "Records: {} total\nDate Range: {}\nDescribed columns: {}",
            self.total_records,
            range,
            self.describe.columns.len()
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut lines = vec![self.summary(), String::new()];
        lines.push(format!(
            "{:<28} {:>8} {:>10} {:>10} {:>10} {:>10}",
            "Column", "count", "mean", "std", "min", "max"
        ));
        for (name, stats) in &self.describe.columns {
            lines.push(format!(
                "{:<28} {:>8} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                name, stats.count, stats.mean, stats.std, stats.min, stats.max
            ));
        }
        lines.join("\n")
    }
}

pub struct WeatherAnalyzer;

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// count, mean, std, min, quartiles, max for each numeric column.
    /// Stats of every numeric column, followed by the calendar month derived
    /// from the timestamps.
    pub fn describe(&self, table: &WeatherTable) -> DescribeTable {
        let mut columns: Vec<(String, ColumnStats)> = table
            .numeric_columns()
            .map(|(name, values)| {
                let defined: Vec<f64> = values.iter().flatten().copied().collect();
                (name.to_string(), ColumnStats::from_values(&defined))
            })
            .collect();

        let months: Vec<f64> = table.months().into_iter().map(f64::from).collect();
        columns.push((MONTH_COLUMN.to_string(), ColumnStats::from_values(&months)));
        DescribeTable { columns }
    }

    pub fn overview(&self, table: &WeatherTable) -> DatasetOverview {
        let timestamps = table.timestamps();
        let date_range = match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };

        DatasetOverview {
            total_records: table.len(),
            date_range,
            describe: self.describe(table),
        }
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with n-1 in the denominator.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Linearly interpolated quantile of an ascending slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
