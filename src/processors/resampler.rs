use crate::models::{AggregateTable, Period, SeriesColumn, WeatherTable};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Running sums for one calendar bucket.
#[derive(Debug, Clone)]
struct BucketAccumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl BucketAccumulator {
    fn new(width: usize) -> Self {
        Self {
            sums: vec![0.0; width],
            counts: vec![0; width],
        }
    }

    fn mean(&self, column: usize) -> Option<f64> {
        match self.counts[column] {
            0 => None,
            n => Some(self.sums[column] / n as f64),
        }
    }
}

/// Averages numeric columns over calendar buckets.
pub struct Resampler;

impl Default for Resampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Resampler {
    pub fn new() -> Self {
        Self
    }

    pub fn monthly(&self, table: &WeatherTable) -> AggregateTable {
        self.resample(table, Period::Monthly)
    }

    pub fn daily(&self, table: &WeatherTable) -> AggregateTable {
        self.resample(table, Period::Daily)
    }

    /// Mean of every numeric column per bucket. Empty buckets produce no row;
    /// a bucket whose column is entirely null yields a null cell.
    pub fn resample(&self, table: &WeatherTable, period: Period) -> AggregateTable {
        let numeric: Vec<(&str, &[Option<f64>])> = table.numeric_columns().collect();
        let mut buckets: BTreeMap<NaiveDate, BucketAccumulator> = BTreeMap::new();

        for (row, ts) in table.timestamps().iter().enumerate() {
            let bucket = buckets
                .entry(period.label(ts))
                .or_insert_with(|| BucketAccumulator::new(numeric.len()));

            for (i, (_, values)) in numeric.iter().enumerate() {
                if let Some(value) = values[row] {
                    bucket.sums[i] += value;
                    bucket.counts[i] += 1;
                }
            }
        }

        let keys: Vec<NaiveDate> = buckets.keys().copied().collect();
        let columns = numeric
            .iter()
            .enumerate()
            .map(|(i, (name, _))| SeriesColumn {
                name: name.to_string(),
                values: buckets.values().map(|b| b.mean(i)).collect(),
            })
            .collect();

        tracing::debug!(
            period = period.as_str(),
            buckets = keys.len(),
            "resampled table"
        );

        AggregateTable {
            period,
            index_name: table.index_name().to_string(),
            keys,
            columns,
        }
    }
}
