use crate::error::Result;
use crate::models::{AggregateTable, WeatherTable};
use chrono::Datelike;
use std::collections::{BTreeMap, BTreeSet};

/// Year x month table of a monthly series; `None` where no value exists.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMonthGrid {
    pub years: Vec<i32>,
    pub cells: Vec<[Option<f64>; 12]>,
}

impl YearMonthGrid {
    pub fn get(&self, year: i32, month: u32) -> Option<f64> {
        let row = self.years.iter().position(|y| *y == year)?;
        let col = month.checked_sub(1)? as usize;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Smallest and largest defined cell.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

/// Pivot a monthly aggregate column into years (rows) by months (columns).
/// Years with no defined value are omitted.
pub fn year_month_grid(monthly: &AggregateTable, column: &str) -> Result<YearMonthGrid> {
    let mut rows: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
    for (date, value) in monthly.points(column)? {
        let row = rows.entry(date.year()).or_insert([None; 12]);
        row[date.month0() as usize] = Some(value);
    }

    Ok(YearMonthGrid {
        years: rows.keys().copied().collect(),
        cells: rows.into_values().collect(),
    })
}

/// Values of a numeric column grouped by calendar month, index 0 = January.
pub fn values_by_month(table: &WeatherTable, column: &str) -> Result<[Vec<f64>; 12]> {
    let values = table.numeric(column)?;
    let mut groups: [Vec<f64>; 12] = Default::default();
    for (month, value) in table.months().into_iter().zip(values) {
        if let Some(v) = value {
            groups[(month - 1) as usize].push(*v);
        }
    }
    Ok(groups)
}

/// Occurrences of each category per calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCounts {
    pub years: Vec<i32>,
    pub categories: Vec<String>,
    /// `counts[year][category]`, zero where the combination never occurs.
    pub counts: Vec<Vec<u64>>,
}

impl CategoryCounts {
    pub fn year_total(&self, row: usize) -> u64 {
        self.counts.get(row).map_or(0, |r| r.iter().sum())
    }
}

/// Count rows per (year, category) of a text column. Null cells are not counted.
pub fn category_counts_by_year(table: &WeatherTable, column: &str) -> Result<CategoryCounts> {
    let values = table.text(column)?;
    let categories: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
    let categories: Vec<&str> = categories.into_iter().collect();

    let mut rows: BTreeMap<i32, Vec<u64>> = BTreeMap::new();
    for (year, value) in table.years().into_iter().zip(values) {
        let Some(value) = value else { continue };
        let row = rows
            .entry(year)
            .or_insert_with(|| vec![0; categories.len()]);
        if let Ok(idx) = categories.binary_search(&value.as_str()) {
            row[idx] += 1;
        }
    }

    Ok(CategoryCounts {
        years: rows.keys().copied().collect(),
        categories: categories.into_iter().map(str::to_string).collect(),
        counts: rows.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{month_end, Column, Period, SeriesColumn};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_year_month_grid() {
        let monthly = AggregateTable {
            period: Period::Monthly,
            index_name: "Formatted Date".to_string(),
            keys: vec![month_end(2019, 12), month_end(2020, 1), month_end(2020, 2)],
            columns: vec![SeriesColumn {
                name: "Temperature (C)".to_string(),
                values: vec![Some(1.0), Some(-2.0), None],
            }],
        };

        let grid = year_month_grid(&monthly, "Temperature (C)").unwrap();

        assert_eq!(grid.years, vec![2019, 2020]);
        assert_eq!(grid.get(2019, 12), Some(1.0));
        assert_eq!(grid.get(2020, 1), Some(-2.0));
        assert_eq!(grid.get(2020, 2), None);
        assert_eq!(grid.value_range(), Some((-2.0, 1.0)));
    }

    #[test]
    fn test_category_counts_fill_zero() {
        let ts = vec![
            Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        ];
        let precip = vec![
            Some("rain".to_string()),
            Some("rain".to_string()),
            Some("snow".to_string()),
        ];
        let table =
            WeatherTable::new("ts", ts, vec![Column::text("Precip Type", precip)]).unwrap();

        let counts = category_counts_by_year(&table, "Precip Type").unwrap();

        assert_eq!(
            counts,
            CategoryCounts {
                years: vec![2019, 2020],
                categories: vec!["rain".to_string(), "snow".to_string()],
                counts: vec![vec![2, 0], vec![0, 1]],
            }
        );
        assert_eq!(counts.year_total(0), 2);
    }

    #[test]
    fn test_values_by_month() {
        let ts = vec![
            Utc.with_ymd_and_hms(2019, 1, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2019, 12, 5, 0, 0, 0).unwrap(),
        ];
        let table = WeatherTable::new(
            "ts",
            ts,
            vec![Column::numeric("Temperature (C)", vec![Some(-1.0), Some(2.0)])],
        )
        .unwrap();

        let groups = values_by_month(&table, "Temperature (C)").unwrap();

        assert_eq!(groups[0], vec![-1.0]);
        assert_eq!(groups[11], vec![2.0]);
        assert!(groups[5].is_empty());
    }
}
