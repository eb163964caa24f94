use crate::analyzers::{
    autocorrelation, decompose_additive, rolling_mean, ConfidenceBands, SeasonalDecomposition,
};
use crate::charts::{padded_range, palette, ChartKind, DrawResult, FONT, LABEL_SIZE, TITLE_SIZE};
use crate::error::Result;
use crate::models::{decimal_year, AggregateTable};
use plotters::prelude::*;
use std::path::Path;

/// Defined values of an aggregate column against fractional year.
pub fn year_points(table: &AggregateTable, column: &str) -> Result<Vec<(f64, f64)>> {
    Ok(table
        .points(column)?
        .into_iter()
        .map(|(date, v)| (decimal_year(date), v))
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RollingSeries {
    pub window: usize,
    pub raw: Vec<(f64, f64)>,
    pub rolling: Vec<(f64, f64)>,
}

/// Daily series plus its trailing mean; undefined rolling entries are left out.
pub fn rolling_series(daily: &AggregateTable, column: &str, window: usize) -> Result<RollingSeries> {
    let values = daily.column(column)?;
    let rolled = rolling_mean(values, window);
    let xs: Vec<f64> = daily.keys.iter().map(|d| decimal_year(*d)).collect();

    let raw = xs
        .iter()
        .zip(values)
        .filter_map(|(x, v)| v.map(|v| (*x, v)))
        .collect();
    let rolling = xs
        .iter()
        .zip(&rolled)
        .filter_map(|(x, v)| v.map(|v| (*x, v)))
        .collect();

    Ok(RollingSeries {
        window,
        raw,
        rolling,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutocorrelationSeries {
    pub lags: Vec<(usize, f64)>,
    pub bands: ConfidenceBands,
}

pub fn autocorrelation_series(monthly: &AggregateTable, column: &str) -> Result<AutocorrelationSeries> {
    let values: Vec<f64> = monthly.column(column)?.iter().flatten().copied().collect();
    Ok(AutocorrelationSeries {
        lags: autocorrelation(&values),
        bands: ConfidenceBands::for_length(values.len()),
    })
}

/// Decomposition of the defined values of a monthly column, with the
/// fractional-year position of each value.
pub fn seasonal_components(
    monthly: &AggregateTable,
    column: &str,
    period: usize,
) -> Result<(Vec<f64>, SeasonalDecomposition)> {
    let (xs, values): (Vec<f64>, Vec<f64>) = year_points(monthly, column)?.into_iter().unzip();
    let decomposition = decompose_additive(&values, period)?;
    Ok((xs, decomposition))
}

pub fn draw_monthly_average(points: &[(f64, f64)], path: &Path) -> DrawResult<()> {
    let kind = ChartKind::MonthlyAverage;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            padded_range(points.iter().map(|p| p.0)),
            padded_range(points.iter().map(|p| p.1)),
        )?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Temp (°C)")
        .x_label_formatter(&|x| format!("{:.0}", x.floor()))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), palette(0).stroke_width(2)))?;

    root.present()?;
    Ok(())
}

pub fn draw_rolling_mean(series: &RollingSeries, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::RollingMean;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            padded_range(series.raw.iter().map(|p| p.0)),
            padded_range(series.raw.iter().map(|p| p.1)),
        )?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format!("{:.0}", x.floor()))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let daily = palette(0).mix(0.5);
    chart
        .draw_series(LineSeries::new(series.raw.iter().copied(), daily.stroke_width(1)))?
        .label("Daily")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], daily.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(series.rolling.iter().copied(), RED.stroke_width(2)))?
        .label(format!("{}-day Rolling Mean", series.window))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, LABEL_SIZE))
        .draw()?;

    root.present()?;
    Ok(())
}

pub fn draw_autocorrelation(series: &AutocorrelationSeries, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::Autocorrelation;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let max_lag = series.lags.len().max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_lag + 1.0, -1.0..1.0)?;

    chart
        .configure_mesh()
        .x_desc("Lag")
        .y_desc("Autocorrelation")
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let horizontal = |y: f64| vec![(0.0, y), (max_lag + 1.0, y)];
    chart.draw_series(LineSeries::new(horizontal(0.0), BLACK.stroke_width(1)))?;
    let bands = [
        (series.bands.z95, palette(7).to_rgba()),
        (series.bands.z99, palette(7).mix(0.6)),
    ];
    for (band, color) in bands {
        chart.draw_series(LineSeries::new(horizontal(band), color.stroke_width(1)))?;
        chart.draw_series(LineSeries::new(horizontal(-band), color.stroke_width(1)))?;
    }

    chart.draw_series(LineSeries::new(
        series.lags.iter().map(|(lag, r)| (*lag as f64, *r)),
        palette(0).stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

pub fn draw_seasonal(xs: &[f64], decomposition: &SeasonalDecomposition, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::SeasonalDecomposition;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(kind.title(), (FONT, TITLE_SIZE))?;
    let panels = root.split_evenly((4, 1));

    let defined = |values: &[Option<f64>]| -> Vec<(f64, f64)> {
        xs.iter()
            .zip(values)
            .filter_map(|(x, v)| v.map(|v| (*x, v)))
            .collect()
    };
    let observed: Vec<(f64, f64)> = xs
        .iter()
        .copied()
        .zip(decomposition.observed.iter().copied())
        .collect();
    let trend = defined(&decomposition.trend);
    let seasonal: Vec<(f64, f64)> = xs
        .iter()
        .copied()
        .zip(decomposition.seasonal.iter().copied())
        .collect();
    let residual = defined(&decomposition.residual);

    let x_range = padded_range(xs.iter().copied());
    let series = [
        ("Observed", &observed),
        ("Trend", &trend),
        ("Seasonal", &seasonal),
        ("Resid", &residual),
    ];

    for (i, (panel, (label, points))) in panels.iter().zip(series).enumerate() {
        let mut chart = ChartBuilder::on(panel)
            .margin(8)
            .x_label_area_size(if i == 3 { 35 } else { 20 })
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), padded_range(points.iter().map(|p| p.1)))?;

        chart
            .configure_mesh()
            .y_desc(label)
            .x_label_formatter(&|x| format!("{:.0}", x.floor()))
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        if label == "Resid" {
            chart.draw_series(LineSeries::new(
                vec![(x_range.start, 0.0), (x_range.end, 0.0)],
                BLACK.stroke_width(1),
            ))?;
            chart.draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, palette(0).filled())),
            )?;
        } else {
            chart.draw_series(LineSeries::new(points.iter().copied(), palette(0).stroke_width(2)))?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{month_end, Period, SeriesColumn};
    use chrono::NaiveDate;

    fn monthly(values: Vec<Option<f64>>) -> AggregateTable {
        let keys = (0..values.len())
            .map(|i| month_end(2010 + (i / 12) as i32, (i % 12) as u32 + 1))
            .collect();
        AggregateTable {
            period: Period::Monthly,
            index_name: "Formatted Date".to_string(),
            keys,
            columns: vec![SeriesColumn {
                name: "Temperature (C)".to_string(),
                values,
            }],
        }
    }

    #[test]
    fn test_year_points_skip_nulls() {
        let table = monthly(vec![Some(1.0), None, Some(3.0)]);

        let points = year_points(&table, "Temperature (C)").unwrap();

        assert_eq!(points.len(), 2);
        assert!(points[0].0 > 2010.0 && points[0].0 < 2010.1);
    }

    #[test]
    fn test_rolling_series_drops_warm_up() {
        let keys: Vec<NaiveDate> = (1..=40)
            .map(|d| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(d))
            .collect();
        let daily = AggregateTable {
            period: Period::Daily,
            index_name: "Formatted Date".to_string(),
            keys,
            columns: vec![SeriesColumn {
                name: "Temperature (C)".to_string(),
                values: (0..40).map(|i| Some(i as f64)).collect(),
            }],
        };

        let series = rolling_series(&daily, "Temperature (C)", 30).unwrap();

        assert_eq!(series.raw.len(), 40);
        assert_eq!(series.rolling.len(), 11);
        assert_eq!(series.rolling[0].1, 14.5);
    }

    #[test]
    fn test_seasonal_components_drop_nulls() {
        let mut values: Vec<Option<f64>> = (0..30).map(|i| Some((i % 12) as f64)).collect();
        values[4] = None;

        let (xs, decomposition) =
            seasonal_components(&monthly(values), "Temperature (C)", 12).unwrap();

        assert_eq!(xs.len(), 29);
        assert_eq!(decomposition.observed.len(), 29);
    }

    #[test]
    fn test_autocorrelation_series() {
        let table = monthly((0..24).map(|i| Some((i % 12) as f64)).collect());

        let series = autocorrelation_series(&table, "Temperature (C)").unwrap();

        assert_eq!(series.lags.len(), 24);
        assert_eq!(series.bands, ConfidenceBands::for_length(24));
    }
}
