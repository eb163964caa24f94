use crate::analyzers::{GaussianKde, LinearFit, RowSampler};
use crate::charts::{padded_range, palette, ChartKind, DrawResult, FONT, LABEL_SIZE, TITLE_SIZE};
use crate::error::{ProcessingError, Result};
use crate::models::WeatherTable;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

const BAND_POINTS: usize = 100;

/// Sampled scatter of two columns with its least squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterTrend {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    pub fit: Option<LinearFit>,
}

/// Samples `amount` rows, then keeps those where both values are defined.
pub fn scatter_trend(
    table: &WeatherTable,
    x: &str,
    y: &str,
    sampler: &mut RowSampler,
    amount: usize,
) -> Result<ScatterTrend> {
    let xs = table.numeric(x)?;
    let ys = table.numeric(y)?;
    let points: Vec<(f64, f64)> = sampler
        .sample_indices(table.len(), amount)
        .into_iter()
        .filter_map(|i| Some((xs[i]?, ys[i]?)))
        .collect();
    let fit = LinearFit::fit(&points);
    if fit.is_none() {
        tracing::warn!(x, y, points = points.len(), "no regression line for scatter");
    }

    Ok(ScatterTrend {
        x_label: x.to_string(),
        y_label: y.to_string(),
        points,
        fit,
    })
}

/// Complete rows of several columns, sampled, in column-major layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PairGrid {
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl PairGrid {
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}

/// Drops rows with a null in any of `names`, then samples `amount` of the rest.
pub fn pair_grid(
    table: &WeatherTable,
    names: &[&str],
    sampler: &mut RowSampler,
    amount: usize,
) -> Result<PairGrid> {
    let sources = names
        .iter()
        .map(|name| table.numeric(name))
        .collect::<Result<Vec<_>>>()?;

    let complete: Vec<usize> = (0..table.len())
        .filter(|&row| sources.iter().all(|values| values[row].is_some()))
        .collect();
    if complete.is_empty() {
        return Err(ProcessingError::InsufficientData(
            "no complete rows for the pair grid".to_string(),
        ));
    }

    let picked: Vec<usize> = sampler
        .sample_indices(complete.len(), amount)
        .into_iter()
        .map(|i| complete[i])
        .collect();

    Ok(PairGrid {
        names: names.iter().map(|n| n.to_string()).collect(),
        columns: sources
            .iter()
            .map(|values| picked.iter().filter_map(|&row| values[row]).collect())
            .collect(),
    })
}

pub fn draw_scatter_trend(scatter: &ScatterTrend, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::TemperatureHumidity;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = padded_range(scatter.points.iter().map(|p| p.0));
    let y_range = padded_range(scatter.points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc(scatter.x_label.as_str())
        .y_desc(scatter.y_label.as_str())
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(
        scatter
            .points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 2, palette(0).mix(0.3).filled())),
    )?;

    if let Some(fit) = scatter.fit {
        let band = fit.band(x_range.start, x_range.end, BAND_POINTS);
        let outline: Vec<(f64, f64)> = band
            .iter()
            .map(|&(x, lower, _, _)| (x, lower))
            .chain(band.iter().rev().map(|&(x, _, _, upper)| (x, upper)))
            .collect();

        chart.draw_series(std::iter::once(Polygon::new(outline, palette(3).mix(0.2).filled())))?;
        chart.draw_series(LineSeries::new(
            band.iter().map(|&(x, _, y, _)| (x, y)),
            palette(3).stroke_width(2),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Grid of pairwise scatters with a density estimate on the diagonal.
pub fn draw_pair_grid(grid: &PairGrid, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::PairGrid;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(kind.title(), (FONT, TITLE_SIZE))?;

    let n = grid.names.len();
    let panels = root.split_evenly((n, n));
    let ranges: Vec<_> = grid
        .columns
        .iter()
        .map(|values| padded_range(values.iter().copied()))
        .collect();

    for (index, panel) in panels.iter().enumerate() {
        let (row, col) = (index / n, index % n);
        let mut builder = ChartBuilder::on(panel);
        builder
            .margin(4)
            .x_label_area_size(if row == n - 1 { 30 } else { 0 })
            .y_label_area_size(if col == 0 { 45 } else { 0 });

        if row == col {
            let curve = GaussianKde::new(&grid.columns[col])
                .map(|kde| kde.curve(BAND_POINTS))
                .unwrap_or_default();
            let peak = curve.iter().map(|p| p.1).fold(0.0_f64, f64::max);
            let mut chart = builder
                .build_cartesian_2d(ranges[col].clone(), 0.0..(peak * 1.05).max(f64::EPSILON))?;
            configure_panel(&mut chart, grid, row, col)?;
            chart.draw_series(
                AreaSeries::new(curve, 0.0, palette(0).mix(0.3))
                    .border_style(palette(0).stroke_width(1)),
            )?;
        } else {
            let mut chart =
                builder.build_cartesian_2d(ranges[col].clone(), ranges[row].clone())?;
            configure_panel(&mut chart, grid, row, col)?;
            chart.draw_series(
                grid.columns[col]
                    .iter()
                    .zip(&grid.columns[row])
                    .map(|(&x, &y)| Circle::new((x, y), 1, palette(0).mix(0.4).filled())),
            )?;
        }
    }

    root.present()?;
    Ok(())
}

type PanelChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn configure_panel(
    chart: &mut PanelChart<'_, '_>,
    grid: &PairGrid,
    row: usize,
    col: usize,
) -> DrawResult<()> {
    let last = grid.names.len() - 1;
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(4)
        .y_labels(4)
        .label_style((FONT, 11))
        .axis_desc_style((FONT, 12));
    if row == last {
        mesh.x_desc(grid.names[col].as_str());
    }
    if col == 0 {
        mesh.y_desc(grid.names[row].as_str());
    }
    mesh.draw()?;
    Ok(())
}
