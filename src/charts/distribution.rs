use crate::analyzers::{values_by_month, BoxStats, GaussianKde};
use crate::charts::{
    integer_tick, month_abbrev, padded_range, palette, ChartKind, DrawResult, FONT, LABEL_SIZE,
    TITLE_SIZE,
};
use crate::error::Result;
use crate::models::WeatherTable;
use plotters::prelude::*;
use std::path::Path;

/// Box statistics per calendar month (1-12); months without data are skipped.
pub fn monthly_boxes(table: &WeatherTable, column: &str) -> Result<Vec<(u32, BoxStats)>> {
    Ok(values_by_month(table, column)?
        .iter()
        .enumerate()
        .filter_map(|(i, values)| BoxStats::from_values(values).map(|b| (i as u32 + 1, b)))
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// KDE curve per column. Columns too small or constant to estimate are
/// skipped with a warning.
pub fn density_curves(
    table: &WeatherTable,
    columns: &[(&str, &str)],
    points: usize,
) -> Result<Vec<DensityCurve>> {
    let mut curves = Vec::new();
    for (column, label) in columns {
        let values = table.values(column)?;
        match GaussianKde::new(&values) {
            Some(kde) => curves.push(DensityCurve {
                label: label.to_string(),
                points: kde.curve(points),
            }),
            None => tracing::warn!(column, "not enough spread for a density estimate"),
        }
    }
    Ok(curves)
}

pub fn draw_boxplot(boxes: &[(u32, BoxStats)], y_label: &str, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::MonthlyBoxplot;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let y_range = padded_range(boxes.iter().flat_map(|(_, b)| {
        b.outliers
            .iter()
            .copied()
            .chain([b.whisker_low, b.whisker_high])
            .collect::<Vec<_>>()
    }));

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5..12.5, y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(13)
        .x_label_formatter(&|x| {
            integer_tick(*x)
                .map(|m| month_abbrev(m as u32).to_string())
                .unwrap_or_default()
        })
        .x_desc("month")
        .y_desc(y_label)
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let half_width = 0.35;
    for (month, stats) in boxes {
        let x = *month as f64;
        let color = palette(*month as usize - 1);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half_width, stats.q1), (x + half_width, stats.q3)],
            color.mix(0.8).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half_width, stats.q1), (x + half_width, stats.q3)],
            BLACK.stroke_width(1),
        )))?;

        let segments = [
            vec![(x - half_width, stats.median), (x + half_width, stats.median)],
            vec![(x, stats.q3), (x, stats.whisker_high)],
            vec![(x, stats.q1), (x, stats.whisker_low)],
            vec![(x - half_width / 2.0, stats.whisker_high), (x + half_width / 2.0, stats.whisker_high)],
            vec![(x - half_width / 2.0, stats.whisker_low), (x + half_width / 2.0, stats.whisker_low)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|segment| PathElement::new(segment, BLACK.stroke_width(1))),
        )?;

        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|y| Circle::new((x, *y), 2, BLACK.mix(0.6).stroke_width(1))),
        )?;
    }

    root.present()?;
    Ok(())
}

pub fn draw_density(curves: &[DensityCurve], path: &Path) -> DrawResult<()> {
    let kind = ChartKind::Density;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let all_points = || curves.iter().flat_map(|c| c.points.iter());
    let x_range = padded_range(all_points().map(|p| p.0));
    let y_max = all_points().map(|p| p.1).fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, 0.0..(y_max * 1.05).max(f64::EPSILON))?;

    chart
        .configure_mesh()
        .y_desc("Density")
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    for (i, curve) in curves.iter().enumerate() {
        let color = palette(i);
        chart
            .draw_series(
                AreaSeries::new(curve.points.iter().copied(), 0.0, color.mix(0.3))
                    .border_style(color.stroke_width(2)),
            )?
            .label(curve.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.mix(0.5).filled()));
    }

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
