use crate::analyzers::CategoryCounts;
use crate::charts::{integer_tick, palette, ChartKind, DrawResult, FONT, LABEL_SIZE, TITLE_SIZE};
use plotters::prelude::*;
use std::path::Path;

/// `(category, x, bottom, top)` for each non-empty segment, bars centred on
/// integer positions in year order and stacked in category order.
pub fn stacked_segments(counts: &CategoryCounts) -> Vec<(usize, f64, f64, f64)> {
    let mut segments = Vec::new();
    for (row, year_counts) in counts.counts.iter().enumerate() {
        let mut bottom = 0.0;
        for (category, &count) in year_counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let top = bottom + count as f64;
            segments.push((category, row as f64, bottom, top));
            bottom = top;
        }
    }
    segments
}

pub fn draw_stacked_bars(counts: &CategoryCounts, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::PrecipitationTypes;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;

    let tallest = (0..counts.years.len())
        .map(|row| counts.year_total(row))
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let bars = counts.years.len();
    let years = &counts.years;

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..bars as f64 - 0.5, 0.0..tallest * 1.05)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars + 1)
        .x_label_formatter(&|x| {
            integer_tick(*x)
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| years.get(i))
                .map(|year| year.to_string())
                .unwrap_or_default()
        })
        .x_desc("year")
        .y_desc("Count")
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let segments = stacked_segments(counts);
    let half_width = 0.4;
    for (category, name) in counts.categories.iter().enumerate() {
        let color = palette(category);
        chart
            .draw_series(
                segments
                    .iter()
                    .filter(|segment| segment.0 == category)
                    .map(|&(_, x, bottom, top)| {
                        Rectangle::new(
                            [(x - half_width, bottom), (x + half_width, top)],
                            color.filled(),
                        )
                    }),
            )?
            .label(name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
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
