use crate::analyzers::YearMonthGrid;
use crate::charts::{integer_tick, month_abbrev, ChartKind, DrawResult, FONT, LABEL_SIZE, TITLE_SIZE};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
const COLORBAR_STEPS: usize = 100;

/// Diverging blue-grey-red color for `t` in `[0, 1]`; clamps outside.
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let (from, to, local) = if t < 0.5 {
        (COLD, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}

/// Years as rows (earliest on top), months as columns, one annotated cell
/// per defined value, with a colorbar on the right.
pub fn draw_heatmap(grid: &YearMonthGrid, path: &Path) -> DrawResult<()> {
    let kind = ChartKind::YearMonthHeatmap;
    let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(kind.title(), (FONT, TITLE_SIZE))?;
    let (width, _) = root.dim_in_pixel();
    let (main, bar) = root.split_horizontally((width as i32 - 110).max(0));

    let (lo, hi) = grid.value_range().unwrap_or((0.0, 1.0));
    let bar_top = if hi > lo { hi } else { lo + 1.0 };
    let rows = grid.years.len().max(1);
    let years = grid.years.clone();
    let year_for_tick = move |y: &f64| -> String {
        integer_tick(*y)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| years.len().checked_sub(i + 1).map(|row| years[row]))
            .map(|year| year.to_string())
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(&main)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5..12.5, -0.5..rows as f64 - 0.5)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(13)
        .y_labels(rows + 1)
        .x_label_formatter(&|x| {
            integer_tick(*x)
                .map(|m| month_abbrev(m as u32).to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&year_for_tick)
        .x_desc("month")
        .y_desc("year")
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let cells: Vec<(f64, f64, f64)> = grid
        .cells
        .iter()
        .enumerate()
        .flat_map(|(row, months)| {
            let y = (rows - 1 - row) as f64;
            months
                .iter()
                .enumerate()
                .filter_map(move |(m, v)| v.map(|v| ((m + 1) as f64, y, v)))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        Rectangle::new(
            [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
            coolwarm(normalize(v, lo, hi)).filled(),
        )
    }))?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        let t = normalize(v, lo, hi);
        let ink = if (0.2..=0.8).contains(&t) { BLACK } else { WHITE };
        Text::new(
            format!("{:.1}", v),
            (x, y),
            (FONT, 12).into_font().color(&ink).pos(centered),
        )
    }))?;

    let mut colorbar = ChartBuilder::on(&bar)
        .margin_top(10)
        .margin_bottom(50)
        .margin_right(10)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, lo..bar_top)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_label_formatter(&|v| format!("{:.0}", v))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    colorbar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let from = lo + step * i as f64;
        Rectangle::new(
            [(0.0, from), (1.0, from + step)],
            coolwarm(i as f64 / (COLORBAR_STEPS - 1) as f64).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(0.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.5), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
    }

    #[test]
    fn test_coolwarm_clamps() {
        assert_eq!(coolwarm(-3.0), coolwarm(0.0));
        assert_eq!(coolwarm(7.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), coolwarm(0.5));
    }

    #[test]
    fn test_normalize_constant_range() {
        assert_eq!(normalize(4.0, 4.0, 4.0), 0.5);
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
    }
}
