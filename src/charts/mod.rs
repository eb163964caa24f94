//! PNG chart rendering.
//!
//! Each chart module pairs pure data preparation, testable without a drawing
//! backend, with a `draw_*` function that renders the prepared data onto a
//! bitmap and presents it before returning.

pub mod categorical;
pub mod distribution;
pub mod heatmap;
pub mod relationship;
pub mod time_series;

use plotters::style::RGBColor;
use std::ops::Range;

/// Error type of the drawing functions; converted to `ProcessingError::Chart`
/// by the report generator.
pub type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const TITLE_SIZE: u32 = 26;
pub(crate) const LABEL_SIZE: u32 = 15;

/// Seaborn "deep" palette.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

pub fn palette(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    MonthlyAverage,
    RollingMean,
    MonthlyBoxplot,
    YearMonthHeatmap,
    TemperatureHumidity,
    PairGrid,
    Density,
    PrecipitationTypes,
    Autocorrelation,
    SeasonalDecomposition,
}

impl ChartKind {
    pub const ALL: [ChartKind; 10] = [
        ChartKind::MonthlyAverage,
        ChartKind::RollingMean,
        ChartKind::MonthlyBoxplot,
        ChartKind::YearMonthHeatmap,
        ChartKind::TemperatureHumidity,
        ChartKind::PairGrid,
        ChartKind::Density,
        ChartKind::PrecipitationTypes,
        ChartKind::Autocorrelation,
        ChartKind::SeasonalDecomposition,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::MonthlyAverage => "viz_monthly_avg_temp.png",
            ChartKind::RollingMean => "viz_temp_rolling_mean.png",
            ChartKind::MonthlyBoxplot => "viz_temp_boxplot.png",
            ChartKind::YearMonthHeatmap => "viz_temp_heatmap.png",
            ChartKind::TemperatureHumidity => "viz_temp_vs_humidity.png",
            ChartKind::PairGrid => "viz_pairplot.png",
            ChartKind::Density => "viz_kde.png",
            ChartKind::PrecipitationTypes => "viz_precip_types.png",
            ChartKind::Autocorrelation => "viz_autocorr.png",
            ChartKind::SeasonalDecomposition => "viz_seasonal.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::MonthlyAverage => "Monthly Avg Temperature",
            ChartKind::RollingMean => "Temperature Rolling Mean",
            ChartKind::MonthlyBoxplot => "Monthly Temperature Distribution",
            ChartKind::YearMonthHeatmap => "Monthly Temperature Heatmap",
            ChartKind::TemperatureHumidity => "Temperature vs Humidity",
            ChartKind::PairGrid => "Pairwise Relationships",
            ChartKind::Density => "KDE Distributions",
            ChartKind::PrecipitationTypes => "Yearly Precipitation Types",
            ChartKind::Autocorrelation => "Autocorrelation: Monthly Avg Temp",
            ChartKind::SeasonalDecomposition => "Seasonal Decomposition",
        }
    }

    /// Bitmap size in pixels.
    pub fn size(&self) -> (u32, u32) {
        match self {
            ChartKind::MonthlyAverage | ChartKind::RollingMean => (1200, 500),
            ChartKind::MonthlyBoxplot
            | ChartKind::YearMonthHeatmap
            | ChartKind::PrecipitationTypes => (1200, 600),
            ChartKind::TemperatureHumidity | ChartKind::Density => (1000, 600),
            ChartKind::Autocorrelation => (1000, 500),
            ChartKind::PairGrid => (1250, 1250),
            ChartKind::SeasonalDecomposition => (1000, 800),
        }
    }
}

/// Axis range covering `values` with 5% padding on each side.
/// Falls back to `0..1` for no values and widens a zero-width range.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Label for integer tick positions; blank for anything in between.
pub(crate) fn integer_tick(value: f64) -> Option<i64> {
    let rounded = value.round();
    ((value - rounded).abs() < 1e-6).then_some(rounded as i64)
}

pub(crate) fn month_abbrev(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}
