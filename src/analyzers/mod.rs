pub mod decomposition;
pub mod density;
pub mod distribution;
pub mod grouping;
pub mod regression;
pub mod sampling;
pub mod time_series;
pub mod weather_analyzer;

pub use decomposition::{decompose_additive, SeasonalDecomposition};
pub use density::GaussianKde;
pub use distribution::BoxStats;
pub use grouping::{
    category_counts_by_year, values_by_month, year_month_grid, CategoryCounts, YearMonthGrid,
};
pub use regression::LinearFit;
pub use sampling::RowSampler;
pub use time_series::{autocorrelation, rolling_mean, ConfidenceBands};
pub use weather_analyzer::{
    ColumnStats, DatasetOverview, DescribeTable, WeatherAnalyzer, DESCRIBE_ROWS,
};
