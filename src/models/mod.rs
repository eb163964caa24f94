pub mod aggregate;
pub mod column;
pub mod frame;

pub use aggregate::{decimal_year, month_end, AggregateTable, Period, SeriesColumn};
pub use column::{Column, ColumnData};
pub use frame::{Frame, WeatherTable};
