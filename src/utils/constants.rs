/// Column names in weatherHistory.csv
pub const DATE_COLUMN: &str = "Formatted Date";
pub const TEMPERATURE_COLUMN: &str = "Temperature (C)";
pub const APPARENT_TEMPERATURE_COLUMN: &str = "Apparent Temperature (C)";
pub const HUMIDITY_COLUMN: &str = "Humidity";
pub const WIND_SPEED_COLUMN: &str = "Wind Speed (km/h)";
pub const PRESSURE_COLUMN: &str = "Pressure (millibars)";
pub const PRECIP_TYPE_COLUMN: &str = "Precip Type";
pub const LOUD_COVER_COLUMN: &str = "Loud Cover";

/// Columns shown in the pair plot, in grid order
pub const PAIR_COLUMNS: [&str; 5] = [
    TEMPERATURE_COLUMN,
    APPARENT_TEMPERATURE_COLUMN,
    HUMIDITY_COLUMN,
    WIND_SPEED_COLUMN,
    PRESSURE_COLUMN,
];

/// Cells read as missing, matching the default null markers of common
/// dataframe CSV readers
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Derived calendar month column in the describe table
pub const MONTH_COLUMN: &str = "month";

/// Placeholder for missing precipitation types
pub const UNKNOWN_PRECIP: &str = "unknown";

/// File names
pub const DEFAULT_INPUT_FILE: &str = "weatherHistory.csv";
pub const MONTHLY_AVG_FILE: &str = "monthly_avg.csv";
pub const DESCRIBE_FILE: &str = "describe.csv";

/// Processing defaults
pub const DEFAULT_ROLLING_WINDOW: usize = 30;
pub const DEFAULT_SCATTER_SAMPLE: usize = 5000;
pub const DEFAULT_PAIR_SAMPLE: usize = 1000;
pub const DEFAULT_SEASONAL_PERIOD: usize = 12;
pub const DEFAULT_KDE_POINTS: usize = 200;

/// KDE grid extends this many bandwidths past the data range
pub const KDE_CUT: f64 = 3.0;

/// Box plot whisker reach, in interquartile ranges
pub const WHISKER_IQR: f64 = 1.5;

/// Two-sided normal quantiles for 95% and 99% confidence
pub const Z_95: f64 = 1.959_963_984_540_054;
pub const Z_99: f64 = 2.575_829_303_548_900_4;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHER_REPORT";
