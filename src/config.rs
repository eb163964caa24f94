use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_INPUT_FILE, DEFAULT_KDE_POINTS, DEFAULT_PAIR_SAMPLE, DEFAULT_ROLLING_WINDOW,
    DEFAULT_SCATTER_SAMPLE, DEFAULT_SEASONAL_PERIOD, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Report parameters. Layered as defaults, optional config file,
/// `WEATHER_REPORT_*` environment variables, then CLI overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReportConfig {
    pub input: PathBuf,

    pub output_dir: PathBuf,

    #[validate(range(min = 1))]
    pub rolling_window: usize,

    #[validate(range(min = 1))]
    pub scatter_sample: usize,

    #[validate(range(min = 1))]
    pub pair_sample: usize,

    #[validate(range(min = 2))]
    pub seasonal_period: usize,

    #[validate(range(min = 2))]
    pub kde_points: usize,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            rolling_window: DEFAULT_ROLLING_WINDOW,
            scatter_sample: DEFAULT_SCATTER_SAMPLE,
            pair_sample: DEFAULT_PAIR_SAMPLE,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            kde_points: DEFAULT_KDE_POINTS,
            seed: None,
        }
    }
}

impl ReportConfig {
    /// Load layered settings. A missing `file` is an error; no file means
    /// defaults and environment only.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("input", DEFAULT_INPUT_FILE)?
            .set_default("output_dir", ".")?
            .set_default("rolling_window", defaults.rolling_window as i64)?
            .set_default("scatter_sample", defaults.scatter_sample as i64)?
            .set_default("pair_sample", defaults.pair_sample as i64)?
            .set_default("seasonal_period", defaults.seasonal_period as i64)?
            .set_default("kde_points", defaults.kde_points as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ReportConfig = settings.try_deserialize()?;
        config.check()?;
        tracing::debug!(?config, "loaded report configuration");
        Ok(config)
    }

    /// Range checks plus path sanity.
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.input.as_os_str().is_empty() {
            return Err(ProcessingError::Config("input path is empty".to_string()));
        }
        Ok(())
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        assert!(ReportConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let config = ReportConfig {
            rolling_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let config = ReportConfig::default().with_input(Some(PathBuf::new()));
        assert!(matches!(config.check(), Err(ProcessingError::Config(_))));
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "rolling_window = 7")?;
        writeln!(file, "seed = 11")?;
        writeln!(file, "output_dir = \"reports\"")?;

        let config = ReportConfig::load(Some(file.path()))?;

        assert_eq!(config.rolling_window, 7);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.scatter_sample, DEFAULT_SCATTER_SAMPLE);
        Ok(())
    }

    #[test]
    fn test_cli_overrides() {
        let config = ReportConfig::default()
            .with_input(Some(PathBuf::from("other.csv")))
            .with_output_dir(None)
            .with_seed(Some(3));

        assert_eq!(config.input, PathBuf::from("other.csv"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.seed, Some(3));
    }
}
