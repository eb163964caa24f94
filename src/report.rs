//! End-to-end report: load, clean, resample, render every chart, export
//! the summary tables.

use crate::analyzers::{category_counts_by_year, year_month_grid, DescribeTable, RowSampler, WeatherAnalyzer};
use crate::charts::{categorical, distribution, heatmap, relationship, time_series, ChartKind};
use crate::config::ReportConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{AggregateTable, WeatherTable};
use crate::processors::{Cleaner, CleaningReport, Resampler};
use crate::readers::CsvLoader;
use crate::utils::constants::{
    DESCRIBE_FILE, HUMIDITY_COLUMN, MONTHLY_AVG_FILE, PAIR_COLUMNS, PRECIP_TYPE_COLUMN,
    TEMPERATURE_COLUMN,
};
use crate::utils::ProgressReporter;
use crate::writers::CsvReportWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Cleaned table and its aggregates, shared by every chart and export.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub table: WeatherTable,
    pub cleaning: CleaningReport,
    pub monthly: AggregateTable,
    pub daily: AggregateTable,
}

/// Paths written by a completed run.
#[derive(Debug, Clone, Default)]
pub struct ReportOutputs {
    pub charts: Vec<PathBuf>,
    pub monthly_avg: PathBuf,
    pub describe: PathBuf,
}

impl ReportOutputs {
    pub fn file_count(&self) -> usize {
        self.charts.len() + 2
    }
}

pub struct ReportGenerator {
    config: ReportConfig,
    loader: CsvLoader,
    cleaner: Cleaner,
    resampler: Resampler,
    analyzer: WeatherAnalyzer,
    writer: CsvReportWriter,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            loader: CsvLoader::new(),
            cleaner: Cleaner::new(),
            resampler: Resampler::new(),
            analyzer: WeatherAnalyzer::new(),
            writer: CsvReportWriter::new(),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load and clean the input. Prints the raw shape unless `silent`.
    pub fn load_and_clean(&self, silent: bool) -> Result<(WeatherTable, CleaningReport)> {
        let frame = self.loader.load(&self.config.input)?;
        if !silent {
            println!(
                "Dataset loaded with {} rows and {} columns.",
                frame.row_count(),
                frame.column_count()
            );
        }
        self.cleaner.clean(frame)
    }

    pub fn prepare(&self, silent: bool) -> Result<PreparedData> {
        let (table, cleaning) = self.load_and_clean(silent)?;
        let monthly = self.resampler.monthly(&table);
        let daily = self.resampler.daily(&table);
        tracing::info!(
            monthly = monthly.len(),
            daily = daily.len(),
            "resampled cleaned table"
        );

        Ok(PreparedData {
            table,
            cleaning,
            monthly,
            daily,
        })
    }

    pub fn describe(&self, data: &PreparedData) -> DescribeTable {
        self.analyzer.describe(&data.table)
    }

    /// Render all charts in order, stopping at the first failure.
    pub fn render_charts(&self, data: &PreparedData, silent: bool) -> Result<Vec<PathBuf>> {
        let mut sampler = RowSampler::new(self.config.seed);
        let progress = ProgressReporter::new(
            ChartKind::ALL.len() as u64,
            "Rendering charts",
            silent,
        );

        let mut written = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            progress.set_message(kind.file_name());
            let start = Instant::now();
            let path = self.render_chart(kind, data, &mut sampler)?;
            tracing::debug!(
                chart = kind.file_name(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "rendered chart"
            );
            written.push(path);
            progress.increment(1);
        }

        progress.finish_with_message("Charts rendered");
        Ok(written)
    }

    /// Prepare the data for one chart and draw it into the output directory.
    pub fn render_chart(
        &self,
        kind: ChartKind,
        data: &PreparedData,
        sampler: &mut RowSampler,
    ) -> Result<PathBuf> {
        let path = self.config.output_path(kind.file_name());
        let drawn = match kind {
            ChartKind::MonthlyAverage => {
                let points = time_series::year_points(&data.monthly, TEMPERATURE_COLUMN)?;
                time_series::draw_monthly_average(&points, &path)
            }
            ChartKind::RollingMean => {
                let series = time_series::rolling_series(
                    &data.daily,
                    TEMPERATURE_COLUMN,
                    self.config.rolling_window,
                )?;
                time_series::draw_rolling_mean(&series, &path)
            }
            ChartKind::MonthlyBoxplot => {
                let boxes = distribution::monthly_boxes(&data.table, TEMPERATURE_COLUMN)?;
                distribution::draw_boxplot(&boxes, TEMPERATURE_COLUMN, &path)
            }
            ChartKind::YearMonthHeatmap => {
                let grid = year_month_grid(&data.monthly, TEMPERATURE_COLUMN)?;
                heatmap::draw_heatmap(&grid, &path)
            }
            ChartKind::TemperatureHumidity => {
                let scatter = relationship::scatter_trend(
                    &data.table,
                    TEMPERATURE_COLUMN,
                    HUMIDITY_COLUMN,
                    sampler,
                    self.config.scatter_sample,
                )?;
                relationship::draw_scatter_trend(&scatter, &path)
            }
            ChartKind::PairGrid => {
                let grid = relationship::pair_grid(
                    &data.table,
                    &PAIR_COLUMNS,
                    sampler,
                    self.config.pair_sample,
                )?;
                relationship::draw_pair_grid(&grid, &path)
            }
            ChartKind::Density => {
                let curves = distribution::density_curves(
                    &data.table,
                    &[(TEMPERATURE_COLUMN, "Temp"), (HUMIDITY_COLUMN, "Humidity")],
                    self.config.kde_points,
                )?;
                distribution::draw_density(&curves, &path)
            }
            ChartKind::PrecipitationTypes => {
                let counts = category_counts_by_year(&data.table, PRECIP_TYPE_COLUMN)?;
                categorical::draw_stacked_bars(&counts, &path)
            }
            ChartKind::Autocorrelation => {
                let series = time_series::autocorrelation_series(&data.monthly, TEMPERATURE_COLUMN)?;
                time_series::draw_autocorrelation(&series, &path)
            }
            ChartKind::SeasonalDecomposition => {
                let (xs, decomposition) = time_series::seasonal_components(
                    &data.monthly,
                    TEMPERATURE_COLUMN,
                    self.config.seasonal_period,
                )?;
                time_series::draw_seasonal(&xs, &decomposition, &path)
            }
        };

        drawn.map_err(|e| ProcessingError::chart(kind.file_name(), e))?;
        Ok(path)
    }

    /// Write `monthly_avg.csv` and `describe.csv`.
    pub fn export_tables(&self, data: &PreparedData) -> Result<(PathBuf, PathBuf)> {
        let monthly_path = self.config.output_path(MONTHLY_AVG_FILE);
        self.writer.write_aggregate(&data.monthly, &monthly_path)?;

        let describe_path = self.config.output_path(DESCRIBE_FILE);
        self.writer
            .write_describe(&self.describe(data), &describe_path)?;

        Ok((monthly_path, describe_path))
    }

    /// Full pipeline. Outputs written before a failure stay on disk.
    pub fn run(&self, silent: bool) -> Result<ReportOutputs> {
        ensure_dir(&self.config.output_dir)?;

        let data = self.prepare(silent)?;
        if data.table.is_empty() {
            return Err(ProcessingError::InsufficientData(
                "no rows left after cleaning".to_string(),
            ));
        }

        if !silent {
            println!("Generating visualizations...");
        }
        let charts = self.render_charts(&data, silent)?;
        let (monthly_avg, describe) = self.export_tables(&data)?;

        if !silent {
            println!("✅ Analysis complete. Visualizations & CSVs saved in folder.");
        }
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            charts = charts.len(),
            "report complete"
        );

        Ok(ReportOutputs {
            charts,
            monthly_avg,
            describe,
        })
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
        tracing::info!(dir = %dir.display(), "created output directory");
    }
    Ok(())
}
