use crate::analyzers::{DatasetOverview, WeatherAnalyzer};
use crate::cli::args::{Cli, Commands, ReportArgs};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::processors::CleaningReport;
use crate::report::ReportGenerator;
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use std::path::PathBuf;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => run_report(ReportArgs::default()),
        Some(Commands::Report(args)) => run_report(args),
        Some(Commands::Summary { input, json }) => run_summary(input, json),
    }
}

fn run_report(args: ReportArgs) -> Result<()> {
    let config = ReportConfig::load(args.config.as_deref())?
        .with_input(args.input)
        .with_output_dir(args.output_dir)
        .with_seed(args.seed);
    config.check()?;

    let generator = ReportGenerator::new(config);
    let outputs = generator.run(args.quiet)?;
    tracing::info!(files = outputs.file_count(), "outputs written");
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    cleaning: &'a CleaningReport,
    overview: &'a DatasetOverview,
}

/// Pretty-printed JSON document printed by `summary --json`.
pub fn summary_json(cleaning: &CleaningReport, overview: &DatasetOverview) -> Result<String> {
    let output = SummaryOutput { cleaning, overview };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn run_summary(input: Option<PathBuf>, json: bool) -> Result<()> {
    let config = ReportConfig::load(None)?.with_input(input);
    config.check()?;
    let generator = ReportGenerator::new(config);

    let progress = ProgressReporter::new_spinner("Loading dataset...", json);
    let (table, cleaning) = generator.load_and_clean(json)?;
    progress.finish_with_message(&format!("Cleaned {} rows", table.len()));

    let overview = WeatherAnalyzer::new().overview(&table);

    if json {
        println!("{}", summary_json(&cleaning, &overview)?);
        return Ok(());
    }

    println!("\n{}", cleaning.summary());
    println!("\n{}", overview.detailed_summary());

    if cleaning.unparseable_timestamps == 0 {
        println!("\n✅ All timestamps parsed");
    } else {
        println!(
            "\n⚠️  Dropped {} rows with unparseable timestamps",
            cleaning.unparseable_timestamps
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "Formatted Date,Summary,Precip Type,Temperature (C),Apparent Temperature (C),Humidity,Wind Speed (km/h),Pressure (millibars),Loud Cover
2020-01-01 00:00:00.000 +0000,Clear,rain,1.0,0.5,0.5,3.0,1010.0,0
2020-01-02 00:00:00.000 +0000,Clear,,3.0,2.5,0.7,5.0,1012.0,0
garbage,Clear,snow,9.0,9.0,0.9,1.0,1000.0,0
";

    fn write_sample(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("weatherHistory.csv");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_summary_json_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = ReportConfig::default().with_input(Some(write_sample(&temp_dir)));
        let generator = ReportGenerator::new(config);

        let (table, cleaning) = generator.load_and_clean(true).unwrap();
        let overview = WeatherAnalyzer::new().overview(&table);
        let text = summary_json(&cleaning, &overview).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["cleaning"]["unparseable_timestamps"], 1);
        assert_eq!(value["overview"]["total_records"], 2);
        assert!(value["overview"]["describe"]["columns"].is_array());
    }

    #[test]
    fn test_summary_json_command_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_sample(&temp_dir);
        let cli = Cli::try_parse_from([
            "weather-report",
            "summary",
            "--input",
            input.to_str().unwrap(),
            "--json",
        ])
        .unwrap();

        assert!(run(cli).is_ok());
    }
}
