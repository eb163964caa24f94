use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-report")]
#[command(about = "Exploratory charts and summary tables for hourly weather history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every chart and export the summary tables (default)
    Report(ReportArgs),

    /// Load and clean the dataset, then print its statistics
    Summary {
        #[arg(short, long, help = "Input CSV file [default: weatherHistory.csv]")]
        input: Option<PathBuf>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ReportArgs {
    #[arg(short, long, help = "Input CSV file [default: weatherHistory.csv]")]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Directory for charts and CSVs [default: .]")]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Seed for row sampling")]
    pub seed: Option<u64>,

    #[arg(short, long, help = "Hide the progress bar")]
    pub quiet: bool,
}
