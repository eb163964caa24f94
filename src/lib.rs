pub mod analyzers;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod report;
pub mod utils;
pub mod writers;

pub use config::ReportConfig;
pub use error::{ProcessingError, Result};
pub use report::{PreparedData, ReportGenerator, ReportOutputs};
