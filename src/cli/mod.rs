pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ReportArgs};
pub use commands::run;
