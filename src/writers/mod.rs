pub mod csv_writer;

pub use csv_writer::{format_float, CsvReportWriter};
