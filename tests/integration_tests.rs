use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use weather_report::analyzers::WeatherAnalyzer;
use weather_report::charts::ChartKind;
use weather_report::processors::{Cleaner, Resampler};
use weather_report::readers::CsvLoader;
use weather_report::utils::constants::{PRECIP_TYPE_COLUMN, TEMPERATURE_COLUMN};
use weather_report::{ReportConfig, ReportGenerator};

const HEADER: &str = "Formatted Date,Summary,Precip Type,Temperature (C),Apparent Temperature (C),Humidity,Wind Speed (km/h),Pressure (millibars),Loud Cover";

fn write_input(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("weatherHistory.csv");
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    fs::write(&path, text).expect("Failed to write input");
    path
}

fn generator(input: PathBuf, output_dir: PathBuf) -> ReportGenerator {
    let config = ReportConfig::default()
        .with_input(Some(input))
        .with_output_dir(Some(output_dir))
        .with_seed(Some(42));
    ReportGenerator::new(config)
}

#[test]
fn test_three_rows_two_months() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(
        &temp_dir,
        &[
            "2020-01-01 00:00:00.000 +0000,Clear,rain,0.0,0.0,0.5,1.0,1010.0,0",
            "2020-01-02 00:00:00.000 +0000,Clear,rain,10.0,9.0,0.5,1.0,1010.0,0",
            "2020-02-01 00:00:00.000 +0000,Clear,rain,20.0,19.0,0.5,1.0,1010.0,0",
        ],
    );

    let data = generator(input, temp_dir.path().join("out"))
        .prepare(true)
        .unwrap();

    assert_eq!(data.monthly.len(), 2);
    assert_eq!(
        data.monthly.column(TEMPERATURE_COLUMN).unwrap(),
        &[Some(5.0), Some(20.0)]
    );
}

#[test]
fn test_empty_timestamp_row_is_dropped_everywhere() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(
        &temp_dir,
        &[
            "2020-01-01 00:00:00.000 +0000,Clear,rain,1.0,1.0,0.5,1.0,1010.0,0",
            ",Clear,rain,500.0,500.0,0.5,1.0,1010.0,0",
            "2020-01-01 06:00:00.000 +0000,Clear,,3.0,3.0,0.5,1.0,1010.0,0",
        ],
    );

    let data = generator(input, temp_dir.path().join("out"))
        .prepare(true)
        .unwrap();

    assert_eq!(data.table.len(), 2);
    assert_eq!(data.cleaning.rows_before, 3);
    assert_eq!(data.cleaning.unparseable_timestamps, 1);
    assert_eq!(data.daily.column(TEMPERATURE_COLUMN).unwrap(), &[Some(2.0)]);
    assert_eq!(data.monthly.column(TEMPERATURE_COLUMN).unwrap(), &[Some(2.0)]);
    assert_eq!(
        data.table.column(PRECIP_TYPE_COLUMN).unwrap().null_count(),
        0
    );
    assert!(!data.table.has_column("Loud Cover"));
}

#[test]
fn test_cleaned_rows_sorted_and_months_bounded() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(
        &temp_dir,
        &[
            "2020-03-05 00:00:00.000 +0000,Clear,rain,5.0,5.0,0.5,1.0,1010.0,0",
            "2020-01-05 00:00:00.000 +0000,Clear,snow,-3.0,-6.0,0.9,4.0,1020.0,0",
            "garbage,Clear,rain,5.0,5.0,0.5,1.0,1010.0,0",
            "2020-03-01 00:00:00.000 +0000,Clear,rain,4.0,4.0,0.6,2.0,1012.0,0",
        ],
    );

    let frame = CsvLoader::new().load(&input).unwrap();
    let rows_before = frame.row_count();
    let (table, _) = Cleaner::new().clean(frame).unwrap();
    let monthly = Resampler::new().monthly(&table);

    assert!(table.len() <= rows_before);
    assert!(table.timestamps().windows(2).all(|w| w[0] <= w[1]));
    // January to March spans three months; February has no rows.
    assert_eq!(monthly.len(), 2);
}

#[test]
fn test_exports_are_byte_identical_across_runs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let rows: Vec<String> = (0..48)
        .map(|h| {
            format!(
                "2021-06-{:02} {:02}:00:00.000 +0200,Clear,rain,{}.5,{}.0,0.{},3.0,1011.0,0",
                1 + h / 24,
                h % 24,
                h,
                h,
                h % 10
            )
        })
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let input = write_input(&temp_dir, &row_refs);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    let generator = generator(input, out);

    let data = generator.prepare(true).unwrap();
    let (monthly_a, describe_a) = generator.export_tables(&data).unwrap();
    let first = (fs::read(&monthly_a).unwrap(), fs::read(&describe_a).unwrap());

    let data = generator.prepare(true).unwrap();
    let (monthly_b, describe_b) = generator.export_tables(&data).unwrap();
    let second = (fs::read(&monthly_b).unwrap(), fs::read(&describe_b).unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_describe_has_eight_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(
        &temp_dir,
        &[
            "2020-01-01 00:00:00.000 +0000,Clear,rain,1.0,1.0,0.5,1.0,1010.0,0",
            "2020-01-02 00:00:00.000 +0000,Clear,rain,3.0,2.0,0.7,2.0,1012.0,0",
        ],
    );
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    let generator = generator(input, out);

    let data = generator.prepare(true).unwrap();
    let (_, describe_path) = generator.export_tables(&data).unwrap();
    let describe = fs::read_to_string(describe_path).unwrap();
    let lines: Vec<&str> = describe.lines().collect();

    assert_eq!(lines.len(), 9);
    assert_eq!(
        lines[0],
        ",Temperature (C),Apparent Temperature (C),Humidity,Wind Speed (km/h),Pressure (millibars),month"
    );
    let labels: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(labels, vec!["count", "mean", "std", "min", "25%", "50%", "75%", "max"]);
    assert_eq!(lines[2], "mean,2.0,1.5,0.6,1.5,1011.0,1.0");
}

#[test]
fn test_describe_matches_analyzer() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(
        &temp_dir,
        &[
            "2020-01-01 00:00:00.000 +0000,Clear,rain,2.0,1.0,0.5,1.0,1010.0,0",
            "2020-01-02 00:00:00.000 +0000,Clear,rain,4.0,2.0,0.5,2.0,1012.0,0",
            "2020-01-03 00:00:00.000 +0000,Clear,rain,9.0,2.0,0.5,2.0,1012.0,0",
        ],
    );

    let data = generator(input, temp_dir.path().join("out"))
        .prepare(true)
        .unwrap();
    let describe = WeatherAnalyzer::new().describe(&data.table);
    let stats = describe.get(TEMPERATURE_COLUMN).unwrap();

    assert_eq!(stats.count, 3);
    assert_eq!(stats.mean, 5.0);
    assert_eq!(stats.q50, 4.0);
    assert_eq!(stats.q25, 3.0);
}

#[test]
fn test_missing_temperature_column_fails_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("weatherHistory.csv");
    fs::write(
        &input,
        "Formatted Date,Humidity\n2020-01-01 00:00:00.000 +0000,0.5\n",
    )
    .unwrap();

    let result = generator(input, temp_dir.path().join("out")).run(true);

    assert!(result.is_err());
}

#[test]
fn test_null_markers_do_not_poison_monthly_means() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_input(
        &temp_dir,
        &[
            "2020-01-01 00:00:00.000 +0000,Clear,rain,0.0,0.0,0.5,1.0,1010.0,0",
            "2020-01-02 00:00:00.000 +0000,Clear,rain,nan,NA,0.5,1.0,1010.0,0",
            "2020-01-03 00:00:00.000 +0000,Clear,rain,10.0,9.0,0.5,1.0,1010.0,0",
        ],
    );

    let data = generator(input, temp_dir.path().join("out"))
        .prepare(true)
        .unwrap();
    let describe = WeatherAnalyzer::new().describe(&data.table);

    assert_eq!(data.monthly.column(TEMPERATURE_COLUMN).unwrap(), &[Some(5.0)]);
    assert_eq!(describe.get(TEMPERATURE_COLUMN).unwrap().count, 2);
    assert_eq!(describe.get("Apparent Temperature (C)").unwrap().count, 2);
}

#[test]
fn test_full_run_writes_every_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut rows = Vec::new();
    for year in [2019, 2020] {
        for month in 1..=12u32 {
            for day in [1u32, 8, 15, 22] {
                for hour in [0u32, 6, 12, 18] {
                    let seasonal = -10.0 + 2.5 * month as f64 + (day % 5) as f64 * 0.3;
                    let temp = seasonal + hour as f64 * 0.25;
                    let precip = match (day + hour) % 3 {
                        0 => "snow",
                        1 => "",
                        _ => "rain",
                    };
                    rows.push(format!(
                        "{}-{:02}-{:02} {:02}:00:00.000 +0000,Partly Cloudy,{},{:.2},{:.2},{:.2},{:.1},{:.1},0",
                        year,
                        month,
                        day,
                        hour,
                        precip,
                        temp,
                        temp - 1.5,
                        0.4 + (hour as f64) / 40.0 + (month % 4) as f64 * 0.05,
                        5.0 + (day % 7) as f64,
                        1005.0 + month as f64,
                    ));
                }
            }
        }
    }
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let input = write_input(&temp_dir, &row_refs);
    let out = temp_dir.path().join("out");

    let outputs = generator(input, out.clone()).run(true).unwrap();

    assert_eq!(outputs.file_count(), 12);
    for kind in ChartKind::ALL {
        let path = out.join(kind.file_name());
        assert!(outputs.charts.contains(&path), "{} not reported", kind.file_name());
        assert!(fs::metadata(&path).unwrap().len() > 0, "{} is empty", kind.file_name());
    }
    for path in [&outputs.monthly_avg, &outputs.describe] {
        assert!(fs::metadata(path).unwrap().len() > 0);
    }

    let monthly = fs::read_to_string(&outputs.monthly_avg).unwrap();
    assert_eq!(monthly.lines().count(), 25);
    let describe = fs::read_to_string(&outputs.describe).unwrap();
    assert!(describe.lines().next().unwrap().ends_with(",month"));
}
