use chrono::NaiveDate;
use openaq_processor::models::DailyRecord;
use openaq_processor::processors::{CleaningPipeline, PipelinePaths};
use openaq_processor::writers::ArtifactWriter;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::TempDir;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn read_station_file(path: &std::path::Path) -> Vec<DailyRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .deserialize::<DailyRecord>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_end_to_end_cleaning_run() {
    let dir = TempDir::new().unwrap();

    // Sensor 1 maps to station "Delhi": a negative value, a blank, and a
    // valid observation on local dates Jan 1, Jan 2 and Jan 4.
    let measurements_path = dir.path().join("openaq_combined_data.csv");
    let mut f = std::fs::File::create(&measurements_path).unwrap();
    writeln!(
        f,
        "sensor_id,value,summary.avg,coverage.datetimeFrom.local,coverage.datetimeFrom.utc,parameter.name,parameter.units"
    )
    .unwrap();
    writeln!(
        f,
        "1,-5,10,2024-01-01T00:00:00+05:30,2023-12-31T18:30:00Z,pm25,µg/m³"
    )
    .unwrap();
    writeln!(
        f,
        "1,,,2024-01-02T00:00:00+05:30,2024-01-01T18:30:00Z,pm25,µg/m³"
    )
    .unwrap();
    writeln!(
        f,
        "1,50,40,2024-01-04T00:00:00+05:30,2024-01-03T18:30:00Z,pm25,µg/m³"
    )
    .unwrap();
    drop(f);

    let locations_path = dir.path().join("locations.csv");
    let mut f = std::fs::File::create(&locations_path).unwrap();
    writeln!(f, ",s_id,id,name,locality,provider.id,provider.name").unwrap();
    writeln!(f, "0,1,100,Delhi,Delhi NCR,3,AirNow").unwrap();
    drop(f);

    let paths = PipelinePaths {
        measurements: measurements_path,
        locations: locations_path,
        pre_interpolation: dir.path().join("cleaned_not_interpolated.csv"),
        cleaned: dir.path().join("cleaned.csv"),
        stations_dir: Some(dir.path().join("stations")),
    };

    let report = CleaningPipeline::new(2).run(&paths, None).unwrap();

    assert_eq!(report.measurement_rows, 3);
    assert_eq!(report.merged_rows, 3);
    assert_eq!(report.unmatched_rows, 0);
    assert_eq!(report.negatives_replaced["value"], 1);
    assert_eq!(report.stations_written, 1);
    assert_eq!(report.stations_skipped, 0);

    let writer = ArtifactWriter::new();

    // Pre-interpolation checkpoint: sanitized but still gappy.
    let pre = writer.read_merged(&paths.pre_interpolation).unwrap();
    assert_eq!(pre.len(), 3);
    assert_eq!(pre[0].value, None); // -5 sanitized away
    assert_eq!(pre[0].from_local_date, Some(date(1)));
    assert_eq!(pre[0].station_name.as_deref(), Some("Delhi"));
    assert_eq!(pre[0].parameter, "pm25 µg/m³");
    assert_eq!(pre[1].value, None);

    // Final artifact: summary.avg Jan 2 is time-weighted between Jan 1's 10
    // and Jan 4's 40; the value column has no valid point before Jan 4, so
    // its leading gaps stay missing.
    let cleaned = writer.read_merged(&paths.cleaned).unwrap();
    assert_eq!(cleaned.len(), 3);
    assert_eq!(cleaned[0].summary_avg, Some(10.0));
    assert_eq!(cleaned[1].summary_avg, Some(20.0));
    assert_eq!(cleaned[2].summary_avg, Some(40.0));
    assert_eq!(cleaned[0].value, None);
    assert_eq!(cleaned[1].value, None);
    assert_eq!(cleaned[2].value, Some(50.0));

    // Per-station artifact: dense Jan 1..Jan 4 calendar, one row per day.
    let rows = read_station_file(&dir.path().join("stations").join("Delhi.csv"));
    assert_eq!(rows.len(), 4);
    for (offset, row) in rows.iter().enumerate() {
        assert_eq!(row.date, date(1 + offset as u32));
    }
    assert_eq!(rows[0].value, None);
    assert_eq!(rows[1].value, None);
    assert_eq!(rows[2].value, None);
    assert_eq!(rows[3].value, Some(50.0));
    // The densified Jan 3 fills between Jan 2 and Jan 4 for summary.avg.
    assert_eq!(rows[2].summary_avg, Some(30.0));
}

#[test]
fn test_standalone_station_split() {
    let dir = TempDir::new().unwrap();

    // A cleaned artifact with same-day duplicates and a station name that
    // needs sanitizing, plus a row with no station name.
    let cleaned = dir.path().join("cleaned.csv");
    let mut f = std::fs::File::create(&cleaned).unwrap();
    writeln!(f, "value,sensor_id,from_local_date,name").unwrap();
    writeln!(f, "20,1,2024-01-01,Agra Fort").unwrap();
    writeln!(f, "40,1,2024-01-01,Agra Fort").unwrap();
    writeln!(f, "60,1,2024-01-03,Agra Fort").unwrap();
    writeln!(f, "99,2,2024-01-01,").unwrap();
    drop(f);

    let stations_dir = dir.path().join("stations");
    let report = CleaningPipeline::new(1)
        .split_stations_from_file(&cleaned, &stations_dir, None)
        .unwrap();

    assert_eq!(report.written, 1);
    assert_eq!(report.stations, vec!["Agra Fort".to_string()]);

    let rows = read_station_file(&stations_dir.join("Agra_Fort.csv"));
    assert_eq!(rows.len(), 3);
    // Duplicates averaged before interpolation: (20 + 40) / 2 = 30.
    assert_eq!(rows[0].value, Some(30.0));
    // Jan 2 introduced by densification, filled between 30 and 60.
    assert_eq!(rows[1].value, Some(45.0));
    assert_eq!(rows[2].value, Some(60.0));
}

#[test]
fn test_missing_join_key_aborts_run() {
    let dir = TempDir::new().unwrap();

    let measurements_path = dir.path().join("measurements.csv");
    std::fs::write(&measurements_path, "value,summary.avg\n1,2\n").unwrap();
    let locations_path = dir.path().join("locations.csv");
    std::fs::write(&locations_path, "s_id,name\n1,Delhi\n").unwrap();

    let paths = PipelinePaths {
        measurements: measurements_path,
        locations: locations_path,
        pre_interpolation: dir.path().join("pre.csv"),
        cleaned: dir.path().join("cleaned.csv"),
        stations_dir: None,
    };

    let err = CleaningPipeline::new(1).run(&paths, None).unwrap_err();
    assert!(err.to_string().contains("sensor_id"));
}
