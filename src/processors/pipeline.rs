use crate::error::Result;
use crate::processors::{
    DatetimeNormalizer, DatetimeParseCounts, GlobalInterpolator, Merger, StationPartitioner,
    StationReport, ValueSanitizer,
};
use crate::readers::{LocationReader, MeasurementReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::ArtifactWriter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a cleaning run reads from and writes to. `stations_dir` of `None`
/// stops the run after the final merged artifact.
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    pub measurements: PathBuf,
    pub locations: PathBuf,
    pub pre_interpolation: PathBuf,
    pub cleaned: PathBuf,
    pub stations_dir: Option<PathBuf>,
}

/// Aggregate observability for one run. Cell-level parse and sanitization
/// issues surface here as counts; they never abort the run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub measurement_rows: usize,
    pub station_rows: usize,
    pub merged_rows: usize,
    pub unmatched_rows: usize,
    pub datetime_parse_failures: DatetimeParseCounts,
    pub negatives_replaced: BTreeMap<String, usize>,
    pub cells_interpolated: usize,
    pub stations_written: usize,
    pub stations_skipped: usize,
}

impl RunReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Cleaning Run Report ===\n");
        summary.push_str(&format!("Measurement rows: {}\n", self.measurement_rows));
        summary.push_str(&format!("Station metadata rows: {}\n", self.station_rows));
        summary.push_str(&format!(
            "Merged rows: {} ({} without station match)\n",
            self.merged_rows, self.unmatched_rows
        ));
        summary.push_str(&format!(
            "Timestamp parse failures: {}\n",
            self.datetime_parse_failures.total()
        ));

        let replaced: usize = self.negatives_replaced.values().sum();
        summary.push_str(&format!("Negative values replaced: {}\n", replaced));
        for (column, count) in &self.negatives_replaced {
            if *count > 0 {
                summary.push_str(&format!("  {}: {}\n", column, count));
            }
        }

        summary.push_str(&format!(
            "Cells filled by interpolation: {}\n",
            self.cells_interpolated
        ));
        summary.push_str(&format!(
            "Station files written: {} ({} partitions skipped)\n",
            self.stations_written, self.stations_skipped
        ));

        summary
    }
}

/// Runs the full batch transform: read, merge, normalize datetimes,
/// sanitize, checkpoint, interpolate, write the final artifact, then split
/// into per-station daily series.
pub struct CleaningPipeline {
    max_workers: usize,
}

impl CleaningPipeline {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    pub fn run(
        &self,
        paths: &PipelinePaths,
        progress: Option<&ProgressReporter>,
    ) -> Result<RunReport> {
        if let Some(p) = progress {
            p.set_message("Reading input tables...");
        }

        let measurements = MeasurementReader::new().read_measurements(&paths.measurements)?;
        let stations = LocationReader::new().read_stations_map(&paths.locations)?;
        info!(
            measurements = measurements.len(),
            stations = stations.len(),
            "inputs loaded"
        );

        if let Some(p) = progress {
            p.set_message("Merging measurements with station metadata...");
        }
        let mut merged = Merger::new().merge(&measurements, &stations);
        let unmatched = measurements
            .iter()
            .filter(|m| !m.sensor_id.is_some_and(|id| stations.contains_key(&id)))
            .count();
        if unmatched > 0 {
            tracing::warn!(unmatched, "measurement rows without a station match");
        }

        if let Some(p) = progress {
            p.set_message("Normalizing coverage datetimes...");
        }
        let datetime_failures = DatetimeNormalizer::new().normalize(&mut merged);

        if let Some(p) = progress {
            p.set_message("Sanitizing negative observations...");
        }
        let sanitize_report = ValueSanitizer::new().sanitize(&mut merged);

        let writer = ArtifactWriter::new();
        if let Some(p) = progress {
            p.set_message("Writing pre-interpolation checkpoint...");
        }
        writer.write_merged(&merged, &paths.pre_interpolation)?;
        info!(path = %paths.pre_interpolation.display(), "checkpoint written");

        if let Some(p) = progress {
            p.set_message("Interpolating missing values...");
        }
        let cells_interpolated = GlobalInterpolator::new().interpolate(&mut merged);

        if let Some(p) = progress {
            p.set_message("Writing cleaned artifact...");
        }
        writer.write_merged(&merged, &paths.cleaned)?;
        info!(path = %paths.cleaned.display(), "cleaned artifact written");

        let station_report = match &paths.stations_dir {
            Some(dir) => self.split_stations(&merged, dir, progress)?,
            None => StationReport {
                written: 0,
                skipped: 0,
                stations: Vec::new(),
            },
        };

        Ok(RunReport {
            measurement_rows: measurements.len(),
            station_rows: stations.len(),
            merged_rows: merged.len(),
            unmatched_rows: unmatched,
            datetime_parse_failures: datetime_failures,
            negatives_replaced: sanitize_report.replaced,
            cells_interpolated,
            stations_written: station_report.written,
            stations_skipped: station_report.skipped,
        })
    }

    /// Per-station split of an already-cleaned table.
    pub fn split_stations(
        &self,
        records: &[crate::models::MergedRecord],
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationReport> {
        std::fs::create_dir_all(output_dir).map_err(|source| {
            crate::error::ProcessingError::FileWrite {
                path: output_dir.to_path_buf(),
                source,
            }
        })?;

        let partitioner = StationPartitioner::new(self.max_workers);
        let report = partitioner.process_stations(records, output_dir, progress)?;
        info!(
            written = report.written,
            skipped = report.skipped,
            "station split complete"
        );
        Ok(report)
    }

    /// Standalone split of an existing cleaned artifact file, the second
    /// entry point next to the full cleaning run.
    pub fn split_stations_from_file(
        &self,
        input: &Path,
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationReport> {
        let records = ArtifactWriter::new().read_merged(input)?;
        info!(rows = records.len(), path = %input.display(), "cleaned artifact loaded");
        self.split_stations(&records, output_dir, progress)
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
