use crate::error::{ProcessingError, Result};
use crate::models::MeasurementRecord;
use crate::utils::constants::MEASUREMENT_JOIN_KEY;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// Reads the combined measurement table produced by the fetch collaborator.
///
/// The file may carry any number of extra columns; only the modeled ones are
/// picked up. Unparseable cells become missing values, but the join key
/// column itself must be present or the pipeline cannot continue.
pub struct MeasurementReader;

impl MeasurementReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_measurements(&self, path: &Path) -> Result<Vec<MeasurementRecord>> {
        let file = File::open(path).map_err(|source| ProcessingError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        if !headers.iter().any(|h| h == MEASUREMENT_JOIN_KEY) {
            return Err(ProcessingError::missing_column(
                "measurement",
                MEASUREMENT_JOIN_KEY,
            ));
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for result in reader.deserialize::<MeasurementRecord>() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    warn!(error = %e, "skipping unreadable measurement row");
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, path = %path.display(), "measurement rows skipped");
        }

        Ok(records)
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}
