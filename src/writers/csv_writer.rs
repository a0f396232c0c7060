use crate::error::{ProcessingError, Result};
use crate::models::{MergedRecord, StationTimeSeries};
use crate::utils::filename::station_file_path;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Writes and re-reads the pipeline's CSV artifacts: the two merged-table
/// checkpoints and the per-station daily series files. Column layout comes
/// from the record types' serde derives.
pub struct ArtifactWriter;

impl ArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_merged(&self, records: &[MergedRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ProcessingError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| ProcessingError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(|source| ProcessingError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Read a merged artifact back, e.g. when splitting stations from a
    /// previously cleaned file. Missing optional columns read as missing
    /// values rather than erroring.
    pub fn read_merged(&self, path: &Path) -> Result<Vec<MergedRecord>> {
        let file = File::open(path).map_err(|source| ProcessingError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize::<MergedRecord>() {
            records.push(result?);
        }
        Ok(records)
    }

    /// One file per station, named by the sanitized station name.
    pub fn write_station_series(
        &self,
        series: &StationTimeSeries,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let path = station_file_path(output_dir, &series.station);

        let file = File::create(&path).map_err(|source| ProcessingError::FileWrite {
            path: path.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);

        for row in &series.rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|source| ProcessingError::FileWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}
