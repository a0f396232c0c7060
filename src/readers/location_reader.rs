use crate::error::{ProcessingError, Result};
use crate::models::StationMetadata;
use crate::utils::constants::LOCATION_JOIN_KEY;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// Reads the station location metadata table. The upstream export writes a
/// leading unnamed index column and many columns we do not model; both are
/// ignored. The `s_id` join key column must exist.
pub struct LocationReader;

impl LocationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationMetadata>> {
        let file = File::open(path).map_err(|source| ProcessingError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        if !headers.iter().any(|h| h == LOCATION_JOIN_KEY) {
            return Err(ProcessingError::missing_column(
                "location",
                LOCATION_JOIN_KEY,
            ));
        }

        let mut stations = Vec::new();
        for result in reader.deserialize::<StationMetadata>() {
            match result {
                Ok(station) => stations.push(station),
                Err(e) => warn!(error = %e, "skipping unreadable location row"),
            }
        }

        Ok(stations)
    }

    /// Stations keyed by their local sensor identifier. Rows without one
    /// cannot participate in the join and are dropped; on duplicate keys the
    /// first row wins, keeping the join many-to-one.
    pub fn read_stations_map(&self, path: &Path) -> Result<HashMap<i64, StationMetadata>> {
        let stations = self.read_stations(path)?;
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            if let Some(sensor_id) = station.sensor_id {
                map.entry(sensor_id).or_insert(station);
            }
        }

        Ok(map)
    }
}

impl Default for LocationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_stations_map() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ",s_id,id,name,locality,provider.id,provider.name").unwrap();
        writeln!(file, "0,7,100,Anand Vihar,Delhi,3,AirNow").unwrap();
        writeln!(file, "1,8,101,Sirifort,Delhi,3,AirNow").unwrap();
        writeln!(file, "2,,102,No Key,Delhi,3,AirNow").unwrap();

        let map = LocationReader::new().read_stations_map(file.path()).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map[&7].name.as_deref(), Some("Anand Vihar"));
        assert_eq!(map[&8].station_id, Some(101));
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "s_id,id,name").unwrap();
        writeln!(file, "7,100,First").unwrap();
        writeln!(file, "7,200,Second").unwrap();

        let map = LocationReader::new().read_stations_map(file.path()).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map[&7].name.as_deref(), Some("First"));
    }

    #[test]
    fn test_missing_join_key_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,name").unwrap();
        writeln!(file, "100,Anand Vihar").unwrap();

        let err = LocationReader::new()
            .read_stations(file.path())
            .unwrap_err();

        assert!(matches!(err, ProcessingError::MissingColumn { .. }));
    }
}
