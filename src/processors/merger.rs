use crate::models::{MeasurementRecord, MergedRecord, StationMetadata};
use std::collections::HashMap;

/// Left-joins measurement rows to station metadata on
/// `sensor_id == s_id`. Every measurement row appears exactly once in the
/// output; rows without a matching station keep null metadata columns. The
/// station map is keyed uniquely, so the join cannot fan out.
pub struct Merger;

impl Merger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(
        &self,
        measurements: &[MeasurementRecord],
        stations: &HashMap<i64, StationMetadata>,
    ) -> Vec<MergedRecord> {
        measurements
            .iter()
            .map(|measurement| {
                let station = measurement.sensor_id.and_then(|id| stations.get(&id));
                MergedRecord::from_join(measurement, station)
            })
            .collect()
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
