use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use crate::models::{MeasurementRecord, StationMetadata};

/// A measurement row enriched with its station's metadata and the derived
/// date-only coverage fields. Field order is the artifact column order, so
/// serializing a slice of these yields the analysis projection directly.
///
/// The raw coverage timestamp strings ride along unserialized; they exist
/// only between the merge and datetime-normalization stages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergedRecord {
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub value: Option<f64>,

    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub sensor_id: Option<i64>,

    #[serde(rename = "summary.min", default, deserialize_with = "de::lenient_f64")]
    pub summary_min: Option<f64>,
    #[serde(rename = "summary.q02", default, deserialize_with = "de::lenient_f64")]
    pub summary_q02: Option<f64>,
    #[serde(rename = "summary.q25", default, deserialize_with = "de::lenient_f64")]
    pub summary_q25: Option<f64>,
    #[serde(
        rename = "summary.median",
        default,
        deserialize_with = "de::lenient_f64"
    )]
    pub summary_median: Option<f64>,
    #[serde(rename = "summary.q75", default, deserialize_with = "de::lenient_f64")]
    pub summary_q75: Option<f64>,
    #[serde(rename = "summary.q98", default, deserialize_with = "de::lenient_f64")]
    pub summary_q98: Option<f64>,
    #[serde(rename = "summary.max", default, deserialize_with = "de::lenient_f64")]
    pub summary_max: Option<f64>,
    #[serde(rename = "summary.avg", default, deserialize_with = "de::lenient_f64")]
    pub summary_avg: Option<f64>,
    #[serde(rename = "summary.sd", default, deserialize_with = "de::lenient_f64")]
    pub summary_sd: Option<f64>,

    #[serde(default)]
    pub from_utc_date: Option<NaiveDate>,
    #[serde(default)]
    pub from_local_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_utc_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_local_date: Option<NaiveDate>,

    #[serde(default)]
    pub parameter: String,

    #[serde(rename = "provider.id", default, deserialize_with = "de::lenient_i64")]
    pub provider_id: Option<i64>,
    #[serde(rename = "provider.name", default)]
    pub provider_name: Option<String>,

    #[serde(rename = "id", default, deserialize_with = "de::lenient_i64")]
    pub station_id: Option<i64>,
    #[serde(rename = "name", default)]
    pub station_name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,

    #[serde(skip)]
    pub coverage_from_utc: Option<String>,
    #[serde(skip)]
    pub coverage_from_local: Option<String>,
    #[serde(skip)]
    pub coverage_to_utc: Option<String>,
    #[serde(skip)]
    pub coverage_to_local: Option<String>,
}

impl MergedRecord {
    /// Build a merged row from a measurement and its (possibly absent)
    /// station match. Metadata columns stay `None` on a miss.
    pub fn from_join(measurement: &MeasurementRecord, station: Option<&StationMetadata>) -> Self {
        Self {
            value: measurement.value,
            sensor_id: measurement.sensor_id,
            summary_min: measurement.summary_min,
            summary_q02: measurement.summary_q02,
            summary_q25: measurement.summary_q25,
            summary_median: measurement.summary_median,
            summary_q75: measurement.summary_q75,
            summary_q98: measurement.summary_q98,
            summary_max: measurement.summary_max,
            summary_avg: measurement.summary_avg,
            summary_sd: measurement.summary_sd,
            from_utc_date: None,
            from_local_date: None,
            to_utc_date: None,
            to_local_date: None,
            parameter: measurement.parameter_label(),
            provider_id: station.and_then(|s| s.provider_id),
            provider_name: station.and_then(|s| s.provider_name.clone()),
            station_id: station.and_then(|s| s.station_id),
            station_name: station.and_then(|s| s.name.clone()),
            locality: station.and_then(|s| s.locality.clone()),
            coverage_from_utc: measurement.coverage_from_utc.clone(),
            coverage_from_local: measurement.coverage_from_local.clone(),
            coverage_to_utc: measurement.coverage_to_utc.clone(),
            coverage_to_local: measurement.coverage_to_local.clone(),
        }
    }

    /// Numeric statistic column by index into
    /// [`crate::utils::constants::STAT_COLUMNS`].
    pub fn stat(&self, index: usize) -> Option<f64> {
        match index {
            0 => self.value,
            1 => self.summary_min,
            2 => self.summary_q02,
            3 => self.summary_q25,
            4 => self.summary_median,
            5 => self.summary_q75,
            6 => self.summary_q98,
            7 => self.summary_max,
            8 => self.summary_avg,
            9 => self.summary_sd,
            _ => None,
        }
    }

    pub fn stat_mut(&mut self, index: usize) -> &mut Option<f64> {
        match index {
            0 => &mut self.value,
            1 => &mut self.summary_min,
            2 => &mut self.summary_q02,
            3 => &mut self.summary_q25,
            4 => &mut self.summary_median,
            5 => &mut self.summary_q75,
            6 => &mut self.summary_q98,
            7 => &mut self.summary_max,
            8 => &mut self.summary_avg,
            9 => &mut self.summary_sd,
            _ => panic!("statistic column index out of range: {index}"),
        }
    }
}
