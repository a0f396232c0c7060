use serde::Deserialize;

use super::de;

/// One raw observation batch for a sensor over a coverage window, as fetched
/// from the OpenAQ daily measurements endpoint and flattened to CSV by the
/// fetch collaborator. Extra columns in the file are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementRecord {
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub sensor_id: Option<i64>,

    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub value: Option<f64>,

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

    /// Raw coverage window timestamps; parsed later by the datetime
    /// normalizer, which tolerates any malformed content here.
    #[serde(rename = "coverage.datetimeFrom.utc", default)]
    pub coverage_from_utc: Option<String>,
    #[serde(rename = "coverage.datetimeFrom.local", default)]
    pub coverage_from_local: Option<String>,
    #[serde(rename = "coverage.datetimeTo.utc", default)]
    pub coverage_to_utc: Option<String>,
    #[serde(rename = "coverage.datetimeTo.local", default)]
    pub coverage_to_local: Option<String>,

    #[serde(rename = "parameter.name", default)]
    pub parameter_name: Option<String>,
    #[serde(rename = "parameter.units", default)]
    pub parameter_units: Option<String>,
}

impl MeasurementRecord {
    /// The `"<name> <units>"` parameter label carried into the merged table.
    /// Missing components render as "nan", matching the upstream exports.
    pub fn parameter_label(&self) -> String {
        format!(
            "{} {}",
            self.parameter_name.as_deref().unwrap_or("nan"),
            self.parameter_units.as_deref().unwrap_or("nan")
        )
    }
}
