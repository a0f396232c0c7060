pub mod measurement;
pub mod merged;
pub mod series;
pub mod station;

pub use measurement::MeasurementRecord;
pub use merged::MergedRecord;
pub use series::{DailyRecord, StationTimeSeries};
pub use station::StationMetadata;

/// Lenient cell deserializers. Input tables come from an external fetch
/// collaborator and routinely contain blank, "nan" or otherwise unparseable
/// cells; those coerce to `None` instead of failing the row.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite()))
    }

    pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| {
            let s = s.trim();
            // Identifier columns round-trip through floats upstream ("42.0").
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|v| v as i64))
        }))
    }
}
