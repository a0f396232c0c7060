use serde::Deserialize;

use super::de;

/// One monitoring station row from the location metadata table. The join key
/// against measurements is `s_id` (the station's local sensor identifier);
/// `id` is the station's own identifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationMetadata {
    #[serde(rename = "s_id", default, deserialize_with = "de::lenient_i64")]
    pub sensor_id: Option<i64>,

    #[serde(rename = "id", default, deserialize_with = "de::lenient_i64")]
    pub station_id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub locality: Option<String>,

    #[serde(rename = "provider.id", default, deserialize_with = "de::lenient_i64")]
    pub provider_id: Option<i64>,

    #[serde(rename = "provider.name", default)]
    pub provider_name: Option<String>,
}
