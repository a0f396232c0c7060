/// Labels of the ten numeric statistic columns, in artifact column order.
/// Used to key per-column counts in reports and logs.
pub const STAT_COLUMNS: [&str; 10] = [
    "value",
    "summary.min",
    "summary.q02",
    "summary.q25",
    "summary.median",
    "summary.q75",
    "summary.q98",
    "summary.max",
    "summary.avg",
    "summary.sd",
];

/// Join key column in the measurement table.
pub const MEASUREMENT_JOIN_KEY: &str = "sensor_id";

/// Join key column in the location table.
pub const LOCATION_JOIN_KEY: &str = "s_id";

/// Default artifact locations, matching the layout the fetch collaborator uses.
pub const DEFAULT_MEASUREMENTS_PATH: &str = "data/openaq_combined_data.csv";
pub const DEFAULT_LOCATIONS_PATH: &str = "data/locations.csv";
pub const DEFAULT_PRE_INTERPOLATION_PATH: &str = "data/cleaned_openaq_not_interpolated.csv";
pub const DEFAULT_CLEANED_PATH: &str = "data/cleaned_openaq.csv";
pub const DEFAULT_STATIONS_DIR: &str = "data/stations";
