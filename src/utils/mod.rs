pub mod constants;
pub mod filename;
pub mod progress;

pub use filename::{sanitize_station_name, station_file_path};
