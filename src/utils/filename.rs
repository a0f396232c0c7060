use std::path::{Path, PathBuf};

/// Sanitize a station display name into a file identifier: spaces and path
/// separators become underscores. Distinct names that collapse to the same
/// identifier overwrite each other; that mirrors the upstream dataset and is
/// accepted rather than detected.
pub fn sanitize_station_name(name: &str) -> String {
    name.replace([' ', '/', '\\'], "_")
}

/// Output path for a station's daily series file.
pub fn station_file_path(output_dir: &Path, station_name: &str) -> PathBuf {
    output_dir.join(format!("{}.csv", sanitize_station_name(station_name)))
}
