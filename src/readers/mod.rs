pub mod location_reader;
pub mod measurement_reader;

pub use location_reader::LocationReader;
pub use measurement_reader::MeasurementReader;
