pub mod datetime_normalizer;
pub mod interpolator;
pub mod merger;
pub mod partitioner;
pub mod pipeline;
pub mod sanitizer;

pub use datetime_normalizer::{DatetimeNormalizer, DatetimeParseCounts};
pub use interpolator::GlobalInterpolator;
pub use merger::Merger;
pub use partitioner::{StationPartitioner, StationReport};
pub use pipeline::{CleaningPipeline, PipelinePaths, RunReport};
pub use sanitizer::{SanitizeReport, ValueSanitizer};
