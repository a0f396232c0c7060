use crate::models::MergedRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Per-column counts of coverage timestamps that were present but did not
/// parse. Parse failures are data, not faults; they surface here only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatetimeParseCounts {
    pub from_utc: usize,
    pub from_local: usize,
    pub to_utc: usize,
    pub to_local: usize,
}

impl DatetimeParseCounts {
    pub fn total(&self) -> usize {
        self.from_utc + self.from_local + self.to_utc + self.to_local
    }
}

/// Derives the four date-only coverage fields from the raw timestamp strings
/// carried on each merged row. Absent or malformed timestamps leave the
/// derived field missing; this stage never fails.
pub struct DatetimeNormalizer;

impl DatetimeNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, records: &mut [MergedRecord]) -> DatetimeParseCounts {
        let mut counts = DatetimeParseCounts::default();

        for record in records.iter_mut() {
            record.from_utc_date =
                Self::parse_counted(record.coverage_from_utc.as_deref(), &mut counts.from_utc);
            record.from_local_date =
                Self::parse_counted(record.coverage_from_local.as_deref(), &mut counts.from_local);
            record.to_utc_date =
                Self::parse_counted(record.coverage_to_utc.as_deref(), &mut counts.to_utc);
            record.to_local_date =
                Self::parse_counted(record.coverage_to_local.as_deref(), &mut counts.to_local);
        }

        counts
    }

    fn parse_counted(raw: Option<&str>, failures: &mut usize) -> Option<NaiveDate> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = Self::parse_timestamp(raw);
        if parsed.is_none() {
            *failures += 1;
        }
        parsed
    }

    /// Accepts the timestamp shapes seen in the upstream exports: RFC 3339
    /// with offset, naive datetimes with 'T' or space separators, and bare
    /// dates. Truncates to calendar-date granularity.
    pub fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt.date());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

impl Default for DatetimeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
