use crate::models::MergedRecord;
use crate::utils::constants::STAT_COLUMNS;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Per-column replacement counts from one sanitization pass.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizeReport {
    pub replaced: BTreeMap<String, usize>,
}

impl SanitizeReport {
    pub fn total(&self) -> usize {
        self.replaced.values().sum()
    }
}

/// Replaces physically invalid (negative) entries of the ten statistic
/// columns with the missing marker. Non-negative and already-missing entries
/// pass through, so re-running on sanitized output is a no-op.
pub struct ValueSanitizer;

impl ValueSanitizer {
    pub fn new() -> Self {
        Self
    }

    pub fn sanitize(&self, records: &mut [MergedRecord]) -> SanitizeReport {
        let mut replaced = BTreeMap::new();

        for (index, column) in STAT_COLUMNS.iter().enumerate() {
            let mut count = 0usize;
            for record in records.iter_mut() {
                let cell = record.stat_mut(index);
                if matches!(cell, Some(v) if *v < 0.0) {
                    *cell = None;
                    count += 1;
                }
            }
            info!(column = %column, replaced = count, "negatives replaced");
            replaced.insert((*column).to_string(), count);
        }

        SanitizeReport { replaced }
    }
}

impl Default for ValueSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negatives_become_missing() {
        let mut records = vec![
            MergedRecord {
                value: Some(-5.0),
                summary_min: Some(0.0),
                summary_max: Some(12.0),
                ..Default::default()
            },
            MergedRecord {
                value: Some(3.0),
                summary_min: Some(-0.1),
                summary_max: None,
                ..Default::default()
            },
        ];

        let report = ValueSanitizer::new().sanitize(&mut records);

        assert_eq!(records[0].value, None);
        assert_eq!(records[0].summary_min, Some(0.0)); // zero is valid
        assert_eq!(records[1].value, Some(3.0));
        assert_eq!(records[1].summary_min, None);
        assert_eq!(report.replaced["value"], 1);
        assert_eq!(report.replaced["summary.min"], 1);
        assert_eq!(report.replaced["summary.max"], 0);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_no_negatives_remain() {
        let mut records = vec![MergedRecord {
            value: Some(-1.0),
            summary_avg: Some(-2.5),
            summary_sd: Some(4.0),
            ..Default::default()
        }];

        ValueSanitizer::new().sanitize(&mut records);

        for record in &records {
            for index in 0..STAT_COLUMNS.len() {
                if let Some(v) = record.stat(index) {
                    assert!(v >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let mut records = vec![MergedRecord {
            value: Some(-5.0),
            summary_avg: Some(7.0),
            ..Default::default()
        }];

        let first = ValueSanitizer::new().sanitize(&mut records);
        let snapshot = records.clone();
        let second = ValueSanitizer::new().sanitize(&mut records);

        assert_eq!(first.total(), 1);
        assert_eq!(second.total(), 0);
        for (before, after) in snapshot.iter().zip(&records) {
            assert_eq!(before.value, after.value);
            assert_eq!(before.summary_avg, after.summary_avg);
        }
    }
}
