use crate::models::MergedRecord;
use crate::utils::constants::STAT_COLUMNS;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Fill missing values in a date-sorted series by linear interpolation
/// weighted by elapsed calendar time. A missing value at `t` strictly
/// between known values `v1@t1` and `v2@t2` becomes
/// `v1 + (v2 - v1) * (t - t1) / (t2 - t1)`. Values before the first or
/// after the last known point stay missing. Returns the number of cells
/// filled.
///
/// The slice must already be sorted ascending by date. Duplicate dates are
/// allowed; a gap whose bounding dates coincide fills with the left value.
pub fn fill_time_weighted(points: &mut [(NaiveDate, Option<f64>)]) -> usize {
    let mut filled = 0usize;
    let mut prev_known: Option<(usize, NaiveDate, f64)> = None;

    let mut index = 0;
    while index < points.len() {
        let (date, value) = points[index];
        if let Some(v2) = value {
            if let Some((i1, t1, v1)) = prev_known {
                if index > i1 + 1 {
                    let span = (date - t1).num_days() as f64;
                    for gap in points.iter_mut().take(index).skip(i1 + 1) {
                        let estimate = if span == 0.0 {
                            v1
                        } else {
                            let elapsed = (gap.0 - t1).num_days() as f64;
                            v1 + (v2 - v1) * elapsed / span
                        };
                        gap.1 = Some(estimate);
                        filled += 1;
                    }
                }
            }
            prev_known = Some((index, date, v2));
        }
        index += 1;
    }

    filled
}

/// Sorts the merged table ascending by the canonical time axis (the
/// "from, local" date) and fills each statistic column with time-weighted
/// interpolation. Rows without an axis date sort last and are never read
/// from or written to by the fill. Rows sharing a date are treated
/// independently; deduplication belongs to the station partitioner.
pub struct GlobalInterpolator;

impl GlobalInterpolator {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of cells filled across all columns.
    pub fn interpolate(&self, records: &mut [MergedRecord]) -> usize {
        records.sort_by(|a, b| match (a.from_local_date, b.from_local_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let dated = records
            .iter()
            .take_while(|r| r.from_local_date.is_some())
            .count();

        let mut filled = 0usize;
        for index in 0..STAT_COLUMNS.len() {
            let mut points: Vec<(NaiveDate, Option<f64>)> = records[..dated]
                .iter()
                .filter_map(|r| r.from_local_date.map(|d| (d, r.stat(index))))
                .collect();

            filled += fill_time_weighted(&mut points);

            for (record, point) in records[..dated].iter_mut().zip(points) {
                *record.stat_mut(index) = point.1;
            }
        }

        filled
    }
}

impl Default for GlobalInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_even_gap() {
        let mut points = vec![
            (date(1), Some(10.0)),
            (date(2), None),
            (date(3), Some(30.0)),
        ];
        let filled = fill_time_weighted(&mut points);
        assert_eq!(filled, 1);
        assert_eq!(points[1].1, Some(20.0));
    }

    #[test]
    fn test_uneven_spacing_weights_by_elapsed_time() {
        // Day 2 between day 1 and day 4: 10 + 30 * (1/3) = 20, not the
        // row midpoint 25.
        let mut points = vec![
            (date(1), Some(10.0)),
            (date(2), None),
            (date(4), Some(40.0)),
        ];
        fill_time_weighted(&mut points);
        assert_eq!(points[1].1, Some(20.0));
    }

    #[test]
    fn test_never_extrapolates() {
        let mut points = vec![
            (date(1), None),
            (date(2), Some(5.0)),
            (date(3), Some(7.0)),
            (date(4), None),
        ];
        let filled = fill_time_weighted(&mut points);
        assert_eq!(filled, 0);
        assert_eq!(points[0].1, None);
        assert_eq!(points[3].1, None);
    }

    #[test]
    fn test_all_missing_is_noop() {
        let mut points = vec![(date(1), None), (date(2), None)];
        assert_eq!(fill_time_weighted(&mut points), 0);
        assert!(points.iter().all(|p| p.1.is_none()));
    }

    #[test]
    fn test_duplicate_dates_fill_from_left_bound() {
        let mut points = vec![
            (date(1), Some(10.0)),
            (date(1), None),
            (date(1), Some(14.0)),
        ];
        fill_time_weighted(&mut points);
        assert_eq!(points[1].1, Some(10.0));
    }

    #[test]
    fn test_global_interpolator_sorts_and_fills() {
        let mut records = vec![
            MergedRecord {
                from_local_date: Some(date(3)),
                value: Some(30.0),
                ..Default::default()
            },
            MergedRecord {
                from_local_date: None,
                value: None,
                ..Default::default()
            },
            MergedRecord {
                from_local_date: Some(date(1)),
                value: Some(10.0),
                ..Default::default()
            },
            MergedRecord {
                from_local_date: Some(date(2)),
                value: None,
                ..Default::default()
            },
        ];

        let filled = GlobalInterpolator::new().interpolate(&mut records);

        assert_eq!(filled, 1);
        assert_eq!(records[0].from_local_date, Some(date(1)));
        assert_eq!(records[1].value, Some(20.0));
        // Undated row sorts last, untouched.
        assert_eq!(records[3].from_local_date, None);
        assert_eq!(records[3].value, None);
    }

    #[test]
    fn test_global_interpolation_idempotent() {
        let mut records = vec![
            MergedRecord {
                from_local_date: Some(date(1)),
                value: Some(10.0),
                summary_avg: Some(1.0),
                ..Default::default()
            },
            MergedRecord {
                from_local_date: Some(date(2)),
                value: None,
                summary_avg: None,
                ..Default::default()
            },
            MergedRecord {
                from_local_date: Some(date(3)),
                value: Some(30.0),
                summary_avg: Some(3.0),
                ..Default::default()
            },
        ];

        let first = GlobalInterpolator::new().interpolate(&mut records);
        let snapshot: Vec<Option<f64>> = records.iter().map(|r| r.value).collect();
        let second = GlobalInterpolator::new().interpolate(&mut records);

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        let after: Vec<Option<f64>> = records.iter().map(|r| r.value).collect();
        assert_eq!(snapshot, after);
    }
}
