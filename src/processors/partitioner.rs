use crate::error::Result;
use crate::models::{DailyRecord, MergedRecord, StationTimeSeries};
use crate::processors::interpolator::fill_time_weighted;
use crate::utils::constants::STAT_COLUMNS;
use crate::utils::progress::ProgressReporter;
use crate::writers::ArtifactWriter;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Outcome of a per-station split: which stations produced files and how
/// many partitions were skipped for lacking usable rows.
#[derive(Debug, Clone, Serialize)]
pub struct StationReport {
    pub written: usize,
    pub skipped: usize,
    pub stations: Vec<String>,
}

/// Splits the cleaned table into per-station dense daily series.
///
/// Per station: same-day rows collapse to their arithmetic mean, the series
/// is reindexed to every calendar day between its first and last date, and
/// the gaps introduced by reindexing are filled with the same time-weighted
/// interpolation the global stage uses. Stations are independent, so they
/// are processed on a rayon pool; within a station the four steps always run
/// in order.
pub struct StationPartitioner {
    max_workers: usize,
}

impl StationPartitioner {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    /// Pure partitioning: one dense series per distinct station name, in
    /// name order. Rows with no station name or no axis date are dropped;
    /// partitions left empty by that are omitted.
    pub fn partition(&self, records: &[MergedRecord]) -> Vec<StationTimeSeries> {
        Self::group_by_station(records)
            .into_iter()
            .filter_map(|(name, rows)| Self::build_series(&name, &rows))
            .collect()
    }

    /// Partition and persist, one file per station under `output_dir`.
    pub fn process_stations(
        &self,
        records: &[MergedRecord],
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationReport> {
        let groups: Vec<(String, Vec<&MergedRecord>)> =
            Self::group_by_station(records).into_iter().collect();
        let total = groups.len();
        let processed = Arc::new(AtomicUsize::new(0));

        if let Some(p) = progress {
            p.set_message(&format!("Processing {} stations...", total));
        }

        let writer = ArtifactWriter::new();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| crate::error::ProcessingError::Config(e.to_string()))?;

        let outcomes: Result<Vec<Option<String>>> = pool.install(|| {
            groups
                .par_iter()
                .map(|(name, rows)| {
                    let outcome = match Self::build_series(name, rows) {
                        Some(series) => {
                            writer.write_station_series(&series, output_dir)?;
                            Ok(Some(name.clone()))
                        }
                        None => {
                            warn!(station = %name, "skipping empty station partition");
                            Ok(None)
                        }
                    };

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    outcome
                })
                .collect()
        });

        let outcomes = outcomes?;
        let stations: Vec<String> = outcomes.into_iter().flatten().collect();
        let written = stations.len();

        if let Some(p) = progress {
            p.finish_with_message(&format!("Wrote {} station files", written));
        }

        Ok(StationReport {
            written,
            skipped: total - written,
            stations,
        })
    }

    fn group_by_station(records: &[MergedRecord]) -> BTreeMap<String, Vec<&MergedRecord>> {
        let mut groups: BTreeMap<String, Vec<&MergedRecord>> = BTreeMap::new();
        for record in records {
            if let Some(name) = record.station_name.as_deref() {
                groups.entry(name.to_string()).or_default().push(record);
            }
        }
        groups
    }

    /// Dedup, densify and re-interpolate one partition. Returns `None` when
    /// no row carries an axis date.
    fn build_series(name: &str, rows: &[&MergedRecord]) -> Option<StationTimeSeries> {
        // Mean per calendar day, skipping missing cells per column.
        let mut by_date: BTreeMap<NaiveDate, [(f64, usize); 10]> = BTreeMap::new();
        for row in rows {
            let Some(date) = row.from_local_date else {
                continue;
            };
            let acc = by_date.entry(date).or_insert([(0.0, 0); 10]);
            for index in 0..STAT_COLUMNS.len() {
                if let Some(v) = row.stat(index) {
                    acc[index].0 += v;
                    acc[index].1 += 1;
                }
            }
        }

        let (&min_date, _) = by_date.iter().next()?;
        let (&max_date, _) = by_date.iter().next_back()?;

        // Dense daily calendar between the observed bounds.
        let mut daily = Vec::new();
        let mut date = min_date;
        loop {
            let mut record = DailyRecord::empty(date);
            if let Some(acc) = by_date.get(&date) {
                for (index, &(sum, n)) in acc.iter().enumerate() {
                    if n > 0 {
                        *record.stat_mut(index) = Some(sum / n as f64);
                    }
                }
            }
            daily.push(record);

            if date == max_date {
                break;
            }
            date = date.succ_opt()?;
        }

        // Fill the gaps the reindex introduced; ends stay missing.
        for index in 0..STAT_COLUMNS.len() {
            let mut points: Vec<(NaiveDate, Option<f64>)> =
                daily.iter().map(|r| (r.date, r.stat(index))).collect();
            fill_time_weighted(&mut points);
            for (record, point) in daily.iter_mut().zip(points) {
                *record.stat_mut(index) = point.1;
            }
        }

        Some(StationTimeSeries {
            station: name.to_string(),
            rows: daily,
        })
    }
}
