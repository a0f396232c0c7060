use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a station's dense daily series. Only the numeric statistic
/// columns survive the per-station resampling; identifier and text columns
/// are dropped when same-day rows are averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "from_local_date")]
    pub date: NaiveDate,

    pub value: Option<f64>,

    #[serde(rename = "summary.min")]
    pub summary_min: Option<f64>,
    #[serde(rename = "summary.q02")]
    pub summary_q02: Option<f64>,
    #[serde(rename = "summary.q25")]
    pub summary_q25: Option<f64>,
    #[serde(rename = "summary.median")]
    pub summary_median: Option<f64>,
    #[serde(rename = "summary.q75")]
    pub summary_q75: Option<f64>,
    #[serde(rename = "summary.q98")]
    pub summary_q98: Option<f64>,
    #[serde(rename = "summary.max")]
    pub summary_max: Option<f64>,
    #[serde(rename = "summary.avg")]
    pub summary_avg: Option<f64>,
    #[serde(rename = "summary.sd")]
    pub summary_sd: Option<f64>,
}

impl DailyRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            value: None,
            summary_min: None,
            summary_q02: None,
            summary_q25: None,
            summary_median: None,
            summary_q75: None,
            summary_q98: None,
            summary_max: None,
            summary_avg: None,
            summary_sd: None,
        }
    }

    pub fn stat(&self, index: usize) -> Option<f64> {
        match index {
            0 => self.value,
            1 => self.summary_min,
            2 => self.summary_q02,
            3 => self.summary_q25,
            4 => self.summary_median,
            5 => self.summary_q75,
            6 => self.summary_q98,
            7 => self.summary_max,
            8 => self.summary_avg,
            9 => self.summary_sd,
            _ => None,
        }
    }

    pub fn stat_mut(&mut self, index: usize) -> &mut Option<f64> {
        match index {
            0 => &mut self.value,
            1 => &mut self.summary_min,
            2 => &mut self.summary_q02,
            3 => &mut self.summary_q25,
            4 => &mut self.summary_median,
            5 => &mut self.summary_q75,
            6 => &mut self.summary_q98,
            7 => &mut self.summary_max,
            8 => &mut self.summary_avg,
            9 => &mut self.summary_sd,
            _ => panic!("statistic column index out of range: {index}"),
        }
    }
}

/// A station's gap-free daily series between its first and last observed
/// date. Exactly one row per calendar day, no duplicates.
#[derive(Debug, Clone)]
pub struct StationTimeSeries {
    pub station: String,
    pub rows: Vec<DailyRecord>,
}

impl StationTimeSeries {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
