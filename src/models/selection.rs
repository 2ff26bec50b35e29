use chrono::NaiveDate;
use serde::Serialize;

/// Transient range picked by the user; held only until submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DateRangeSelection {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}
