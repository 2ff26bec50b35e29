use std::collections::HashSet;

use chrono::NaiveDate;

use crate::errors::ClientError;
use crate::models::DateRangeSelection;
use crate::services::slots::{has_conflict, parse_minutes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    NoStart,
    StartChosen { start: String },
    RangeComplete { start: String, end: String },
}

/// Drives the date/time range selection for a booking form. Holds the
/// selected day's reserved set and walks NoStart → StartChosen →
/// RangeComplete; the completed (date, start, end) triple is handed to the
/// caller exactly once, by `pick_end`.
pub struct RangePicker {
    date: Option<NaiveDate>,
    reserved: HashSet<String>,
    state: PickerState,
}

impl RangePicker {
    pub fn new() -> Self {
        Self {
            date: None,
            reserved: HashSet::new(),
            state: PickerState::NoStart,
        }
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Selecting a day installs its reserved set and clears any selection.
    pub fn select_date(&mut self, date: NaiveDate, reserved: HashSet<String>) {
        self.date = Some(date);
        self.reserved = reserved;
        self.state = PickerState::NoStart;
    }

    /// Whether a start option should be selectable in the view.
    pub fn start_enabled(&self, time: &str) -> bool {
        self.date.is_some() && parse_minutes(time).is_some() && !self.reserved.contains(time)
    }

    /// Whether an end option should be selectable: strictly after the chosen
    /// start and reachable without crossing a reserved slot.
    pub fn end_enabled(&self, time: &str) -> bool {
        let start = match &self.state {
            PickerState::StartChosen { start } | PickerState::RangeComplete { start, .. } => start,
            PickerState::NoStart => return false,
        };
        match (parse_minutes(start), parse_minutes(time)) {
            (Some(s), Some(e)) if e > s => !has_conflict(start, time, &self.reserved),
            _ => false,
        }
    }

    pub fn pick_start(&mut self, time: &str) -> Result<(), ClientError> {
        if self.date.is_none() {
            return Err(ClientError::NoDateSelected);
        }
        if parse_minutes(time).is_none() {
            return Err(ClientError::InvalidTime(time.to_string()));
        }
        if self.reserved.contains(time) {
            return Err(ClientError::SlotReserved);
        }
        self.state = PickerState::StartChosen {
            start: time.to_string(),
        };
        Ok(())
    }

    pub fn pick_end(&mut self, time: &str) -> Result<DateRangeSelection, ClientError> {
        let date = self.date.ok_or(ClientError::NoDateSelected)?;
        let start = match &self.state {
            PickerState::StartChosen { start } | PickerState::RangeComplete { start, .. } => {
                start.clone()
            }
            PickerState::NoStart => return Err(ClientError::IncompleteSelection),
        };

        let start_minutes =
            parse_minutes(&start).ok_or_else(|| ClientError::InvalidTime(start.clone()))?;
        let end_minutes =
            parse_minutes(time).ok_or_else(|| ClientError::InvalidTime(time.to_string()))?;

        if end_minutes <= start_minutes {
            return Err(ClientError::InvalidRange);
        }
        if has_conflict(&start, time, &self.reserved) {
            return Err(ClientError::SlotReserved);
        }

        self.state = PickerState::RangeComplete {
            start: start.clone(),
            end: time.to_string(),
        };

        Ok(DateRangeSelection {
            date,
            start_time: start,
            end_time: time.to_string(),
        })
    }

    /// Installs a freshly fetched reserved set for the current day. A set
    /// that swallows the chosen start drops back to NoStart; one that only
    /// breaks a completed range clears the end and keeps the start.
    pub fn refresh_reserved(&mut self, reserved: HashSet<String>) {
        self.reserved = reserved;
        let next = match &self.state {
            PickerState::StartChosen { start } | PickerState::RangeComplete { start, .. }
                if self.reserved.contains(start) =>
            {
                Some(PickerState::NoStart)
            }
            PickerState::RangeComplete { start, end }
                if has_conflict(start, end, &self.reserved) =>
            {
                Some(PickerState::StartChosen {
                    start: start.clone(),
                })
            }
            _ => None,
        };
        if let Some(state) = next {
            self.state = state;
        }
    }
}

impl Default for RangePicker {
    fn default() -> Self {
        Self::new()
    }
}
