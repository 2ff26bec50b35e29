use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::models::Slot;
use crate::services::availability::{AvailabilityService, WeekAvailability};

/// Classified week of slots for one professional, keyed by ISO date.
/// Date keys iterate in calendar order; per-day slot order is whatever the
/// availability service returned.
pub struct SlotBoard {
    slots: BTreeMap<String, Vec<Slot>>,
    latest_request: u64,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            latest_request: 0,
        }
    }

    /// Tags an outgoing fetch. Only the response carrying the newest tag may
    /// update the board, so a slow response for an old week cannot overwrite
    /// data for the week the user is now looking at.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.latest_request
    }

    /// Applies a fetch result. Stale tags are discarded; failures keep the
    /// prior mapping so the view degrades to stale data instead of blanking.
    pub fn apply(&mut self, tag: u64, result: anyhow::Result<WeekAvailability>) {
        if tag != self.latest_request {
            tracing::debug!(tag, latest = self.latest_request, "discarding stale availability response");
            return;
        }
        match result {
            Ok(week) => {
                self.slots = week
                    .into_iter()
                    .map(|(date, raw)| (date, classify_day(&raw)))
                    .collect();
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch availability, keeping prior slots");
            }
        }
    }

    /// Fetches and applies one professional's week in a single step.
    pub async fn refresh(
        &mut self,
        service: &dyn AvailabilityService,
        professional_id: &str,
        week_start: NaiveDate,
    ) {
        let tag = self.begin_request();
        let result = service.week_slots(professional_id, week_start).await;
        self.apply(tag, result);
    }

    /// Applies a single-day update pushed over the realtime channel.
    pub fn apply_push(&mut self, date: &str, raw: &[String]) {
        self.slots.insert(date.to_string(), classify_day(raw));
    }

    pub fn day(&self, date: &str) -> Option<&[Slot]> {
        self.slots.get(date).map(|slots| slots.as_slice())
    }

    /// Days in calendar order, for the weekly grid.
    pub fn days(&self) -> impl Iterator<Item = (&str, &[Slot])> {
        self.slots
            .iter()
            .map(|(date, slots)| (date.as_str(), slots.as_slice()))
    }

    /// The reserved set for one day, in the shape the conflict checker and
    /// range picker consume.
    pub fn reserved_for(&self, date: &str) -> HashSet<String> {
        self.slots
            .get(date)
            .map(|slots| {
                slots
                    .iter()
                    .filter(|s| s.reserved)
                    .map(|s| s.time.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for SlotBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_day(raw: &[String]) -> Vec<Slot> {
    raw.iter().map(|s| Slot::from_marker(s)).collect()
}
