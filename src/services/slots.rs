use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::Reservation;

/// Parses a zero-padded "HH:MM" time into minutes since midnight.
/// Returns None for anything that is not a well-formed time of day.
pub fn parse_minutes(s: &str) -> Option<u32> {
    let (hour, minute) = s.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

fn format_minutes(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Ordered iterator of "HH:MM" strings covering [start, end) in
/// half-hour steps. Restartable: clone it to walk the range again.
#[derive(Debug, Clone)]
pub struct SlotSequence {
    current: u32,
    end: u32,
}

impl Iterator for SlotSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.current >= self.end {
            return None;
        }
        let slot = format_minutes(self.current);
        self.current += 30;
        Some(slot)
    }
}

/// Half-hour timestamps from `start` (inclusive) to `end` (exclusive).
/// A start at or past the end, or an unparseable input, yields an empty
/// sequence rather than an error.
pub fn slot_sequence(start: &str, end: &str) -> SlotSequence {
    match (parse_minutes(start), parse_minutes(end)) {
        (Some(s), Some(e)) => SlotSequence { current: s, end: e },
        _ => SlotSequence { current: 0, end: 0 },
    }
}

/// True iff any half-hour increment in [start, end) is in the reserved set.
pub fn has_conflict(start: &str, end: &str, reserved: &HashSet<String>) -> bool {
    slot_sequence(start, end).any(|slot| reserved.contains(&slot))
}

/// Derives the reserved half-hour set for one professional's day from raw
/// reservation records. Cancelled and rejected reservations do not block.
pub fn reserved_times(reservations: &[Reservation], date: NaiveDate) -> HashSet<String> {
    reservations
        .iter()
        .filter(|r| r.date == date && r.status.blocks_slots())
        .flat_map(|r| slot_sequence(&r.start_time, &r.end_time))
        .collect()
}
