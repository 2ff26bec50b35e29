use serde::{Deserialize, Serialize};

/// A single half-hour increment of a day, tagged free or reserved.
/// Derived from the availability feed; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub time: String,
    pub reserved: bool,
}

impl Slot {
    /// Classifies a raw marker string from the availability feed. A trailing
    /// `*` is the reservation marker and is stripped from the stored time.
    pub fn from_marker(raw: &str) -> Self {
        match raw.strip_suffix('*') {
            Some(time) => Slot {
                time: time.to_string(),
                reserved: true,
            },
            None => Slot {
                time: raw.to_string(),
                reserved: false,
            },
        }
    }
}
