use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub client_id: String,
    pub professional_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: ReservationStatus,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Accepted => "accepted",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "accepted" => ReservationStatus::Accepted,
            "rejected" => ReservationStatus::Rejected,
            "completed" => ReservationStatus::Completed,
            "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Pending,
        }
    }

    /// Whether a reservation in this status still blocks its time range.
    /// Cancelled and rejected reservations free their slots for rebooking.
    pub fn blocks_slots(&self) -> bool {
        !matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["pending", "accepted", "rejected", "completed", "cancelled"] {
            assert_eq!(ReservationStatus::from_str(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_pending() {
        assert_eq!(
            ReservationStatus::from_str("archived"),
            ReservationStatus::Pending
        );
    }

    #[test]
    fn test_blocking_statuses() {
        assert!(ReservationStatus::Pending.blocks_slots());
        assert!(ReservationStatus::Accepted.blocks_slots());
        assert!(ReservationStatus::Completed.blocks_slots());
        assert!(!ReservationStatus::Rejected.blocks_slots());
        assert!(!ReservationStatus::Cancelled.blocks_slots());
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "id": "res-1",
            "clientId": "client-9",
            "professionalId": "pro-4",
            "date": "2025-06-10",
            "startTime": "09:00",
            "endTime": "10:30",
            "status": "pending",
            "message": "first session",
            "createdAt": "2025-06-01T12:00:00"
        }"#;
        let res: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(res.professional_id, "pro-4");
        assert_eq!(res.start_time, "09:00");
        assert_eq!(res.status, ReservationStatus::Pending);
    }
}
