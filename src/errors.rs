#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to reach the booking service: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("please select both a start and an end time")]
    IncompleteSelection,

    #[error("select a date before picking a time")]
    NoDateSelected,

    #[error("that time slot is already reserved")]
    SlotReserved,

    #[error("the end time must be after the start time")]
    InvalidRange,

    #[error("invalid time format: {0}")]
    InvalidTime(String),

    #[error("booking was not accepted: {0}")]
    Rejected(String),
}
