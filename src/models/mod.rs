pub mod reservation;
pub mod selection;
pub mod slot;

pub use reservation::{Reservation, ReservationStatus};
pub use selection::DateRangeSelection;
pub use slot::Slot;
