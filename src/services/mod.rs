pub mod availability;
pub mod board;
pub mod credentials;
pub mod picker;
pub mod realtime;
pub mod reservations;
pub mod slots;
