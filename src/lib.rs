//! Watch booked flights for better seats.
//!
//! Reads trips from a flights CSV, asks a [`availability::SeatSource`] what is open,
//! and reports an alert line per trip. Lines carrying [`alerts::ALERT_MARKER`] mean a
//! better seat is available.

pub mod alerts;
pub mod availability;
pub mod cli;
pub mod error;
pub mod seats;
pub mod trips;
pub mod validate;

pub use alerts::{check_flights, Alert, CheckOptions, OutputMode, ALERT_MARKER};
pub use availability::{MockSeatSource, SeatSource};
pub use error::SeatStalkerError;
pub use seats::{tier_for_seat, SeatCandidate, TierPolicy};
pub use trips::{load_trips, Strictness, Trip};
