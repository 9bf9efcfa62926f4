//! Booking domain
//!
//! Bookings reserve a court slot and carry the financial running totals the
//! payment workflow reads and updates: the fixed `total_amount`, the
//! monotonically non-decreasing `paid_amount`, and a forward-only status.

pub mod booking;
pub mod court;
pub mod error;

pub use booking::{recompute_status, Booking, BookingStatus};
pub use court::{Court, Slot};
pub use error::BookingError;
