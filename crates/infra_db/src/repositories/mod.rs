//! Repository implementations of the domain ports

pub mod booking;
pub mod payment;

pub use booking::PgBookingRepository;
pub use payment::PgPaymentRepository;
