//! Database infrastructure
//!
//! SQLx/PostgreSQL adapters for the payment and booking ports, plus pool
//! configuration and error mapping. The verification unit of work lives in
//! [`repositories::payment`] and is the only place the payment-status write
//! and the booking financial writes share a transaction.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{PgBookingRepository, PgPaymentRepository};
