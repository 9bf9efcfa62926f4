//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! courtbook test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `fakes`: In-memory implementations of every payment port
//! - `assertions`: Custom assertion helpers for domain types

pub mod assertions;
pub mod builders;
pub mod fakes;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fakes::*;
pub use fixtures::*;
