//! Core Kernel - Foundational types for the court booking system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money with precise decimal arithmetic (single platform currency)
//! - Percent for court-level down-payment thresholds
//! - Strongly-typed identifiers

pub mod identifiers;
pub mod money;

pub use identifiers::{BookingId, CourtId, PaymentId, SlotId, UserId};
pub use money::{Money, MoneyError, Percent};
