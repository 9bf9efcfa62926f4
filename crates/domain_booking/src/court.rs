//! Courts and bookable slots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CourtId, Percent, SlotId};

/// A bookable court
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    /// Unique identifier
    pub id: CourtId,
    /// Display name
    pub name: String,
    /// Minimum fraction of the booking total a first payment must cover
    pub min_down_payment: Percent,
}

impl Court {
    /// Creates a new court
    pub fn new(name: impl Into<String>, min_down_payment: Percent) -> Self {
        Self {
            id: CourtId::new_v7(),
            name: name.into(),
            min_down_payment,
        }
    }
}

/// A reservable time slot on a court
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    /// Unique identifier
    pub id: SlotId,
    /// Court this slot belongs to
    pub court_id: CourtId,
    /// Slot start
    pub starts_at: DateTime<Utc>,
    /// Slot end
    pub ends_at: DateTime<Utc>,
}

impl Slot {
    /// Creates a new slot on a court
    pub fn new(court_id: CourtId, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            id: SlotId::new_v7(),
            court_id,
            starts_at,
            ends_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_court_threshold_applies_to_booking_total() {
        let court = Court::new("Court 1", Percent::new(20).unwrap());
        let threshold = court.min_down_payment.of(Money::new(dec!(1000)));
        assert_eq!(threshold, Money::new(dec!(200)));
    }

    #[test]
    fn test_slot_belongs_to_its_court() {
        let court = Court::new("Court 2", Percent::new(0).unwrap());
        let starts_at = Utc::now();
        let slot = Slot::new(court.id, starts_at, starts_at + Duration::hours(1));

        assert_eq!(slot.court_id, court.id);
        assert!(slot.ends_at > slot.starts_at);
    }
}
