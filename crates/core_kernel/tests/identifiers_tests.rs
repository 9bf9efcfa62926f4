//! Tests for strongly-typed identifiers

use core_kernel::{BookingId, CourtId, PaymentId, SlotId, UserId};
use uuid::Uuid;

#[test]
fn test_prefixes_are_distinct() {
    let prefixes = [
        BookingId::prefix(),
        SlotId::prefix(),
        CourtId::prefix(),
        PaymentId::prefix(),
        UserId::prefix(),
    ];

    for (i, a) in prefixes.iter().enumerate() {
        for b in prefixes.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_display_round_trip() {
    let id = BookingId::new_v7();
    let parsed: BookingId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_serde_is_transparent_uuid() {
    let uuid = Uuid::new_v4();
    let id = PaymentId::from_uuid(uuid);

    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", uuid));

    let back: PaymentId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_v7_ids_are_time_ordered() {
    let a = PaymentId::new_v7();
    let b = PaymentId::new_v7();
    assert!(a.as_uuid() <= b.as_uuid());
}
