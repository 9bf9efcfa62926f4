//! In-memory fakes of the payment ports
//!
//! One shared store implements `PaymentStore`, `BookingReader` and
//! `VerificationStore`, mirroring how the Postgres adapters share a
//! database. The verification transaction buffers its writes and applies
//! them only on commit, so a dropped scope leaves the store untouched, like
//! a rolled-back transaction.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use core_kernel::{BookingId, Money, PaymentId, Percent, UserId};
use domain_booking::{Booking, BookingStatus, Court, Slot};
use domain_payment::{
    BookingDetails, BookingReader, BookingSnapshot, Payment, PaymentError, PaymentMethod,
    PaymentStatus, PaymentStore, StoredFile, UploadStore, UploadedImage, VerificationStore,
    VerificationTxn,
};

use crate::builders::BookingBuilder;

#[derive(Clone)]
struct BookingRecord {
    booking: Booking,
    min_down_payment: Percent,
}

#[derive(Default)]
struct Inner {
    payments: Mutex<BTreeMap<Uuid, Payment>>,
    bookings: Mutex<HashMap<Uuid, BookingRecord>>,
}

/// Shared in-memory store backing all payment ports
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a booking and its court threshold
    pub fn add_booking(&self, booking: Booking, min_down_payment: Percent) {
        self.inner.bookings.lock().unwrap().insert(
            *booking.id.as_uuid(),
            BookingRecord {
                booking,
                min_down_payment,
            },
        );
    }

    /// Reads a booking back out, for assertions
    pub fn booking(&self, id: BookingId) -> Option<Booking> {
        self.inner
            .bookings
            .lock()
            .unwrap()
            .get(id.as_uuid())
            .map(|r| r.booking.clone())
    }

    /// Reads a payment back out, for assertions
    pub fn payment(&self, id: PaymentId) -> Option<Payment> {
        self.inner.payments.lock().unwrap().get(id.as_uuid()).cloned()
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn insert(&self, payment: &Payment) -> Result<(), PaymentError> {
        self.inner
            .payments
            .lock()
            .unwrap()
            .insert(*payment.id.as_uuid(), payment.clone());
        Ok(())
    }

    async fn update_amount_method(
        &self,
        id: PaymentId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Payment, PaymentError> {
        let mut payments = self.inner.payments.lock().unwrap();
        let payment = payments
            .get_mut(id.as_uuid())
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;
        payment.payment_amount = amount;
        payment.payment_method = method;
        Ok(payment.clone())
    }

    async fn set_image_pending(
        &self,
        id: PaymentId,
        reference: &str,
    ) -> Result<Payment, PaymentError> {
        let mut payments = self.inner.payments.lock().unwrap();
        let payment = payments
            .get_mut(id.as_uuid())
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;
        payment.payment_image_link = Some(reference.to_string());
        payment.payment_status = PaymentStatus::VerificationPending;
        Ok(payment.clone())
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, PaymentError> {
        Ok(self.inner.payments.lock().unwrap().get(id.as_uuid()).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Payment>, PaymentError> {
        Ok(self.inner.payments.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, PaymentError> {
        Ok(self
            .inner
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.payment_status == status)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingReader for InMemoryStore {
    async fn booking_details(&self, booking_id: BookingId) -> Result<BookingDetails, PaymentError> {
        let record = self
            .inner
            .bookings
            .lock()
            .unwrap()
            .get(booking_id.as_uuid())
            .cloned()
            .ok_or_else(|| PaymentError::not_found(format!("Booking {booking_id} not found")))?;

        let payments = self
            .inner
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect();

        Ok(BookingDetails {
            booking_id,
            user_id: record.booking.user_id,
            total_amount: record.booking.total_amount,
            paid_amount: record.booking.paid_amount,
            status: record.booking.status,
            min_down_payment: record.min_down_payment,
            payments,
        })
    }
}

#[async_trait]
impl VerificationStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn VerificationTxn>, PaymentError> {
        Ok(Box::new(InMemoryTxn {
            store: self.clone(),
            staged_payments: HashMap::new(),
            staged_bookings: HashMap::new(),
        }))
    }
}

/// Buffered verification scope; writes land in the store only on commit
struct InMemoryTxn {
    store: InMemoryStore,
    staged_payments: HashMap<Uuid, Payment>,
    staged_bookings: HashMap<Uuid, BookingRecord>,
}

impl InMemoryTxn {
    fn read_payment(&self, id: PaymentId) -> Option<Payment> {
        self.staged_payments
            .get(id.as_uuid())
            .cloned()
            .or_else(|| self.store.payment(id))
    }

    fn read_booking(&self, id: BookingId) -> Option<BookingRecord> {
        self.staged_bookings.get(id.as_uuid()).cloned().or_else(|| {
            self.store
                .inner
                .bookings
                .lock()
                .unwrap()
                .get(id.as_uuid())
                .cloned()
        })
    }
}

#[async_trait]
impl VerificationTxn for InMemoryTxn {
    async fn payment_for_update(
        &mut self,
        id: PaymentId,
    ) -> Result<Option<Payment>, PaymentError> {
        Ok(self.read_payment(id))
    }

    async fn mark_paid(&mut self, id: PaymentId) -> Result<Payment, PaymentError> {
        let mut payment = self
            .read_payment(id)
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;
        payment.payment_status = PaymentStatus::Paid;
        self.staged_payments.insert(*id.as_uuid(), payment.clone());
        Ok(payment)
    }

    async fn add_to_booking_paid(
        &mut self,
        booking_id: BookingId,
        amount: Money,
    ) -> Result<BookingSnapshot, PaymentError> {
        let mut record = self.read_booking(booking_id).ok_or_else(|| {
            PaymentError::internal(format!(
                "Failed to update booking {booking_id}: booking row missing"
            ))
        })?;

        record.booking.register_paid(amount);
        let snapshot = BookingSnapshot {
            booking_id,
            total_amount: record.booking.total_amount,
            paid_amount: record.booking.paid_amount,
            status: record.booking.status,
            min_down_payment: record.min_down_payment,
        };
        self.staged_bookings.insert(*booking_id.as_uuid(), record);
        Ok(snapshot)
    }

    async fn set_booking_status(
        &mut self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<(), PaymentError> {
        let mut record = self.read_booking(booking_id).ok_or_else(|| {
            PaymentError::internal(format!("Booking {booking_id} missing in scope"))
        })?;
        record.booking.status = status;
        self.staged_bookings.insert(*booking_id.as_uuid(), record);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PaymentError> {
        let mut payments = self.store.inner.payments.lock().unwrap();
        for (id, payment) in self.staged_payments {
            payments.insert(id, payment);
        }
        drop(payments);

        let mut bookings = self.store.inner.bookings.lock().unwrap();
        for (id, record) in self.staged_bookings {
            bookings.insert(id, record);
        }
        Ok(())
    }
}

/// In-memory upload store
///
/// References are sequentially numbered so tests can tell a raw reference
/// apart from a resolved URL.
#[derive(Default)]
pub struct InMemoryUploadStore {
    counter: AtomicU64,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files, for assertions
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UploadStore for InMemoryUploadStore {
    async fn store(&self, image: UploadedImage) -> Result<StoredFile, PaymentError> {
        if image.bytes.is_empty() {
            return Err(PaymentError::bad_request("Uploaded image is empty"));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let reference = format!("img-{n}");
        self.files.lock().unwrap().insert(reference.clone(), image.bytes);
        Ok(StoredFile { reference })
    }

    async fn resolve_url(&self, reference: &str) -> Result<String, PaymentError> {
        if !self.files.lock().unwrap().contains_key(reference) {
            return Err(PaymentError::internal(format!(
                "Unknown file reference: {reference}"
            )));
        }
        Ok(format!("https://files.test/{reference}"))
    }
}

/// An upload store that always fails, for rollback tests
pub struct FailingUploadStore;

#[async_trait]
impl UploadStore for FailingUploadStore {
    async fn store(&self, _image: UploadedImage) -> Result<StoredFile, PaymentError> {
        Err(PaymentError::internal("upload backend unavailable"))
    }

    async fn resolve_url(&self, _reference: &str) -> Result<String, PaymentError> {
        Err(PaymentError::internal("upload backend unavailable"))
    }
}

/// Convenience: a fresh user owning a booking on a fresh court and slot
pub fn seeded_booking(
    store: &InMemoryStore,
    total: Money,
    min_down_payment: Percent,
) -> (BookingId, UserId) {
    let court = Court::new("Court 1", min_down_payment);
    let starts_at = Utc::now();
    let slot = Slot::new(court.id, starts_at, starts_at + Duration::hours(1));

    let user_id = UserId::new_v7();
    let (booking, threshold) = BookingBuilder::new()
        .with_user(user_id)
        .with_slot(slot.id)
        .with_total(total)
        .with_min_down_payment(court.min_down_payment)
        .build();
    let booking_id = booking.id;
    store.add_booking(booking, threshold);
    (booking_id, user_id)
}
