//! Payment repository and verification unit of work
//!
//! `PgPaymentRepository` implements the plain record operations
//! (`PaymentStore`) and opens verification scopes (`VerificationStore`).
//! The scope, `PgVerificationTxn`, holds one SQLx transaction: the payment
//! row is taken `FOR UPDATE`, so a concurrent verifier of the same payment
//! blocks until commit and then re-reads the terminal status.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use core_kernel::{BookingId, Money, Percent, PaymentId};
use domain_booking::BookingStatus;
use domain_payment::{
    BookingSnapshot, Payment, PaymentError, PaymentMethod, PaymentStatus, PaymentStore,
    VerificationStore, VerificationTxn,
};

use crate::error::DatabaseError;

/// Database row for a payment
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    booking_id: Uuid,
    payment_amount: Decimal,
    payment_method: String,
    payment_status: String,
    payment_image_link: Option<String>,
    created_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_domain(self) -> Result<Payment, DatabaseError> {
        let method: PaymentMethod = self
            .payment_method
            .parse()
            .map_err(|_| DatabaseError::SerializationError(format!(
                "Unknown payment method '{}' on payment {}",
                self.payment_method, self.id
            )))?;
        let status: PaymentStatus = self
            .payment_status
            .parse()
            .map_err(|_| DatabaseError::SerializationError(format!(
                "Unknown payment status '{}' on payment {}",
                self.payment_status, self.id
            )))?;

        Ok(Payment {
            id: PaymentId::from_uuid(self.id),
            booking_id: BookingId::from_uuid(self.booking_id),
            payment_amount: Money::new(self.payment_amount),
            payment_method: method,
            payment_status: status,
            payment_image_link: self.payment_image_link,
            created_at: self.created_at,
        })
    }
}

const PAYMENT_COLUMNS: &str =
    "id, booking_id, payment_amount, payment_method, payment_status, payment_image_link, created_at";

/// SQLx-backed payment repository
#[derive(Debug, Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStore for PgPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), PaymentError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, booking_id, payment_amount, payment_method,
                payment_status, payment_image_link, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.booking_id.as_uuid())
        .bind(payment.payment_amount.amount())
        .bind(payment.payment_method.as_str())
        .bind(payment.payment_status.as_str())
        .bind(&payment.payment_image_link)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    async fn update_amount_method(
        &self,
        id: PaymentId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Payment, PaymentError> {
        let row: PaymentRow = sqlx::query_as(&format!(
            r#"
            UPDATE payments
            SET payment_amount = $2, payment_method = $3
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(amount.amount())
        .bind(method.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?
        .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        Ok(row.into_domain()?)
    }

    async fn set_image_pending(
        &self,
        id: PaymentId,
        reference: &str,
    ) -> Result<Payment, PaymentError> {
        let row: PaymentRow = sqlx::query_as(&format!(
            r#"
            UPDATE payments
            SET payment_image_link = $2, payment_status = 'verification_pending'
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?
        .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        Ok(row.into_domain()?)
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, PaymentError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        row.map(|r| r.into_domain().map_err(PaymentError::from))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Payment>, PaymentError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(PaymentError::from))
            .collect()
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, PaymentError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE payment_status = $1 ORDER BY created_at"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(PaymentError::from))
            .collect()
    }
}

#[async_trait]
impl VerificationStore for PgPaymentRepository {
    async fn begin(&self) -> Result<Box<dyn VerificationTxn>, PaymentError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(Box::new(PgVerificationTxn { tx }))
    }
}

/// One verification transaction; rolls back on drop unless committed
struct PgVerificationTxn {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl VerificationTxn for PgVerificationTxn {
    async fn payment_for_update(
        &mut self,
        id: PaymentId,
    ) -> Result<Option<Payment>, PaymentError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        row.map(|r| r.into_domain().map_err(PaymentError::from))
            .transpose()
    }

    async fn mark_paid(&mut self, id: PaymentId) -> Result<Payment, PaymentError> {
        let row: PaymentRow = sqlx::query_as(&format!(
            r#"
            UPDATE payments
            SET payment_status = 'paid'
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?
        .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        Ok(row.into_domain()?)
    }

    async fn add_to_booking_paid(
        &mut self,
        booking_id: BookingId,
        amount: Money,
    ) -> Result<BookingSnapshot, PaymentError> {
        #[derive(sqlx::FromRow)]
        struct BookingRow {
            id: Uuid,
            slot_id: Uuid,
            total_amount: Decimal,
            paid_amount: Decimal,
            status: String,
        }

        let booking: BookingRow = sqlx::query_as(
            r#"
            UPDATE bookings
            SET paid_amount = paid_amount + $2
            WHERE id = $1
            RETURNING id, slot_id, total_amount, paid_amount, status
            "#,
        )
        .bind(booking_id.as_uuid())
        .bind(amount.amount())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?
        .ok_or_else(|| {
            PaymentError::internal(format!(
                "Failed to update booking {booking_id}: booking row missing"
            ))
        })?;

        let (min_down_payment,): (i32,) = sqlx::query_as(
            r#"
            SELECT c.min_down_payment
            FROM slots s
            JOIN courts c ON c.id = s.court_id
            WHERE s.id = $1
            "#,
        )
        .bind(booking.slot_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        let status: BookingStatus = booking.status.parse().map_err(|_| {
            DatabaseError::SerializationError(format!(
                "Unknown booking status '{}' on booking {}",
                booking.status, booking.id
            ))
        })?;
        let min_down_payment = Percent::from_i32(min_down_payment).map_err(|e| {
            DatabaseError::SerializationError(format!(
                "Invalid min_down_payment for booking {}: {e}",
                booking.id
            ))
        })?;

        Ok(BookingSnapshot {
            booking_id: BookingId::from_uuid(booking.id),
            total_amount: Money::new(booking.total_amount),
            paid_amount: Money::new(booking.paid_amount),
            status,
            min_down_payment,
        })
    }

    async fn set_booking_status(
        &mut self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<(), PaymentError> {
        sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
            .bind(booking_id.as_uuid())
            .bind(status.as_str())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PaymentError> {
        self.tx
            .commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        Ok(())
    }
}
