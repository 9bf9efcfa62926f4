//! Booking repository
//!
//! Read-side adapter the payment workflows use to see a booking's
//! financials, its payments, and the court threshold behind its slot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{BookingId, Money, Percent, PaymentId, UserId};
use domain_booking::BookingStatus;
use domain_payment::{
    BookingDetails, BookingReader, Payment, PaymentError, PaymentMethod, PaymentStatus,
};

use crate::error::DatabaseError;

/// SQLx-backed booking reader
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingDetailsRow {
    id: Uuid,
    user_id: Uuid,
    total_amount: Decimal,
    paid_amount: Decimal,
    status: String,
    min_down_payment: i32,
}

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

#[async_trait]
impl BookingReader for PgBookingRepository {
    async fn booking_details(&self, booking_id: BookingId) -> Result<BookingDetails, PaymentError> {
        let booking: BookingDetailsRow = sqlx::query_as(
            r#"
            SELECT b.id, b.user_id, b.total_amount, b.paid_amount, b.status,
                   c.min_down_payment
            FROM bookings b
            JOIN slots s ON s.id = b.slot_id
            JOIN courts c ON c.id = s.court_id
            WHERE b.id = $1
            "#,
        )
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?
        .ok_or_else(|| PaymentError::not_found(format!("Booking {booking_id} not found")))?;

        let payment_rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, booking_id, payment_amount, payment_method,
                   payment_status, payment_image_link, created_at
            FROM payments
            WHERE booking_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(booking_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        let status: BookingStatus = booking.status.parse().map_err(|_| {
            DatabaseError::SerializationError(format!(
                "Unknown booking status '{}' on booking {}",
                booking.status, booking.id
            ))
        })?;
        let min_down_payment = Percent::from_i32(booking.min_down_payment).map_err(|e| {
            DatabaseError::SerializationError(format!(
                "Invalid min_down_payment for booking {}: {e}",
                booking.id
            ))
        })?;

        let payments = payment_rows
            .into_iter()
            .map(|row| {
                let method: PaymentMethod = row.payment_method.parse().map_err(|_| {
                    DatabaseError::SerializationError(format!(
                        "Unknown payment method '{}' on payment {}",
                        row.payment_method, row.id
                    ))
                })?;
                let payment_status: PaymentStatus = row.payment_status.parse().map_err(|_| {
                    DatabaseError::SerializationError(format!(
                        "Unknown payment status '{}' on payment {}",
                        row.payment_status, row.id
                    ))
                })?;

                Ok(Payment {
                    id: PaymentId::from_uuid(row.id),
                    booking_id: BookingId::from_uuid(row.booking_id),
                    payment_amount: Money::new(row.payment_amount),
                    payment_method: method,
                    payment_status,
                    payment_image_link: row.payment_image_link,
                    created_at: row.created_at,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        Ok(BookingDetails {
            booking_id: BookingId::from_uuid(booking.id),
            user_id: UserId::from_uuid(booking.user_id),
            total_amount: Money::new(booking.total_amount),
            paid_amount: Money::new(booking.paid_amount),
            status,
            min_down_payment,
            payments,
        })
    }
}
