//! Payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_payment::{BookingSnapshot, Payment};

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub booking_id: Uuid,
    pub payment_amount: Decimal,
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub booking_id: Uuid,
    pub payment_amount: Decimal,
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub payment_amount: Decimal,
    pub payment_method: String,
    pub payment_status: String,
    /// Raw storage reference, or a resolved URL on single-payment reads
    pub payment_image_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: *payment.id.as_uuid(),
            booking_id: *payment.booking_id.as_uuid(),
            payment_amount: payment.payment_amount.amount(),
            payment_method: payment.payment_method.as_str().to_string(),
            payment_status: payment.payment_status.as_str().to_string(),
            payment_image_link: payment.payment_image_link,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: String,
    pub min_down_payment: u8,
}

impl From<BookingSnapshot> for BookingResponse {
    fn from(booking: BookingSnapshot) -> Self {
        Self {
            id: *booking.booking_id.as_uuid(),
            total_amount: booking.total_amount.amount(),
            paid_amount: booking.paid_amount.amount(),
            status: booking.status.as_str().to_string(),
            min_down_payment: booking.min_down_payment.value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub message: String,
    pub payment: PaymentResponse,
    pub booking: BookingResponse,
}
