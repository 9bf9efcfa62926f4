//! Payment handlers

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{BookingId, Money, PaymentId, UserId};
use domain_payment::{
    NewPayment, PaymentMethod, PaymentStatus, PaymentUpdate, UploadedImage,
};

use crate::auth::{has_role, roles, Claims};
use crate::dto::payment::*;
use crate::error::ApiError;
use crate::AppState;

/// Creates a payment against a booking
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let method: PaymentMethod = request.payment_method.parse().map_err(ApiError::from)?;

    let payment = state
        .manager
        .create(NewPayment {
            booking_id: BookingId::from_uuid(request.booking_id),
            payment_amount: Money::new(request.payment_amount),
            payment_method: method,
        })
        .await?;

    Ok(Json(payment.into()))
}

/// Lists payments, optionally filtered by status
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let payments = match query.status {
        Some(raw) => {
            let status: PaymentStatus = raw.parse().map_err(ApiError::from)?;
            state.manager.list_by_status(status).await?
        }
        None => state.manager.list().await?,
    };

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Gets a payment by id; a stored image reference comes back as a URL
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = state.manager.get(PaymentId::from_uuid(id)).await?;
    Ok(Json(payment.into()))
}

/// Amends an unpaid payment's amount and method
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let method: PaymentMethod = request.payment_method.parse().map_err(ApiError::from)?;

    let payment = state
        .manager
        .update(
            PaymentId::from_uuid(id),
            PaymentUpdate {
                booking_id: BookingId::from_uuid(request.booking_id),
                payment_amount: Money::new(request.payment_amount),
                payment_method: method,
            },
        )
        .await?;

    Ok(Json(payment.into()))
}

/// Uploads a proof-of-payment image for the authenticated user's booking
pub async fn upload_payment_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<PaymentResponse>, ApiError> {
    let uploader: Uuid = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized)?;

    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(|c| c.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {e}")))?;

            image = Some(UploadedImage {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
            break;
        }
    }

    let image = image.ok_or_else(|| {
        ApiError::BadRequest("Multipart field 'image' is required".to_string())
    })?;

    let payment = state
        .manager
        .upload_image(PaymentId::from_uuid(id), UserId::from_uuid(uploader), image)
        .await?;

    Ok(Json(payment.into()))
}

/// Verifies a payment, settling the owning booking atomically
pub async fn verify_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    if !has_role(&claims, roles::OPERATOR) {
        return Err(ApiError::Forbidden(
            "Only operators may verify payments".to_string(),
        ));
    }

    let outcome = state.verification.verify(&id).await?;

    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified successfully".to_string(),
        payment: outcome.payment.into(),
        booking: outcome.booking.into(),
    }))
}

/// Reserved; deletion semantics are not specified yet
pub async fn delete_payment(Path(_id): Path<Uuid>) -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}
