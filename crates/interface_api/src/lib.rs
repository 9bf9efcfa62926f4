//! HTTP API Layer
//!
//! This crate provides the REST API for the court booking payments backend
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for payments and health
//! - **Middleware**: Authentication, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses mapped from the domain
//!   taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, uploads, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_payment::{PaymentManager, UploadStore, VerificationWorkflow};
use infra_db::{PgBookingRepository, PgPaymentRepository};

use crate::config::ApiConfig;
use crate::handlers::{health, payment};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub manager: Arc<PaymentManager>,
    pub verification: Arc<VerificationWorkflow>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// Wires the Postgres repositories and the upload store into the payment
/// manager and verification workflow, then mounts the routes.
pub fn create_router(pool: PgPool, uploads: Arc<dyn UploadStore>, config: ApiConfig) -> Router {
    let payments = Arc::new(PgPaymentRepository::new(pool.clone()));
    let bookings = Arc::new(PgBookingRepository::new(pool.clone()));

    let manager = Arc::new(PaymentManager::new(
        payments.clone(),
        bookings,
        uploads,
    ));
    let verification = Arc::new(VerificationWorkflow::new(payments));

    let state = AppState {
        pool,
        manager,
        verification,
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Payment routes
    let payment_routes = Router::new()
        .route("/", post(payment::create_payment))
        .route("/", get(payment::list_payments))
        .route("/:id", get(payment::get_payment))
        .route("/:id", put(payment::update_payment))
        .route("/:id", delete(payment::delete_payment))
        .route("/:id/image", post(payment::upload_payment_image))
        .route("/:id/verify", post(payment::verify_payment));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/payments", payment_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
