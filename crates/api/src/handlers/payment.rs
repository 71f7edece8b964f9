//! Handlers for the `/payments` resource.
//!
//! Payments are recorded after an external provider round-trip; recording a
//! completed (or pay-on-site) payment also advances the appointment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use salonet_core::booking::AppointmentStatus;
use salonet_core::error::CoreError;
use salonet_core::types::DbId;
use salonet_db::models::payment::Payment;
use salonet_db::repositories::{AppointmentRepo, PaymentRepo};

use crate::error::AppResult;
use crate::handlers::appointment::{load_appointment, require_access};
use crate::middleware::AuthUser;
use crate::response::{success, ApiResponse};
use crate::state::AppState;

/// Payment statuses accepted on recording.
const PAYMENT_STATUSES: [&str; 3] = ["PENDING", "COMPLETED", "ON_SITE"];

/// Request body for `POST /payments`.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub appointment_id: Option<DbId>,
    pub provider: String,
    pub transaction_id: Option<String>,
    pub status: String,
    pub amount: f64,
    /// Client-generated idempotency reference; duplicates are rejected
    /// with 409.
    pub reference: String,
}

/// POST /api/v1/payments
///
/// Record a payment. A `COMPLETED` payment confirms the appointment; an
/// `ON_SITE` payment marks it as confirmed with payment due at the salon.
pub async fn record_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RecordPaymentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Payment>>)> {
    if !PAYMENT_STATUSES.contains(&input.status.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid payment status '{}'. Valid values: {}",
            input.status,
            PAYMENT_STATUSES.join(", ")
        ))
        .into());
    }
    if input.amount < 0.0 {
        return Err(CoreError::Validation("Amount must not be negative".into()).into());
    }
    if input.reference.trim().is_empty() {
        return Err(CoreError::Validation("A payment reference is required".into()).into());
    }

    if let Some(appointment_id) = input.appointment_id {
        let (appointment, salon) = load_appointment(&state, appointment_id).await?;
        require_access(&user, &appointment, &salon)?;
    }

    let payment = PaymentRepo::create(
        &state.pool,
        input.appointment_id,
        input.provider.trim(),
        input.transaction_id.as_deref(),
        &input.status,
        input.amount,
        input.reference.trim(),
    )
    .await?;

    tracing::info!(
        payment_id = payment.id,
        appointment_id = ?payment.appointment_id,
        status = %payment.status,
        "Payment recorded"
    );

    // A settled payment advances the appointment when the lifecycle allows.
    if let Some(appointment_id) = payment.appointment_id {
        let target = match payment.status.as_str() {
            "COMPLETED" => Some(AppointmentStatus::Confirmed),
            "ON_SITE" => Some(AppointmentStatus::ConfirmedOnSite),
            _ => None,
        };
        if let Some(target) = target {
            if let Some(appointment) = AppointmentRepo::get(&state.pool, appointment_id).await? {
                let current = AppointmentStatus::parse(&appointment.status)?;
                if current.can_transition(target) {
                    AppointmentRepo::set_status(&state.pool, appointment_id, target.as_str())
                        .await?;
                    tracing::info!(
                        appointment_id,
                        to = %target.as_str(),
                        "Appointment advanced by payment"
                    );
                }
            }
        }
    }

    Ok((StatusCode::CREATED, success(payment)))
}
