//! Handlers for the `/appointments` resource.
//!
//! Booking runs the conflict check and the write inside one transaction that
//! first takes the per-(coiffeur, date) advisory lock, so two concurrent
//! requests for the same slot serialize and at most one succeeds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use salonet_core::booking::{
    self, AppointmentStatus, ServiceQuote, CANCELLATION_WINDOW_HOURS,
};
use salonet_core::error::CoreError;
use salonet_core::kinds::KIND_BOOKING;
use salonet_core::policy::{appointment_access, AppointmentParties};
use salonet_core::roles::{ROLE_COIFFEUR, ROLE_SALON};
use salonet_core::timeslot::{
    self, availability_for_day, format_hhmm, parse_hhmm, DayHours, DEFAULT_STEP_MINUTES,
};
use salonet_core::types::DbId;
use salonet_db::models::appointment::{Appointment, AppointmentFilter, NewAppointment};
use salonet_db::repositories::{
    AppointmentRepo, CoiffeurRepo, SalonRepo, ServiceRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::{success, ApiResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /appointments`.
///
/// Clients may send either a single `service_id` or a `service_ids` list;
/// the first entry is the primary service stored on the appointment row.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub salon_id: DbId,
    pub service_id: Option<DbId>,
    pub service_ids: Option<Vec<DbId>>,
    pub coiffeur_id: Option<DbId>,
    /// Appointment date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Start of the slot, `HH:MM`.
    pub start_time: String,
    pub notes: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
}

/// Request body for `PATCH /appointments/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for `PATCH /appointments/{id}/assign-coiffeur`.
#[derive(Debug, Deserialize)]
pub struct AssignCoiffeurRequest {
    pub coiffeur_id: DbId,
}

/// Query parameters for `GET /appointments`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Filter by status, e.g. `CONFIRMED`.
    pub status: Option<String>,
    /// Inclusive lower bound on the date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the date.
    pub to: Option<NaiveDate>,
    /// `client` forces the caller's own bookings view regardless of role.
    pub scope: Option<String>,
}

/// Query parameters for `GET /appointments/availability/{coiffeur_id}`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub service_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/appointments
///
/// Book an appointment. With a requested coiffeur the slot is checked for
/// conflicts under the schedule lock and the booking lands as `PENDING`;
/// without one it lands as `PENDING_ASSIGNMENT` and the conflict check is
/// deferred to staff assignment.
pub async fn create_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateAppointmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Appointment>>)> {
    validate_contact(&input)?;

    let service_ids = requested_service_ids(&input)?;
    let primary_service_id = service_ids[0];

    let salon = SalonRepo::get(&state.pool, input.salon_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Salon",
            id: input.salon_id,
        })?;

    let services = ServiceRepo::list_for_salon_by_ids(&state.pool, salon.id, &service_ids).await?;
    if services.len() != service_ids.len() {
        let found: Vec<DbId> = services.iter().map(|s| s.id).collect();
        let missing: Vec<String> = service_ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(CoreError::Validation(format!(
            "Unknown services for this salon: {}",
            missing.join(", ")
        ))
        .into());
    }

    let quotes: Vec<ServiceQuote> = services
        .iter()
        .map(|s| ServiceQuote {
            duration_minutes: s.duration_minutes,
            price: s.price,
        })
        .collect();
    let (total_duration, total_price) = booking::quote_totals(&quotes);

    let start_time = parse_hhmm(&input.start_time)?;
    let end_time = timeslot::add_minutes(start_time, total_duration as u32)?;

    let notes = build_notes(input.notes.as_deref(), &services);

    let new = NewAppointment {
        client_id: user.user_id,
        salon_id: salon.id,
        coiffeur_id: input.coiffeur_id,
        service_id: primary_service_id,
        date: input.date,
        start_time,
        end_time,
        status: String::new(), // set below
        total_price,
        notes,
    };

    let appointment = match input.coiffeur_id {
        Some(coiffeur_id) => {
            let coiffeur = CoiffeurRepo::get(&state.pool, coiffeur_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Coiffeur",
                    id: coiffeur_id,
                })?;
            if coiffeur.salon_id != salon.id {
                return Err(CoreError::Validation(
                    "The requested coiffeur does not work at this salon".into(),
                )
                .into());
            }

            let mut tx = state.pool.begin().await?;
            AppointmentRepo::lock_schedule(&mut tx, coiffeur_id, input.date).await?;
            if AppointmentRepo::has_conflict(
                &mut tx, coiffeur_id, input.date, start_time, end_time, None,
            )
            .await?
            {
                return Err(AppError::ScheduleConflict(format!(
                    "The {} - {} slot on {} is no longer available",
                    format_hhmm(start_time),
                    format_hhmm(end_time),
                    input.date
                )));
            }

            let new = NewAppointment {
                status: AppointmentStatus::Pending.as_str().to_string(),
                ..new
            };
            let appointment = AppointmentRepo::insert(&mut tx, &new).await?;
            tx.commit().await?;
            appointment
        }
        None => {
            // No coiffeur requested: nothing occupies a calendar yet, so no
            // lock or conflict check is needed.
            let new = NewAppointment {
                status: AppointmentStatus::PendingAssignment.as_str().to_string(),
                ..new
            };
            let mut conn = state.pool.acquire().await?;
            AppointmentRepo::insert(&mut conn, &new).await?
        }
    };

    // The contact details travel with every booking and refresh the profile,
    // but only once the booking actually lands; a rejected slot must leave
    // the profile untouched.
    UserRepo::update_contact(
        &state.pool,
        user.user_id,
        input.first_name.trim(),
        input.last_name.trim(),
        input.phone.trim(),
        input.address.as_deref(),
    )
    .await?;

    tracing::info!(
        appointment_id = appointment.id,
        client_id = user.user_id,
        salon_id = salon.id,
        status = %appointment.status,
        "Appointment booked"
    );

    if salon.owner_id != user.user_id {
        state.dispatcher.notify_detached(
            salon.owner_id,
            KIND_BOOKING,
            format!(
                "New booking on {} at {}",
                appointment.date,
                format_hhmm(appointment.start_time)
            ),
        );
    }

    Ok((StatusCode::CREATED, success(appointment)))
}

/// GET /api/v1/appointments
///
/// List appointments in the caller's scope: admins see everything, salon
/// owners see their salon's bookings, coiffeurs see their own schedule, and
/// clients see their own bookings. `scope=client` forces the client view.
pub async fn list_appointments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Appointment>>>> {
    let filter = AppointmentFilter {
        status: match query.status {
            Some(raw) => Some(AppointmentStatus::parse(&raw)?.as_str().to_string()),
            None => None,
        },
        from: query.from,
        to: query.to,
    };

    let force_client_view = query.scope.as_deref() == Some("client");

    let appointments = if force_client_view {
        AppointmentRepo::list_for_client(&state.pool, user.user_id, &filter).await?
    } else if user.is_admin() {
        AppointmentRepo::list_all(&state.pool, &filter).await?
    } else if user.role == ROLE_SALON {
        match SalonRepo::get_by_owner(&state.pool, user.user_id).await? {
            Some(salon) => AppointmentRepo::list_for_salon(&state.pool, salon.id, &filter).await?,
            None => AppointmentRepo::list_for_client(&state.pool, user.user_id, &filter).await?,
        }
    } else if user.role == ROLE_COIFFEUR {
        match CoiffeurRepo::get_by_user(&state.pool, user.user_id).await? {
            Some(coiffeur) => {
                AppointmentRepo::list_for_coiffeur(&state.pool, coiffeur.id, &filter).await?
            }
            None => AppointmentRepo::list_for_client(&state.pool, user.user_id, &filter).await?,
        }
    } else {
        AppointmentRepo::list_for_client(&state.pool, user.user_id, &filter).await?
    };

    Ok(success(appointments))
}

/// GET /api/v1/appointments/{id}
pub async fn get_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let (appointment, salon) = load_appointment(&state, id).await?;
    require_access(&user, &appointment, &salon)?;
    Ok(success(appointment))
}

/// PATCH /api/v1/appointments/{id}/status
///
/// Update an appointment's lifecycle status. Admins may set any updatable
/// status; the salon owner manages their salon's bookings; clients may only
/// cancel. Non-admin updates must follow the lifecycle transition table.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let target = AppointmentStatus::parse_updatable(&input.status)?;

    let (appointment, salon) = load_appointment(&state, id).await?;
    require_access(&user, &appointment, &salon)?;

    let is_client = user.user_id == appointment.client_id && !user.is_admin();
    let is_owner = user.user_id == salon.owner_id;

    if is_client && !is_owner && target != AppointmentStatus::Cancelled {
        return Err(CoreError::Forbidden(
            "Clients may only cancel their appointments".into(),
        )
        .into());
    }

    let current = AppointmentStatus::parse(&appointment.status)?;
    if !user.is_admin() {
        current.validate_transition(target)?;
    }

    let updated = AppointmentRepo::set_status(&state.pool, id, target.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Appointment",
            id,
        })?;

    tracing::info!(
        appointment_id = id,
        from = %current.as_str(),
        to = %target.as_str(),
        actor = user.user_id,
        "Appointment status updated"
    );

    if user.user_id != appointment.client_id {
        state.dispatcher.notify_detached(
            appointment.client_id,
            KIND_BOOKING,
            format!(
                "Your appointment on {} is now {}",
                appointment.date,
                target.as_str()
            ),
        );
    }

    Ok(success(updated))
}

/// PATCH /api/v1/appointments/{id}/assign-coiffeur
///
/// Assign staff to a booking. Only the salon owner or an admin may assign.
/// The target coiffeur's schedule is conflict-checked under the lock before
/// the appointment moves to `CONFIRMED`.
pub async fn assign_coiffeur(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AssignCoiffeurRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let (appointment, salon) = load_appointment(&state, id).await?;

    if !user.is_admin() && user.user_id != salon.owner_id {
        return Err(CoreError::Forbidden(
            "Only the salon owner may assign a coiffeur".into(),
        )
        .into());
    }

    let current = AppointmentStatus::parse(&appointment.status)?;
    if current.is_terminal() {
        return Err(CoreError::Validation(format!(
            "Cannot assign a coiffeur to a {} appointment",
            current.as_str()
        ))
        .into());
    }

    let coiffeur = CoiffeurRepo::get(&state.pool, input.coiffeur_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Coiffeur",
            id: input.coiffeur_id,
        })?;
    if coiffeur.salon_id != salon.id {
        return Err(CoreError::Validation(
            "The coiffeur does not work at this salon".into(),
        )
        .into());
    }

    let mut tx = state.pool.begin().await?;
    AppointmentRepo::lock_schedule(&mut tx, coiffeur.id, appointment.date).await?;
    if AppointmentRepo::has_conflict(
        &mut tx,
        coiffeur.id,
        appointment.date,
        appointment.start_time,
        appointment.end_time,
        Some(appointment.id),
    )
    .await?
    {
        return Err(AppError::ScheduleConflict(format!(
            "The coiffeur already has an appointment overlapping {} - {} on {}",
            format_hhmm(appointment.start_time),
            format_hhmm(appointment.end_time),
            appointment.date
        )));
    }

    let updated = AppointmentRepo::assign_coiffeur(
        &mut tx,
        appointment.id,
        coiffeur.id,
        AppointmentStatus::Confirmed.as_str(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        appointment_id = id,
        coiffeur_id = coiffeur.id,
        actor = user.user_id,
        "Coiffeur assigned"
    );

    // The confirmation must be durable before the owner's request returns,
    // so the client sees it on their very next notification fetch.
    if let Err(e) = state
        .dispatcher
        .notify(
            appointment.client_id,
            KIND_BOOKING,
            &format!(
                "Your appointment on {} at {} is confirmed",
                appointment.date,
                format_hhmm(appointment.start_time)
            ),
        )
        .await
    {
        tracing::error!(
            client_id = appointment.client_id,
            error = %e,
            "Failed to persist assignment notification"
        );
    }

    Ok(success(updated))
}

/// DELETE /api/v1/appointments/{id}
///
/// Cancel a booking. Clients may cancel their own appointments up to two
/// hours before the start time; admins may cancel at any time.
pub async fn cancel_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let (appointment, salon) = load_appointment(&state, id).await?;

    let is_client = user.user_id == appointment.client_id;
    if !is_client && !user.is_admin() {
        return Err(CoreError::Forbidden(
            "Only the client or an administrator may cancel this appointment".into(),
        )
        .into());
    }

    let current = AppointmentStatus::parse(&appointment.status)?;
    if current.is_terminal() {
        return Err(CoreError::Validation(format!(
            "Appointment is already {}",
            current.as_str()
        ))
        .into());
    }

    if !user.is_admin()
        && !booking::cancellable_by_client(
            appointment.date,
            appointment.start_time,
            chrono::Utc::now(),
        )
    {
        return Err(CoreError::Validation(format!(
            "Appointments can only be cancelled more than {CANCELLATION_WINDOW_HOURS:.0} hours before the start time"
        ))
        .into());
    }

    let updated = AppointmentRepo::set_status(
        &state.pool,
        id,
        AppointmentStatus::Cancelled.as_str(),
    )
    .await?
    .ok_or(CoreError::NotFound {
        entity: "Appointment",
        id,
    })?;

    tracing::info!(appointment_id = id, actor = user.user_id, "Appointment cancelled");

    if user.user_id != salon.owner_id {
        state.dispatcher.notify_detached(
            salon.owner_id,
            KIND_BOOKING,
            format!(
                "Booking on {} at {} was cancelled",
                appointment.date,
                format_hhmm(appointment.start_time)
            ),
        );
    }

    Ok(success(updated))
}

/// GET /api/v1/appointments/availability/{coiffeur_id}
///
/// Public endpoint: the bookable slots of one coiffeur for a given date and
/// service. Closed days return an empty slot list with a reason, distinct
/// from a fully booked day.
pub async fn availability(
    State(state): State<AppState>,
    Path(coiffeur_id): Path<DbId>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let coiffeur = CoiffeurRepo::get(&state.pool, coiffeur_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Coiffeur",
            id: coiffeur_id,
        })?;

    let service = ServiceRepo::get(&state.pool, query.service_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Service",
            id: query.service_id,
        })?;
    if service.salon_id != coiffeur.salon_id {
        return Err(CoreError::Validation(
            "The service is not offered by this coiffeur's salon".into(),
        )
        .into());
    }

    // JS Date#getDay convention: 0 = Sunday .. 6 = Saturday.
    let day_of_week = query.date.weekday().num_days_from_sunday() as i16;
    let hours = match SalonRepo::hours_for_day(&state.pool, coiffeur.salon_id, day_of_week).await? {
        Some(row) if row.is_closed => DayHours::Closed,
        Some(row) => DayHours::Open {
            open: row.open_time,
            close: row.close_time,
        },
        None => DayHours::Unspecified,
    };

    let occupied =
        AppointmentRepo::occupied_intervals(&state.pool, coiffeur.id, query.date).await?;

    let result = availability_for_day(
        hours,
        &occupied,
        service.duration_minutes as u32,
        DEFAULT_STEP_MINUTES,
    );

    Ok(success(json!({
        "date": query.date,
        "slots": result.slots,
        "reason": result.reason.map(|r| r.message()),
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an appointment together with its salon.
pub(crate) async fn load_appointment(
    state: &AppState,
    id: DbId,
) -> AppResult<(Appointment, salonet_db::models::salon::Salon)> {
    let appointment = AppointmentRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Appointment",
            id,
        })?;
    let salon = SalonRepo::get(&state.pool, appointment.salon_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Salon",
            id: appointment.salon_id,
        })?;
    Ok((appointment, salon))
}

/// Reject callers who are neither a participant nor an admin.
pub(crate) fn require_access(
    user: &AuthUser,
    appointment: &Appointment,
    salon: &salonet_db::models::salon::Salon,
) -> AppResult<()> {
    let parties = AppointmentParties {
        client_id: appointment.client_id,
        salon_owner_id: salon.owner_id,
    };
    match appointment_access(user.user_id, &user.role, parties) {
        decision if decision.is_allowed() => Ok(()),
        _ => Err(CoreError::Forbidden(
            "You are not a participant in this appointment".into(),
        )
        .into()),
    }
}

fn validate_contact(input: &CreateAppointmentRequest) -> AppResult<()> {
    for (field, value) in [
        ("first_name", &input.first_name),
        ("last_name", &input.last_name),
        ("phone", &input.phone),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{field} must not be empty")).into());
        }
    }
    Ok(())
}

/// Resolve and dedupe the requested service ids, preserving order. The
/// first id is the primary service.
fn requested_service_ids(input: &CreateAppointmentRequest) -> AppResult<Vec<DbId>> {
    let mut ids: Vec<DbId> = match (&input.service_ids, input.service_id) {
        (Some(list), _) if !list.is_empty() => list.clone(),
        (_, Some(id)) => vec![id],
        _ => {
            return Err(CoreError::Validation(
                "At least one service must be selected".into(),
            )
            .into())
        }
    };
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });
    Ok(ids)
}

/// Combine client notes with a summary line of any additional services, so
/// the full selection survives on a row that stores one primary service id.
fn build_notes(
    client_notes: Option<&str>,
    services: &[salonet_db::models::service::Service],
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(notes) = client_notes {
        let trimmed = notes.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    if services.len() > 1 {
        let extra: Vec<&str> = services[1..].iter().map(|s| s.name.as_str()).collect();
        parts.push(format!("Additional services: {}", extra.join(", ")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(service_id: Option<DbId>, service_ids: Option<Vec<DbId>>) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            salon_id: 1,
            service_id,
            service_ids,
            coiffeur_id: None,
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            start_time: "10:00".to_string(),
            notes: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "+33612345678".to_string(),
            address: None,
        }
    }

    #[test]
    fn test_service_ids_list_takes_precedence() {
        let ids = requested_service_ids(&request(Some(9), Some(vec![3, 5]))).unwrap();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_single_service_id_fallback() {
        let ids = requested_service_ids(&request(Some(9), None)).unwrap();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn test_duplicate_service_ids_are_deduped() {
        let ids = requested_service_ids(&request(None, Some(vec![3, 5, 3, 5]))).unwrap();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_no_services_is_rejected() {
        let result = requested_service_ids(&request(None, Some(vec![])));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_contact_field_is_rejected() {
        let mut req = request(Some(1), None);
        req.phone = "   ".to_string();
        assert!(validate_contact(&req).is_err());
    }
}
