//! Repository for the `appointments` table.
//!
//! The conflict check and its subsequent insert/update must run inside one
//! transaction that first takes a per-(coiffeur, date) advisory lock via
//! [`AppointmentRepo::lock_schedule`]; two concurrent writers for the same
//! schedule then serialize and at most one can pass the check.

use chrono::{NaiveDate, NaiveTime};
use salonet_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::appointment::{Appointment, AppointmentFilter, NewAppointment};

/// Column list for `appointments` queries.
const COLUMNS: &str = "id, client_id, salon_id, coiffeur_id, service_id, date, \
     start_time, end_time, status, total_price, notes, created_at, updated_at";

/// Provides CRUD and scheduling operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Take the transaction-scoped advisory lock covering one coiffeur's
    /// calendar day. Released automatically at commit/rollback.
    pub async fn lock_schedule(
        conn: &mut PgConnection,
        coiffeur_id: DbId,
        date: NaiveDate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!("appointments:{coiffeur_id}:{date}"))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Whether any occupying appointment for the coiffeur on the date
    /// overlaps `[start, end)`. Cancelled and no-show appointments do not
    /// occupy the calendar. `exclude` skips the appointment being
    /// re-assigned.
    pub async fn has_conflict(
        conn: &mut PgConnection,
        coiffeur_id: DbId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM appointments \
                WHERE coiffeur_id = $1 AND date = $2 \
                  AND status NOT IN ('CANCELLED', 'NO_SHOW') \
                  AND start_time < $4 AND end_time > $3 \
                  AND ($5::bigint IS NULL OR id <> $5) \
             )",
        )
        .bind(coiffeur_id)
        .bind(date)
        .bind(start)
        .bind(end)
        .bind(exclude)
        .fetch_one(&mut *conn)
        .await
    }

    /// Insert a new appointment, returning the created row.
    pub async fn insert(
        conn: &mut PgConnection,
        new: &NewAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments \
                (client_id, salon_id, coiffeur_id, service_id, date, \
                 start_time, end_time, status, total_price, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(new.client_id)
            .bind(new.salon_id)
            .bind(new.coiffeur_id)
            .bind(new.service_id)
            .bind(new.date)
            .bind(new.start_time)
            .bind(new.end_time)
            .bind(&new.status)
            .bind(new.total_price)
            .bind(new.notes.as_deref())
            .fetch_one(&mut *conn)
            .await
    }

    /// Fetch one appointment by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an appointment's status, returning the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Assign a coiffeur and set the new status in one statement. Runs
    /// inside the caller's locked transaction.
    pub async fn assign_coiffeur(
        conn: &mut PgConnection,
        id: DbId,
        coiffeur_id: DbId,
        status: &str,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET coiffeur_id = $2, status = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(coiffeur_id)
            .bind(status)
            .fetch_one(&mut *conn)
            .await
    }

    /// The occupying `[start, end)` intervals of one coiffeur's day, for
    /// the slot calculator. Ordered by start time.
    pub async fn occupied_intervals(
        pool: &PgPool,
        coiffeur_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<(NaiveTime, NaiveTime)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT start_time, end_time FROM appointments \
             WHERE coiffeur_id = $1 AND date = $2 \
               AND status NOT IN ('CANCELLED', 'NO_SHOW') \
             ORDER BY start_time",
        )
        .bind(coiffeur_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// List the appointments booked by a client.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        Self::list_by("client_id", pool, client_id, filter).await
    }

    /// List the appointments of a salon.
    pub async fn list_for_salon(
        pool: &PgPool,
        salon_id: DbId,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        Self::list_by("salon_id", pool, salon_id, filter).await
    }

    /// List the appointments assigned to a coiffeur.
    pub async fn list_for_coiffeur(
        pool: &PgPool,
        coiffeur_id: DbId,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        Self::list_by("coiffeur_id", pool, coiffeur_id, filter).await
    }

    /// List every appointment (admin scope).
    pub async fn list_all(
        pool: &PgPool,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::date IS NULL OR date >= $2) \
               AND ($3::date IS NULL OR date <= $3) \
             ORDER BY date DESC, start_time DESC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(filter.status.as_deref())
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }

    async fn list_by(
        column: &str,
        pool: &PgPool,
        id: DbId,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments \
             WHERE {column} = $1 \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::date IS NULL OR date >= $3) \
               AND ($4::date IS NULL OR date <= $4) \
             ORDER BY date DESC, start_time DESC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(filter.status.as_deref())
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }
}
