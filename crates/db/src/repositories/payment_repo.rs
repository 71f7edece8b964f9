//! Repository for the `payments` table.

use salonet_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::Payment;

const COLUMNS: &str =
    "id, appointment_id, provider, transaction_id, status, amount, reference, created_at";

/// Provides payment recording. The unique `uq_payments_reference` constraint
/// surfaces duplicate references as a 409 through the API error mapping.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a payment, returning the created row.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        appointment_id: Option<DbId>,
        provider: &str,
        transaction_id: Option<&str>,
        status: &str,
        amount: f64,
        reference: &str,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments \
                (appointment_id, provider, transaction_id, status, amount, reference) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(appointment_id)
            .bind(provider)
            .bind(transaction_id)
            .bind(status)
            .bind(amount)
            .bind(reference)
            .fetch_one(pool)
            .await
    }
}
