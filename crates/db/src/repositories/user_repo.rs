//! Repository for the `users` table.

use salonet_core::types::DbId;
use sqlx::PgPool;

/// Provides the booking-flow profile update.
pub struct UserRepo;

impl UserRepo {
    /// Persist the contact fields supplied with a booking onto the client's
    /// profile. The address is only overwritten when provided.
    pub async fn update_contact(
        pool: &PgPool,
        id: DbId,
        first_name: &str,
        last_name: &str,
        phone: &str,
        address: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET first_name = $2, last_name = $3, phone = $4, \
             address = COALESCE($5, address), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(address)
        .execute(pool)
        .await?;
        Ok(())
    }
}
