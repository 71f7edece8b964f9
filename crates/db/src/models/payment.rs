//! Payment entity model.

use salonet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payments` table.
///
/// Provider wire protocols are out of scope; a payment's only effect on the
/// rest of the system is transitioning its appointment on completion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub appointment_id: Option<DbId>,
    pub provider: String,
    pub transaction_id: Option<String>,
    pub status: String,
    pub amount: f64,
    pub reference: String,
    pub created_at: Timestamp,
}
