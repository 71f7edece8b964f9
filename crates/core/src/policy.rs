//! Centralized access policy for appointment-scoped resources.
//!
//! Every handler that touches an appointment or its chat thread asks this
//! one function instead of re-deriving the predicate per route.

use crate::roles;
use crate::types::DbId;

/// Explicit access decision with a denial reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(&'static str),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }
}

/// The two parties of an appointment, from the resource's point of view.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentParties {
    pub client_id: DbId,
    pub salon_owner_id: DbId,
}

/// A user may access an appointment iff they are the client, the owning
/// salon's owner, or an admin/super-admin.
pub fn appointment_access(user_id: DbId, role: &str, parties: AppointmentParties) -> AccessDecision {
    if roles::is_admin(role)
        || user_id == parties.client_id
        || user_id == parties.salon_owner_id
    {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied("You are not a participant in this appointment")
    }
}
