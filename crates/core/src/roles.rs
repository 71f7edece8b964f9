//! Well-known role name constants.
//!
//! These must match the role values stored in the `users.role` column and
//! embedded in session token claims.

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_SALON: &str = "salon";
pub const ROLE_COIFFEUR: &str = "coiffeur";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Whether a role name grants platform-wide administrative access.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_SUPER_ADMIN
}
