//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus any `Deserialize` DTOs used for inserts and
//! patches.

pub mod appointment;
pub mod chat_message;
pub mod coiffeur;
pub mod notification;
pub mod payment;
pub mod salon;
pub mod service;
