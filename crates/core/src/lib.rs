//! Pure domain logic for the salon booking platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API/repository layer and any future worker or CLI tooling. It contains
//! the appointment state machine, the time-slot calculator, the interval
//! overlap predicate, the cancellation policy, and the shared appointment
//! access policy.

pub mod booking;
pub mod error;
pub mod kinds;
pub mod policy;
pub mod roles;
pub mod timeslot;
pub mod types;
