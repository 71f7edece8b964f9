//! HTTP request handlers, grouped by resource.

pub mod appointment;
pub mod chat;
pub mod health;
pub mod notification;
pub mod payment;
