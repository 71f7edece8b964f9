//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must participate in
//! a caller-owned transaction (the conflict check and its write) take
//! `&mut PgConnection` instead.

pub mod appointment_repo;
pub mod chat_repo;
pub mod coiffeur_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod salon_repo;
pub mod service_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use chat_repo::ChatRepo;
pub use coiffeur_repo::CoiffeurRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use salon_repo::SalonRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
