//! Background workers.

mod notifications;

pub use notifications::start_notification_workers;
