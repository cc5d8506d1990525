//! # Zerone Infrastructure
//!
//! Concrete implementations of the ports defined in `zerone-core`:
//! SeaORM repositories, the in-memory store, JWT/Argon2 auth and the
//! notification queue.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external database, in-memory store only

pub mod auth;
pub mod config;
pub mod database;
pub mod memory;
pub mod notify;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use config::env_or;
pub use database::DatabaseConfig;
pub use memory::MemoryStore;
pub use notify::{NotificationQueue, NotificationQueueConfig};
