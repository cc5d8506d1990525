//! # Zerone Core
//!
//! The domain layer of the Zerone social backend: posts, tags, users,
//! pagination and the services that compose them.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use pagination::{Page, PageRequest};
