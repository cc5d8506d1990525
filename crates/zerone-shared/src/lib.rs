//! # Zerone Shared
//!
//! Wire types shared by the API server and its clients: request bodies,
//! query strings, response DTOs and the response envelopes.

pub mod dto;
pub mod query;
pub mod response;

pub use response::{CommonListResponse, CommonResponse, ErrorResponse};
