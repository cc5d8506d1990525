//! Standardized API response types.
//!
//! Successful responses use [`CommonResponse`] for single items and
//! [`CommonListResponse`] for pages; errors are RFC 7807 problem details.

use serde::{Deserialize, Serialize};

/// Envelope around a single item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonResponse<T> {
    /// Epoch milliseconds at which the response was built.
    pub timestamp: i64,
    pub data: T,
}

impl<T> CommonResponse<T> {
    pub fn now(data: T) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            data,
        }
    }
}

/// Envelope around one page of items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonListResponse<T> {
    /// Number of matches across all pages.
    pub total: u64,
    #[serde(rename = "perPage")]
    pub per_page: u64,
    pub offset: u64,
    pub data: Vec<T>,
}

impl<T> CommonListResponse<T> {
    pub fn new(offset: u64, per_page: u64, total: u64, data: Vec<T>) -> Self {
        Self {
            total,
            per_page,
            offset,
            data,
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(403, "Forbidden").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_field_names() {
        let body = CommonListResponse::new(20, 10, 42, vec!["a", "b"]);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["total"], 42);
        assert_eq!(json["perPage"], 10);
        assert_eq!(json["offset"], 20);
        assert_eq!(json["data"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_single_envelope_is_stamped() {
        let before = chrono::Utc::now().timestamp_millis();
        let body = CommonResponse::now(5);
        assert!(body.timestamp >= before);
        assert_eq!(body.data, 5);
    }

    #[test]
    fn test_error_detail_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::unauthorized()).unwrap();
        assert_eq!(json["status"], 401);
        assert!(json.get("detail").is_none());
    }
}
