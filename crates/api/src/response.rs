//! Shared response envelope for API handlers.
//!
//! Every `/api` response, success or error, is shaped as
//! `{ status, data?, message, pagination?, code? }`. Use [`Envelope`]
//! instead of ad-hoc `serde_json::json!` so the shape stays consistent.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::listing::Pagination;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Envelope::success(product, "Product retrieved successfully"))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// HTTP status duplicated into the body; errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip)]
    http_status: StatusCode,
}

impl<T: Serialize> Envelope<T> {
    /// A 200 response carrying `data`.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: message.into(),
            pagination: None,
            code: None,
            http_status: StatusCode::OK,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.http_status = status;
        self
    }
}

impl Envelope<()> {
    /// A 200 response with a message and no `data` field.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            data: None,
            message: message.into(),
            pagination: None,
            code: None,
            http_status: StatusCode::OK,
        }
    }

    /// An error response; the numeric code mirrors the HTTP status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: message.into(),
            pagination: None,
            code: Some(status.as_u16()),
            http_status: status,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}
