//! Success envelope shared by every endpoint.
//!
//! ```json
//! {"success": true, "message": "Order created successfully", "data": {...}}
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope; `message` and `data` are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope carrying only a payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Envelope carrying a payload and a human-readable message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Render with `200 OK`.
    pub fn ok(self) -> HttpResponse {
        self.respond(StatusCode::OK)
    }

    /// Render with `201 Created`.
    pub fn created(self) -> HttpResponse {
        self.respond(StatusCode::CREATED)
    }

    fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message, used by deletions.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}
