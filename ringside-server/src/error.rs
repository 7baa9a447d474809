//! Engine errors as HTTP responses

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ringside_core::RingsideError;
use serde_json::json;

/// Wrapper so handlers can return `Result<_, ApiError>` and use `?`
#[derive(Debug)]
pub struct ApiError(pub RingsideError);

impl From<RingsideError> for ApiError {
    fn from(e: RingsideError) -> Self {
        Self(e)
    }
}

// Extractor rejections are bad input: they answer 400 with the same
// body as any other validation error.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(RingsideError::Validation {
            field: "body",
            message: rejection.body_text(),
        })
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(RingsideError::Validation {
            field: "path",
            message: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(RingsideError::Validation {
            field: "query",
            message: rejection.body_text(),
        })
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            RingsideError::Validation { .. } => StatusCode::BAD_REQUEST,
            RingsideError::NotFound(_) => StatusCode::NOT_FOUND,
            RingsideError::Conflict(_)
            | RingsideError::Duplicate(_)
            | RingsideError::Capacity
            | RingsideError::InsufficientParticipants(_) => StatusCode::CONFLICT,
            RingsideError::Eligibility { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!("Request failed ({}): {}", status, self.0);
        let body = Json(json!({
            "status": "error",
            "kind": self.0.kind(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
