// HTTP API Error Types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Error codes shared with the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    AuthRequired,
    InvalidCredentials,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Conflict,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::AuthRequired => "AUTH_REQUIRED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Domain code for an HTTP status coming back from the upstream provider
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::ValidationError,
            401 => ErrorCode::InvalidCredentials,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            409 => ErrorCode::Conflict,
            _ => ErrorCode::InternalError,
        }
    }
}

/// Per-field validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// HTTP API error carrying a domain code, a client-safe message and a status
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub status: StatusCode,
    pub fields: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code,
            message: message.into(),
            status,
            fields: None,
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message, StatusCode::BAD_REQUEST)
    }

    pub fn validation_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::validation_error(message)
        }
    }

    pub fn invalid_json() -> Self {
        Self::validation_error("Invalid JSON payload")
    }

    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message, StatusCode::UNAUTHORIZED)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message, StatusCode::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, StatusCode::NOT_FOUND)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Error derived from an HTTP status: the code follows the status, the status is kept
    pub fn http(message: impl Into<String>, status: u16) -> Self {
        let status_code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(ErrorCode::from_status(status), message, status_code)
    }

    /// Upstream transport failures always surface as 502
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::http(message, 502)
    }

    pub fn to_json(&self) -> Value {
        let mut error = json!({
            "code": self.code,
            "message": self.message,
        });

        if let Some(fields) = &self.fields {
            error["fields"] = json!(fields);
        }

        json!({ "error": error })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code.as_str(), status = %self.status, "[API Error] {}", self.message);
        } else {
            tracing::warn!(code = self.code.as_str(), status = %self.status, "[API Error] {}", self.message);
        }

        let mut response = (self.status, Json(self.to_json())).into_response();
        // Read back by middleware::clear_dead_session
        response.extensions_mut().insert(self.code);
        response
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(_: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::invalid_json()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Unexpected error: {:?}", err);
        ApiError::internal("An unexpected error occurred")
    }
}

/// Body returned for verbs a route does not serve
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": { "message": "Method not allowed" } })),
    )
}

pub type ApiResult<T> = Result<T, ApiError>;
