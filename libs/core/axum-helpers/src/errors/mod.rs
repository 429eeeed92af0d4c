pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use serde_path_to_error::Segment;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Standard error response structure.
///
/// Returned for all error responses:
/// - `code`: Integer error code for logging/monitoring (e.g., 1004)
/// - `error`: Machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Event with id 65f2a1c4e4b0a1b2c3d4e5f6 not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Server-side failures are logged with their full cause and answered with
/// the generic message of their [`ErrorCode`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Request body error: {0}")]
    BodyDeserialization(#[from] serde_path_to_error::Error<serde_json::Error>),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid ObjectId: {0}")]
    InvalidObjectId(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                opaque(ErrorCode::DatabaseError)
            }
            AppError::JsonExtractorRejection(e) => {
                let code = match &e {
                    JsonRejection::JsonDataError(_) => ErrorCode::ValidationError,
                    JsonRejection::JsonSyntaxError(_) => ErrorCode::InvalidJson,
                    _ => ErrorCode::JsonExtraction,
                };
                tracing::info!(error_code = code.code(), "JSON extraction error: {}", e);
                (e.status(), e.body_text(), None, code)
            }
            AppError::BodyDeserialization(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Request body error: {}",
                    e
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(deserialization_details(&e)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::InvalidObjectId(raw) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidObjectId.code(),
                    "Invalid ObjectId: {}",
                    raw
                );
                (
                    StatusCode::BAD_REQUEST,
                    format!("'{}' is not a valid ObjectId", raw),
                    None,
                    ErrorCode::InvalidObjectId,
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                opaque(ErrorCode::InternalError)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

fn opaque(code: ErrorCode) -> (StatusCode, String, Option<Value>, ErrorCode) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code.default_message().to_string(),
        None,
        code,
    )
}

/// Flatten validator errors into `{"field.path": [{code, message, params}]}`.
///
/// Nested structs are joined with `.`, list items with `[index]`.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut out = Map::new();
    collect_validation_errors(errors, None, &mut out);
    Value::Object(out)
}

fn collect_validation_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let entries: Vec<Value> = field_errors
                    .iter()
                    .map(|err| {
                        json!({
                            "code": err.code,
                            "message": err.message,
                            "params": err.params,
                        })
                    })
                    .collect();
                out.insert(path, Value::Array(entries));
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_validation_errors(inner, Some(&path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_validation_errors(inner, Some(&item_path), out);
                }
            }
        }
    }
}

/// Describe a body that does not fit its target type, in the same
/// `{"field.path": [{code, message}]}` shape as [`validation_details`].
///
/// A missing field is keyed by its own name with code `required`. Errors
/// that belong to no field are keyed `__all__`.
pub fn deserialization_details(error: &serde_path_to_error::Error<serde_json::Error>) -> Value {
    let mut path = String::new();
    for segment in error.path().iter() {
        match segment {
            Segment::Seq { index } => path.push_str(&format!("[{}]", index)),
            other => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(&other.to_string());
            }
        }
    }

    let message = error.inner().to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());

    let (key, code) = match missing {
        Some(field) if path.is_empty() => (field.to_string(), "required"),
        Some(field) => (format!("{}.{}", path, field), "required"),
        None if path.is_empty() => ("__all__".to_string(), "invalid"),
        None => (path, "invalid"),
    };

    let mut out = Map::new();
    out.insert(key, json!([{ "code": code, "message": message }]));
    Value::Object(out)
}

/// Helper function to create error responses.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::METHOD_NOT_ALLOWED,
///     "Use PATCH for updates".to_string(),
///     ErrorCode::MethodNotAllowed,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
