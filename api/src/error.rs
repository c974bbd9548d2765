//! Unified error types for the galnang API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Catalog store errors
//! - `GeocodeError`: Kakao geocoding client errors
//! - `StorageError`: Object store client errors
//! - `AuthError`: Auth gateway client errors
//! - `AppError`: Action layer errors, rendered as the failure result shape

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - raised by repositories
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Geocoding API errors
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No result for address: {0}")]
    NoResult(String),

    #[error("Invalid coordinates: x={x}, y={y}")]
    InvalidCoordinates { x: String, y: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Object store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Auth gateway errors. A rejected token is not an error; it yields no identity.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Failure taxonomy of the action result shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    InternalServerError,
    BadGateway,
}

impl ErrorType {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorType::BadRequest => StatusCode::BAD_REQUEST,
            ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::Conflict => StatusCode::CONFLICT,
            ErrorType::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::BadGateway => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Application layer errors - used by services and HTTP handlers.
///
/// `message` fields hold the localized, user-facing summary; `details` holds
/// the technical cause.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Geocoding error: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
            details: None,
        }
    }

    /// Internal failure with a user-facing summary and the technical cause
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            details: Some(cause.to_string()),
        }
    }

    /// Replace the generic message of a store/runtime failure with an
    /// action-specific one. Other errors keep their own message.
    pub fn or_internal(self, message: &str) -> Self {
        match self {
            AppError::Domain(DomainError::Database(cause)) => AppError::Internal {
                message: message.to_string(),
                details: Some(cause),
            },
            AppError::Storage(e) => AppError::internal(message, e),
            AppError::Internal { details, .. } => AppError::Internal {
                message: message.to_string(),
                details,
            },
            other => other,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            AppError::Domain(DomainError::NotFound(_)) => ErrorType::NotFound,
            AppError::Domain(DomainError::Validation(_)) => ErrorType::BadRequest,
            AppError::Domain(DomainError::Conflict(_)) => ErrorType::Conflict,
            AppError::Domain(DomainError::Database(_)) => ErrorType::InternalServerError,
            AppError::Geocode(GeocodeError::NoResult(_)) => ErrorType::NotFound,
            AppError::Geocode(GeocodeError::InvalidCoordinates { .. }) => {
                ErrorType::InternalServerError
            }
            AppError::Geocode(_) => ErrorType::BadGateway,
            AppError::Storage(_) => ErrorType::InternalServerError,
            AppError::Auth(_) => ErrorType::BadGateway,
            AppError::BadRequest(_) => ErrorType::BadRequest,
            AppError::Unauthorized => ErrorType::Unauthorized,
            AppError::NotFound { .. } => ErrorType::NotFound,
            AppError::Conflict(_) => ErrorType::Conflict,
            AppError::Internal { .. } => ErrorType::InternalServerError,
        }
    }

    /// Localized summary shown to the end user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Domain(DomainError::NotFound(_)) => "대상을 찾을 수 없습니다.".to_string(),
            AppError::Domain(DomainError::Validation(msg)) => msg.clone(),
            AppError::Domain(DomainError::Conflict(_)) => {
                "이미 동일한 데이터가 등록되어 있습니다.".to_string()
            }
            AppError::Domain(DomainError::Database(_)) => {
                "서버 내부 오류가 발생했습니다.".to_string()
            }
            AppError::Geocode(GeocodeError::Api { status, .. }) => {
                format!("지오코딩 실패 (HTTP {})", status)
            }
            AppError::Geocode(GeocodeError::NoResult(_)) => "주소 결과 없음".to_string(),
            AppError::Geocode(GeocodeError::InvalidCoordinates { .. }) => {
                "좌표 파싱 실패".to_string()
            }
            AppError::Geocode(_) => "지오코딩 요청 오류".to_string(),
            AppError::Storage(_) => "이미지 업로드 중 오류가 발생했습니다.".to_string(),
            AppError::Auth(_) => "인증 서버와 통신하지 못했습니다.".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Unauthorized => "로그인이 필요합니다.".to_string(),
            AppError::NotFound { message, .. } => message.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Internal { message, .. } => message.clone(),
        }
    }

    /// Technical detail attached next to the user message
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Domain(DomainError::Database(msg))
            | AppError::Domain(DomainError::NotFound(msg))
            | AppError::Domain(DomainError::Conflict(msg)) => Some(msg.clone().into()),
            AppError::Geocode(e) => match e {
                GeocodeError::Api { message, .. } if message.is_empty() => None,
                GeocodeError::Api { message, .. } => Some(message.clone().into()),
                GeocodeError::NoResult(_) => None,
                other => Some(other.to_string().into()),
            },
            AppError::Storage(e) => Some(e.to_string().into()),
            AppError::Auth(e) => Some(e.to_string().into()),
            AppError::NotFound { details, .. } => details.clone(),
            AppError::Internal { details, .. } => details.clone().map(Into::into),
            _ => None,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(format!("요청 본문을 읽지 못했습니다: {}", e.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest(format!("조회 조건이 올바르지 않습니다: {}", e.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::BadRequest(format!("폼 데이터를 읽지 못했습니다: {}", e.body_text()))
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::BadRequest(format!("폼 데이터를 읽지 못했습니다: {}", e.body_text()))
    }
}

/// Failure body: `{ ok: false, type, message, details? }`
#[derive(Debug, Serialize)]
pub struct ActionFailure {
    pub ok: bool,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ActionFailure {
    fn from(e: &AppError) -> Self {
        ActionFailure {
            ok: false,
            error_type: e.error_type(),
            message: e.user_message(),
            details: e.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_type = self.error_type();

        match error_type {
            ErrorType::InternalServerError | ErrorType::BadGateway => {
                tracing::error!(error = %self, "Action failed");
            }
            _ => {
                tracing::debug!(error = %self, "Action rejected");
            }
        }

        let body = ActionFailure::from(&self);
        (error_type.status(), Json(body)).into_response()
    }
}
