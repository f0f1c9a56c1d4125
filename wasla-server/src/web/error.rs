//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::directory::DirectoryError;
use crate::nearest::{NearestError, ValidationError};

use super::dto::ErrorResponse;

/// Machine-readable failure codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingCoordinates,
    InvalidCoordinates,
    ServerError,
    StationsFetchFailed,
    NoStationsAvailable,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingCoordinates => "MISSING_COORDINATES",
            ErrorCode::InvalidCoordinates => "INVALID_COORDINATES",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::StationsFetchFailed => "STATIONS_FETCH_FAILED",
            ErrorCode::NoStationsAvailable => "NO_STATIONS_AVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::MissingCoordinates | ErrorCode::InvalidCoordinates => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::NoStationsAvailable => StatusCode::NOT_FOUND,
            ErrorCode::ServerError | ErrorCode::StationsFetchFailed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        let code = match e {
            ValidationError::MissingCoordinates => ErrorCode::MissingCoordinates,
            _ => ErrorCode::InvalidCoordinates,
        };
        AppError::new(code, e.to_string())
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        let code = if e.is_unreachable() {
            ErrorCode::ServerError
        } else if matches!(e, DirectoryError::Json { .. }) {
            ErrorCode::InternalError
        } else {
            ErrorCode::StationsFetchFailed
        };
        AppError::new(code, format!("failed to fetch stations: {e}"))
    }
}

impl From<NearestError> for AppError {
    fn from(e: NearestError) -> Self {
        match e {
            NearestError::Validation(v) => v.into(),
            NearestError::Upstream(d) => d.into(),
            NearestError::NotFound => {
                AppError::new(ErrorCode::NoStationsAvailable, NearestError::NotFound.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.status();

        if status.is_server_error() {
            tracing::error!(code = self.code.as_str(), "{}", self.message);
        } else {
            tracing::info!(code = self.code.as_str(), "{}", self.message);
        }

        let body = Json(ErrorResponse {
            success: false,
            message: self.message,
            code: self.code.as_str(),
        });
        (status, body).into_response()
    }
}
