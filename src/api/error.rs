use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::error::RosterError;
use crate::models::ErrorResponse;

/// Everything a handler can fail with, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Query string missing a required field or not decodable.
    #[error("{0}")]
    InvalidQuery(String),

    /// Activity name segment that does not decode to UTF-8.
    #[error("{0}")]
    InvalidPath(String),

    #[error("Not Found")]
    RouteNotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Roster(RosterError::ActivityNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Roster(
                RosterError::AlreadyRegistered { .. }
                | RosterError::NotRegistered { .. }
                | RosterError::ActivityFull { .. },
            ) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Roster(e) => tracing::warn!(error = ?e, "Roster change refused"),
            Self::InvalidQuery(reason) => tracing::warn!("Rejected query: {}", reason),
            Self::InvalidPath(reason) => tracing::warn!("Rejected path: {}", reason),
            Self::RouteNotFound | Self::MethodNotAllowed => tracing::debug!("{}", self),
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
