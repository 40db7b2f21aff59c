use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::DashboardError;
use crate::server::page;

/// Error rendered as a single top-level message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Html(page::render_error(&self.message))).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::internal(format!("Error loading data: {err}"))
    }
}

impl From<farm_dashboard_common::Error> for ApiError {
    fn from(err: farm_dashboard_common::Error) -> Self {
        DashboardError::from(err).into()
    }
}
