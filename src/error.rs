// astro-report-service/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Unknown report type: {0}")]
    UnknownReportType(String),

    #[error("Failed to fetch natal data")]
    NatalDataUnavailable,

    #[error("Font resource unavailable: {0}")]
    FontUnavailable(String),

    #[error("PDF engine error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl ReportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReportError::MissingField(_)
            | ReportError::OutOfRange { .. }
            | ReportError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ReportError::UnknownReportType(_) => StatusCode::NOT_FOUND,
            ReportError::NatalDataUnavailable
            | ReportError::FontUnavailable(_)
            | ReportError::Pdf(_)
            | ReportError::Io(_)
            | ReportError::Serialization(_)
            | ReportError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            error_type: match self {
                ReportError::MissingField(_) => "missing_field",
                ReportError::OutOfRange { .. } => "out_of_range",
                ReportError::InvalidBody(_) => "invalid_body",
                ReportError::UnknownReportType(_) => "unknown_report_type",
                ReportError::NatalDataUnavailable => "natal_data_unavailable",
                ReportError::FontUnavailable(_) => "font_unavailable",
                ReportError::Pdf(_) => "pdf_error",
                ReportError::Io(_) => "io_error",
                ReportError::Serialization(_) => "serialization_error",
                ReportError::HttpClient(_) => "http_client_error",
            }
            .to_string(),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            ReportError::MissingField("lat".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReportError::OutOfRange {
                field: "hour".into(),
                reason: "must be within 0-23".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn structural_errors_map_to_500() {
        assert_eq!(
            ReportError::NatalDataUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ReportError::FontUnavailable("missing".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_field_names_the_field() {
        let resp = ReportError::MissingField("lat".into()).to_error_response();
        assert!(resp.error.contains("lat"));
        assert_eq!(resp.error_type, "missing_field");
    }
}
