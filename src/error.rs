use crate::maud_conveniences::error_alert;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrarError {
    #[snafu(display("Unable to reach the records service for {method} {path}"))]
    Transport {
        source: reqwest::Error,
        method: String,
        path: String,
    },
    #[snafu(display("Records service answered {status} for {path}: {message}"))]
    Api {
        status: u16,
        message: String,
        path: String,
    },
    #[snafu(display("Unable to read the records service response for {path}"))]
    Decode {
        source: reqwest::Error,
        path: String,
    },
    #[snafu(display("Unable to build the HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("{label} is required"))]
    MissingRequiredField { label: &'static str },
    #[snafu(display("Please select both a student and a course"))]
    IncompleteSelection,
    #[snafu(display("{label} must be a record id, got {original:?}"))]
    ParseRecordId {
        source: ParseIntError,
        label: &'static str,
        original: String,
    },
    #[snafu(display("Unable to parse date {original:?}"))]
    ParseDate {
        source: jiff::Error,
        original: String,
    },
    #[snafu(display("This form has no valid submission token, close it and open it again"))]
    InvalidSubmissionToken {
        source: uuid::Error,
        original: String,
    },
    #[snafu(display("This form is already being submitted"))]
    SubmissionInProgress { token: Uuid },
    #[snafu(display("Unable to retrieve env var `{name}`"))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{name}` as a number"))]
    ParseNumberEnvVar {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unknown time zone {name:?}"))]
    InvalidTimezone { source: jiff::Error, name: String },
}

impl RegistrarError {
    /// Whether the error was raised before any request left the console.
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. }
                | Self::IncompleteSelection
                | Self::ParseRecordId { .. }
                | Self::ParseDate { .. }
                | Self::InvalidSubmissionToken { .. }
                | Self::SubmissionInProgress { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //backend misbehaved
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::Transport { source, .. } if source.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport { .. } | Self::Decode { .. } => BG,
            Self::Api { status, .. } => StatusCode::from_u16(*status).unwrap_or(BG),
            Self::BuildClient { .. } => ISE,
            Self::MissingRequiredField { .. }
            | Self::IncompleteSelection
            | Self::ParseRecordId { .. }
            | Self::ParseDate { .. }
            | Self::InvalidSubmissionToken { .. } => BI,
            Self::SubmissionInProgress { .. } => StatusCode::CONFLICT,
            Self::BadEnvVar { .. } | Self::ParseNumberEnvVar { .. } => ISE,
            Self::InvalidTimezone { .. } => ISE,
        }
    }
}

impl IntoResponse for RegistrarError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        error!(?self, "Error!");
        (status_code, error_alert(self.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_local() {
        assert!(RegistrarError::IncompleteSelection.is_local());
        assert!(RegistrarError::MissingRequiredField { label: "Title" }.is_local());
        assert!(
            !RegistrarError::Api {
                status: 500,
                message: String::new(),
                path: "/students".into()
            }
            .is_local()
        );
    }

    #[test]
    fn api_status_passes_through() {
        let err = RegistrarError::Api {
            status: 404,
            message: "Student not found".into(),
            path: "/students/9".into(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "Records service answered 404 for /students/9: Student not found"
        );
    }

    #[test]
    fn missing_field_names_the_label() {
        let err = RegistrarError::MissingRequiredField { label: "Email" };
        assert_eq!(err.to_string(), "Email is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
