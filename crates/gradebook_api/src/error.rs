//! HTTP error mapping.
//!
//! Every error body is `{"detail": "<message>"}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gradebook_core::{ErrorKind, ServiceError};
use log::debug;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    /// Use-case failure from the records service.
    Service(ServiceError),
    /// Request could not be extracted (bad JSON, bad path parameter).
    Rejected { status: StatusCode, detail: String },
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err.kind() {
                ErrorKind::Conflict => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Rejected { detail, .. } => write!(f, "{detail}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

// Undecodable bodies and path parameters are validation failures (422),
// keeping 400 for conflicts.
impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        let status = match &value {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            other => other.status(),
        };
        Self::Rejected {
            status,
            detail: value.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        let status = match &value {
            PathRejection::FailedToDeserializePathParams(_) => StatusCode::UNPROCESSABLE_ENTITY,
            other => other.status(),
        };
        Self::Rejected {
            status,
            detail: value.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(
            "event=request_rejected module=api status_code={} error={}",
            status.as_u16(),
            self
        );
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use gradebook_core::{ModelValidationError, ServiceError};

    #[test]
    fn service_error_kinds_map_to_status_codes() {
        assert_eq!(
            ApiError::from(ServiceError::StudentExists(1)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ServiceError::NoResultsForTest(1)).status(),
            StatusCode::NOT_FOUND
        );
        let invalid = ServiceError::Invalid(ModelValidationError::NameLength {
            entity: "student",
            actual: 1,
            min: 2,
            max: 50,
        });
        assert_eq!(
            ApiError::from(invalid).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
