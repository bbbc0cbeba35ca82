use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fyyur_db::StoreError;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no route for {0}")]
    RouteNotFound(String),

    /// Request could not be decoded. `part` names the piece that failed.
    #[error("malformed {part}: {message}")]
    Malformed {
        part: &'static str,
        message: String,
    },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            part: "body",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed {
            part: "path",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed {
            part: "query",
            message: rejection.body_text(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Validation(_)) | ApiError::Malformed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::NotFound { .. }) | ApiError::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(StoreError::Validation(_)) | ApiError::Malformed { .. } => {
                "VALIDATION_ERROR"
            }
            ApiError::Store(StoreError::NotFound { .. }) | ApiError::RouteNotFound(_) => {
                "NOT_FOUND"
            }
            ApiError::Store(e) if e.is_integrity() => "INTEGRITY_ERROR",
            ApiError::Store(_) => "DATABASE_ERROR",
        }
    }

    /// Message safe to show to the caller. Server-side failures never leak
    /// driver details.
    fn public_message(&self) -> String {
        match self {
            ApiError::Store(StoreError::Validation(_)) | ApiError::Malformed { .. } => {
                "Some fields are invalid".to_string()
            }
            ApiError::Store(e @ StoreError::NotFound { .. }) => e.to_string(),
            ApiError::RouteNotFound(_) => "Page not found".to_string(),
            ApiError::Store(StoreError::DuplicateName { entity, .. }) => {
                format!("An error occurred. The {entity} could not be saved.")
            }
            ApiError::Store(StoreError::MissingReference { .. }) => {
                "An error occurred. The show could not be listed.".to_string()
            }
            ApiError::Store(_) => "An internal error occurred".to_string(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            ApiError::Store(StoreError::Validation(fields)) => serde_json::to_value(fields).ok(),
            ApiError::Malformed { part, message } => {
                Some(json!([{ "field": part, "message": message }]))
            }
            _ => None,
        }
    }

    fn log(&self) {
        match self {
            ApiError::Store(StoreError::Database(e)) => {
                tracing::error!(error = ?e, "database error");
            }
            ApiError::Store(e) if e.is_integrity() => {
                tracing::error!(error = %e, "integrity violation, change rolled back");
            }
            other => {
                tracing::debug!(error = %other, "request rejected");
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.public_message(),
                details: self.details(),
            },
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyyur_db::sea_orm::DbErr;
    use fyyur_db::FieldError;
    use uuid::Uuid;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from(StoreError::Validation(vec![FieldError::new(
            "name",
            "is required",
        )]));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        let details = err.details().unwrap();
        assert_eq!(details[0]["field"], "name");
        assert_eq!(details[0]["message"], "is required");
    }

    #[test]
    fn test_malformed_request_is_validation_error() {
        let err = ApiError::Malformed {
            part: "body",
            message: "start_time: premature end of input".into(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        let details = err.details().unwrap();
        assert_eq!(details[0]["field"], "body");
        assert!(details[0]["message"]
            .as_str()
            .unwrap()
            .contains("start_time"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound {
            entity: "venue",
            id: Uuid::nil(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.public_message().starts_with("venue not found"));
        assert_eq!(
            ApiError::RouteNotFound("/nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_integrity_maps_to_generic_server_error() {
        let err = ApiError::from(StoreError::DuplicateName {
            entity: "artist",
            name: "Guns N Petals".into(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTEGRITY_ERROR");
        assert!(!err.public_message().contains("Guns N Petals"));
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = ApiError::from(StoreError::Database(DbErr::Custom(
            "password authentication failed".into(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert!(!err.public_message().contains("password"));
        assert!(err.details().is_none());
    }
}
