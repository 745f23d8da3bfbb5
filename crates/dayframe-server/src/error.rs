use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dayframe_auth::AuthError;
use dayframe_catalog::CatalogError;
use dayframe_service::ServiceError;
use dayframe_types::ValidationError;
use serde_json::json;

/// Startup and infrastructure errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Per-request failure, rendered as a structured JSON rejection.
///
/// Every failure yields a rejection with no partial state change; the
/// status code encodes the taxonomy and the body carries the message.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Malformed multipart body.
    Multipart(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Service(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Service(err.into())
    }
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::ProtectedRecord(_) => StatusCode::FORBIDDEN,
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::MissingBlob(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Auth(auth) => match auth {
            AuthError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AuthError::AuthenticationFailed
            | AuthError::InvalidToken(_)
            | AuthError::UnknownSubject(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ServiceError::Catalog(catalog) => match catalog {
            CatalogError::DateAlreadyExists(_) | CatalogError::DuplicateEmail(_) => {
                StatusCode::CONFLICT
            }
            CatalogError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ServiceError::Blob(blob) => match blob {
            dayframe_blob::BlobError::NotFound(_) => StatusCode::NOT_FOUND,
            dayframe_blob::BlobError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Service(err) => {
                let status = status_for(err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(error = %err, "request failed");
                }
                (status, err.to_string())
            }
            Self::Multipart(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayframe_types::ArtDate;

    fn date() -> ArtDate {
        ArtDate::from_ymd(2024, 5, 1).unwrap()
    }

    #[test]
    fn taxonomy_maps_to_statuses() {
        let cases: Vec<(ServiceError, StatusCode)> = vec![
            (
                ServiceError::ProtectedRecord(date()),
                StatusCode::FORBIDDEN,
            ),
            (
                ServiceError::Catalog(CatalogError::DateAlreadyExists(date())),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Catalog(CatalogError::ItemNotFound(date())),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::Auth(AuthError::InvalidToken("expired")),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::Auth(AuthError::AuthenticationFailed),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::Auth(AuthError::DuplicateEmail("a@x.com".into())),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Validation(ValidationError::InvalidDate("x".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::MissingBlob(date()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "wrong status for {err}");
        }
    }
}
