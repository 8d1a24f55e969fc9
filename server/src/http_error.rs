use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use anothersky_core::backend::BackendError;

use crate::schema::ErrorView;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    /// The backend answered, but with an error payload
    pub fn bad_gateway(message: impl Into<String>) -> HttpError {
        HttpError {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// Tell axum how to convert `HttpError` into a response.
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorView {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<BackendError> for HttpError {
    fn from(err: BackendError) -> Self {
        let status = match err {
            BackendError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            BackendError::Request(_) | BackendError::Status(_) | BackendError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        HttpError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<tera::Error> for HttpError {
    fn from(_err: tera::Error) -> Self {
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Could not render the page"),
        }
    }
}

pub type ApiResult<T> = Result<T, HttpError>;

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}
