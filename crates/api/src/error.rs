use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portal_cms_core::{StoreError, ValidationError};
use serde_json::json;

/// Handler error, rendered as `{"error": {type, message, statusCode}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be read: bad JSON, query string or form body.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("upload failed: {0}")]
    Io(#[from] std::io::Error),
}

macro_rules! rejection {
    ($($rejection:ty),+) => {
        $(impl From<$rejection> for ApiError {
            fn from(err: $rejection) -> Self {
                ApiError::Rejected {
                    status: err.status(),
                    message: err.body_text(),
                }
            }
        })+
    };
}

rejection!(JsonRejection, QueryRejection, MultipartError, MultipartRejection);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Store(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Store(StoreError::NotFound { .. }) => "notFound",
            ApiError::Store(StoreError::Validation(_)) => "validationFailed",
            ApiError::Rejected { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                "payloadTooLarge"
            }
            ApiError::Rejected { .. } => "badRequest",
            _ => "internalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            match &self {
                ApiError::Store(StoreError::Validation(err)) => err.to_string(),
                ApiError::Rejected { message, .. } => message.clone(),
                other => other.to_string(),
            }
        };

        let body = json!({
            "error": {
                "type": self.kind(),
                "message": message,
                "statusCode": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
