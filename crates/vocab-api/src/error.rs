//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[derive(Debug)]
pub enum ApiError {
    Internal(vocab_core::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Machine-readable kind carried in the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Internal(_) => "internal",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "invalid_input",
            ApiError::Conflict(_) => "conflict",
        }
    }
}

impl From<vocab_core::Error> for ApiError {
    fn from(err: vocab_core::Error) -> Self {
        use vocab_core::Error;

        match &err {
            Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            Error::WordNotFound(_) => ApiError::NotFound("Word not found".to_string()),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            Error::Conflict(msg) => ApiError::Conflict(msg.clone()),
            Error::Database(sqlx::Error::Database(db_err)) => {
                if db_err.is_unique_violation() {
                    ApiError::Conflict(db_err.message().to_string())
                } else if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                    ApiError::BadRequest(db_err.message().to_string())
                } else {
                    ApiError::Internal(err)
                }
            }
            _ => ApiError::Internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let kind = self.kind();
        let message = match self {
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                err.to_string()
            }
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Conflict(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "error": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}
