use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ValidationError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,
    #[error("Logs not found")]
    LogsNotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User {0} exists without a log")]
    LogMissing(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Form(#[from] FormRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Kept at 200 for compatibility with existing clients
            ApiError::UserNotFound => StatusCode::OK,
            ApiError::LogsNotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::LogMissing(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Form(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::OK);
        assert_eq!(ApiError::LogsNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ValidationError::InvalidLimit("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::LogMissing(Uuid::nil()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(StoreError::Closed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_form_rejection_keeps_status_with_json_body() {
        use axum::{body::Body, extract::FromRequest, http::Request, Form};
        use std::collections::HashMap;

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"x"}"#))
            .unwrap();
        let rejection = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .unwrap_err();

        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].as_str().unwrap().contains("Content-Type"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::UserNotFound.to_string(), "User not found");
        assert_eq!(ApiError::LogsNotFound.to_string(), "Logs not found");
        assert_eq!(
            ApiError::from(ValidationError::MissingField("duration")).to_string(),
            "duration is required"
        );
    }
}
