//! Erros da camada HTTP.
//!
//! Todo erro vira uma resposta JSON `{ "error": "..." }` com o status
//! correspondente.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no file uploaded")]
    NoFile,

    #[error("could not read file")]
    Unreadable(#[from] MultipartError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFile | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unreadable(e) => e.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_400() {
        assert_eq!(ApiError::NoFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoFile.to_string(), "no file uploaded");
        assert_eq!(
            ApiError::BadRequest("limit must be positive".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn renders_json_error_body() {
        let resp = ApiError::NoFile.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "no file uploaded");
    }
}
