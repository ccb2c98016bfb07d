use std::fmt;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use devcamp_lists::ListError;

#[derive(Debug)]
pub enum ApiError {
    List(ListError),
    Body(JsonRejection),
    Query(QueryRejection),
    Timeout,
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::List(e) => e.status_code(),
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::List(e) => write!(f, "{e}"),
            ApiError::Body(rejection) => write!(f, "{}", rejection.body_text()),
            ApiError::Query(rejection) => write!(f, "{}", rejection.body_text()),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ListError> for ApiError {
    fn from(e: ListError) -> Self {
        ApiError::List(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Query(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{message}");
        } else {
            tracing::debug!(status = status.as_u16(), "{message}");
        }

        let body = serde_json::json!({ "success": false, "error": message });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::Query;
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn query_rejection_renders_error_body() {
        let uri = "/api/v1/bootcamps?page=two".parse().unwrap();
        let rejection = Query::<HashMap<String, u32>>::try_from_uri(&uri).unwrap_err();

        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("query string"));
    }
}
