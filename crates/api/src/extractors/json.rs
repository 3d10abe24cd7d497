//! JSON body extractor with the API's error shape.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like [`axum::Json`], but a body that fails to parse (including a missing
/// required field) becomes a 400 `{"error": ...}` instead of axum's plain-text
/// rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => err.body_text(),
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        #[allow(dead_code)]
        section_id: i64,
    }

    fn request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = ApiJson::<Probe>::from_request(request(r#"{"title":"x"}"#), &())
            .await
            .unwrap_err();
        match &err {
            ApiError::BadRequest(msg) => assert!(msg.contains("sectionId")),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = ApiJson::<Probe>::from_request(request("{not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("not valid JSON")));
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ApiJson(probe) = ApiJson::<Probe>::from_request(request(r#"{"sectionId":4}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.section_id, 4);
    }
}
