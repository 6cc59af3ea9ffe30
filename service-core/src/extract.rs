//! Request extractors that reject with [`AppError`] instead of axum's plain-text bodies.

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that is deserialized and then validated.
///
/// Syntax errors become 400, missing or mistyped fields 422, a wrong content
/// type 415, and failed `validator` rules 422. All carry a `{detail}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Greeting {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
    }

    async fn greet(ValidatedJson(greeting): ValidatedJson<Greeting>) -> String {
        format!("hello {}", greeting.name)
    }

    async fn post_json(body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/greet", post(greet));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/greet")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let (status, body) = post_json(r#"{"name":"ada"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello ada");
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        let (status, body) = post_json(r#"{}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("detail"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, _) = post_json(r#"{"name":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_rule_is_unprocessable_with_message() {
        let (status, body) = post_json(r#"{"name":""}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("name must not be empty"));
    }
}
