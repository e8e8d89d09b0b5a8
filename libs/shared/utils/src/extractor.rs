use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use shared_models::error::AppError;

use crate::validation::Validate;

/// JSON body extractor that rejects malformed, incomplete or unknown-field bodies
/// with a 400, then runs the payload's own [`Validate`] rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!("Rejected request body: {}", rejection.body_text());
            AppError::ValidationError(rejection.body_text())
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Query-string extractor whose rejection is an [`AppError`] 400 instead of
/// axum's plain-text body.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!("Rejected query string: {}", rejection.body_text());
                AppError::ValidationError(rejection.body_text())
            })?;

        Ok(ApiQuery(value))
    }
}

/// Path-parameter extractor with the same error mapping as [`ApiQuery`].
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!("Rejected path parameters: {}", rejection.body_text());
                AppError::ValidationError(rejection.body_text())
            })?;

        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Body;
    use serde::Deserialize;

    use crate::validation::Validator;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Payload {
        title: String,
    }

    impl Validate for Payload {
        fn validate(&self) -> Result<(), AppError> {
            let mut validator = Validator::new();
            validator.non_empty("title", &self.title);
            validator.finish()
        }
    }

    #[derive(Debug, Deserialize)]
    struct Filter {
        status: Option<String>,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let ValidatedJson(payload) =
            ValidatedJson::<Payload>::from_request(json_request(r#"{"title":"ok"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.title, "ok");
    }

    #[tokio::test]
    async fn test_rejects_unknown_field() {
        let result =
            ValidatedJson::<Payload>::from_request(json_request(r#"{"title":"ok","extra":1}"#), &())
                .await;
        assert_matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("extra"));
    }

    #[tokio::test]
    async fn test_rejects_missing_field_and_bad_syntax() {
        let result = ValidatedJson::<Payload>::from_request(json_request("{}"), &()).await;
        assert_matches!(result, Err(AppError::ValidationError(_)));

        let result = ValidatedJson::<Payload>::from_request(json_request("{"), &()).await;
        assert_matches!(result, Err(AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_runs_payload_validation() {
        let result =
            ValidatedJson::<Payload>::from_request(json_request(r#"{"title":""}"#), &()).await;
        assert_matches!(result, Err(AppError::ValidationError(msg)) if msg == "title should not be empty");
    }

    #[tokio::test]
    async fn test_query_extracts_optional_filter() {
        let (mut parts, _) = Request::builder()
            .uri("/?status=pending")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let ApiQuery(filter) = ApiQuery::<Filter>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(filter.status.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn test_query_rejection_is_validation_error() {
        let (mut parts, _) = Request::builder()
            .uri("/?status=pending&status=past")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let result = ApiQuery::<Filter>::from_request_parts(&mut parts, &()).await;
        assert_matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("status"));
    }
}
