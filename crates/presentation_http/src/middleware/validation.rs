//! Request validation
//!
//! `ValidatedJson` deserializes a JSON body and runs its `validator` rules
//! before the handler sees it.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::JsonError(e) => e.status(),
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            code: "validation_error".to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Flatten field errors into `field: message; field: message`
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct PlaceRequest {
        #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
        place: String,
    }

    async fn echo(ValidatedJson(req): ValidatedJson<PlaceRequest>) -> String {
        req.place
    }

    async fn send(body: &'static str) -> StatusCode {
        Router::new()
            .route("/place", post(echo))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/place")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn valid_request_passes() {
        assert_eq!(send(r#"{"place": "Pune"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn failed_rule_is_unprocessable() {
        assert_eq!(
            send(r#"{"place": ""}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        assert_eq!(send(r#"{"place": "#).await, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn describe_lists_field_and_message() {
        let errors = PlaceRequest {
            place: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(describe(&errors), "place: must be 1-50 characters");
    }
}
