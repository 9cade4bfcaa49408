//! Route modules.

pub mod coasters;
pub mod health;

use axum::Json;
use axum::extract::{FromRequest, Request};
use coasters_core::error::DomainError;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Success envelope shared by every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `"success"`.
    pub status: &'static str,
    /// Human-readable outcome.
    pub message: String,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a success envelope.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
        }
    }
}

/// JSON request body whose decoding failures are reported as validation
/// errors (400 with the standard error body) instead of axum's 422.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => Err(ApiError(DomainError::Validation(rejection.body_text()))),
        }
    }
}
