//! Custom error types for the shop service
//!
//! Every failure is answered with transport status 200 and an envelope of
//! the form `{"status": "error", "message": ...}`. Store failures are logged
//! with their source and answered with a fixed message that does not leak
//! internal detail.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Failure of a persistence-side operation
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database rejected or failed the statement
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// A password digest could not be produced or parsed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// A token could not be signed
    #[error("Token signing error: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),
}

/// Outcome of an account store operation that did not succeed
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("The email is already used.")]
    DuplicateEmail,

    #[error("Wrong email or password.")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DatabaseError> for AccountError {
    fn from(err: DatabaseError) -> Self {
        AccountError::Store(StoreError::Database(err))
    }
}

impl AccountError {
    /// Resolve into an API error, using `context` as the message for store failures
    pub fn into_api(self, context: &'static str) -> ApiError {
        match self {
            AccountError::DuplicateEmail => ApiError::DuplicateEmail,
            AccountError::InvalidCredentials => ApiError::InvalidCredentials,
            AccountError::Store(source) => ApiError::Store { context, source },
        }
    }
}

/// Custom error type for the shop service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Empty or malformed input, caught before any store access
    #[error("{0}")]
    Validation(String),

    #[error("The email is already used.")]
    DuplicateEmail,

    #[error("Wrong email or password.")]
    InvalidCredentials,

    /// Missing, malformed, tampered or expired bearer token
    #[error("Wrong token.")]
    InvalidToken,

    /// Persistence failure; only `context` is shown to the caller
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Build a closure that wraps a store failure under a sanitized message
    pub fn store<E>(context: &'static str) -> impl FnOnce(E) -> ApiError
    where
        E: Into<StoreError>,
    {
        move |source| ApiError::Store {
            context,
            source: source.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::Validation("Invalid request body.".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store { context, source } = &self {
            error!("{}: {}", context, source);
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (StatusCode::OK, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn envelope(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_errors_render_as_ok_status_envelopes() {
        let (status, body) = envelope(ApiError::InvalidToken).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "error", "message": "Wrong token."}));
    }

    #[tokio::test]
    async fn test_store_errors_hide_their_source() {
        let err = ApiError::Store {
            context: "Failed to insert user into table!",
            source: StoreError::Database(DatabaseError::Configuration(
                "secret internal detail".to_string(),
            )),
        };

        let (_, body) = envelope(err).await;
        assert_eq!(body["message"], "Failed to insert user into table!");
        assert!(!body.to_string().contains("secret internal detail"));
    }

    #[test]
    fn test_account_errors_map_to_api_errors() {
        let err = AccountError::DuplicateEmail.into_api("unused");
        assert_eq!(err.to_string(), "The email is already used.");

        let err = AccountError::InvalidCredentials.into_api("unused");
        assert_eq!(err.to_string(), "Wrong email or password.");

        let err = AccountError::Store(StoreError::PasswordHash("boom".to_string()))
            .into_api("Failed to login user!");
        assert_eq!(err.to_string(), "Failed to login user!");
    }
}
