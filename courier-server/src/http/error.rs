//! Request-boundary errors and their JSON responses.
//!
//! Every failure becomes `{"error": "<message>"}`. Store details go to the log only.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use courier_core::ValidationError;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Which endpoint's store call failed; picks the generic message the client sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    SendMessage,
    RetrieveMessages,
    ListRecipients,
}

impl StoreOperation {
    pub fn public_message(self) -> &'static str {
        match self {
            StoreOperation::SendMessage => "Failed to send message",
            StoreOperation::RetrieveMessages => "Failed to retrieve messages",
            StoreOperation::ListRecipients => "Database error",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::SendMessage => "sendMessage",
            StoreOperation::RetrieveMessages => "retrieveMessages",
            StoreOperation::ListRecipients => "getRecipients",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body or query string could not be parsed into the expected shape.
    #[error("{0}")]
    Malformed(&'static str),

    #[error("{operation} failed: {source}")]
    Store {
        operation: StoreOperation,
        #[source]
        source: StorageError,
    },

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,
}

impl ApiError {
    pub fn store(operation: StoreOperation, source: StorageError) -> Self {
        ApiError::Store { operation, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Store { operation, .. } => operation.public_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store { operation, source } = &self {
            error!(operation = %operation, error = %source, "Store operation failed");
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}
