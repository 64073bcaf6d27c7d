//! HTTP surface: router, shared state, handlers, middleware and error mapping.

pub mod error;
pub mod handlers;
mod middleware;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use storage::{MessageStore, StorageError};
use tower_http::cors::CorsLayer;

pub use error::{ApiError, StoreOperation};

/// Request bodies above this size are refused with 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Per-request state: the injected store handle and the bound on each store call.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn MessageStore>,
    store_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub fn store(&self) -> &dyn MessageStore {
        self.store.as_ref()
    }

    /// Runs a store call, failing with [`StorageError::Timeout`] once the bound elapses.
    /// The timed-out future is dropped, which releases its connection.
    pub async fn with_store_timeout<T, F>(&self, operation: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout(self.store_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.store_timeout)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/sendMessage",
            post(handlers::send_message).fallback(handlers::method_not_allowed),
        )
        .route(
            "/retrieveMessages",
            get(handlers::retrieve_messages).fallback(handlers::method_not_allowed),
        )
        .route(
            "/getRecipients",
            get(handlers::get_recipients).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_tracing_middleware))
        .with_state(state)
}
