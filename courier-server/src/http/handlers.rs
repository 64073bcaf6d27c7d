//! Endpoint handlers: validate, run one store statement, shape the JSON reply.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use courier_core::{required_identifier, InboxEntry, NewMessage, Page, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ApiError, StoreOperation};
use super::AppState;

/// Body of `POST /sendMessage`. Every field is optional here so that absence is a
/// validation failure rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: i64,
}

/// Pagination values stay raw here so a bad `limit` cannot hide a missing `recipient`.
#[derive(Debug, Deserialize)]
pub struct InboxParams {
    pub recipient: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InboxResponse {
    pub messages: Vec<InboxEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RecipientsParams {
    pub sender: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecipientsResponse {
    pub recipients: Vec<String>,
}

/// Parses the raw body as JSON whatever the content type says. An empty body counts as `{}`.
pub fn parse_send_request(body: &[u8]) -> Result<SendMessageRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SendMessageRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejected sendMessage body");
        ApiError::Malformed("Malformed request body")
    })
}

/// `POST /sendMessage`.
///
/// The body is read as JSON whatever `Content-Type` says, so a JSON body sent as
/// `text/plain` is accepted rather than treated as empty.
pub async fn send_message(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let body = body.map_err(|e| {
        debug!(error = %e, "Rejected sendMessage body");
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Malformed("Malformed request body")
        }
    })?;
    let request = parse_send_request(&body)?;
    let message = NewMessage::from_parts(request.sender, request.recipient, request.message)?;

    let message_id = state
        .with_store_timeout(state.store().insert(&message))
        .await
        .map_err(|e| ApiError::store(StoreOperation::SendMessage, e))?;

    info!(message_id, "Message sent");
    Ok(Json(SendMessageResponse {
        success: true,
        message_id,
    }))
}

pub async fn retrieve_messages(
    State(state): State<AppState>,
    params: Result<Query<InboxParams>, QueryRejection>,
) -> Result<Json<InboxResponse>, ApiError> {
    let Query(params) = params.map_err(|e| {
        debug!(error = %e, "Rejected retrieveMessages query");
        ApiError::Malformed("Malformed query string")
    })?;
    let recipient =
        required_identifier(params.recipient).ok_or(ValidationError::MissingRecipient)?;
    let page = Page::parse(params.limit.as_deref(), params.offset.as_deref())?;

    let messages = state
        .with_store_timeout(state.store().inbox(&recipient, page))
        .await
        .map_err(|e| ApiError::store(StoreOperation::RetrieveMessages, e))?;

    Ok(Json(InboxResponse { messages }))
}

pub async fn get_recipients(
    State(state): State<AppState>,
    params: Result<Query<RecipientsParams>, QueryRejection>,
) -> Result<Json<RecipientsResponse>, ApiError> {
    let Query(params) = params.map_err(|e| {
        debug!(error = %e, "Rejected getRecipients query");
        ApiError::Malformed("Malformed query string")
    })?;
    let sender = required_identifier(params.sender).ok_or(ValidationError::MissingSender)?;

    let recipients = state
        .with_store_timeout(state.store().recipients_of(&sender))
        .await
        .map_err(|e| ApiError::store(StoreOperation::ListRecipients, e))?;

    Ok(Json(RecipientsResponse { recipients }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
