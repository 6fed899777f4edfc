//! Acquisition inquiry handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use gallery_content::{InquiryPayload, submit_inquiry};
use gallery_persistence::DocumentStore;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Validates an inquiry and relays it to the gallery staff.
///
/// # HTTP Request
///
/// `POST [base]/api/inquiries`
///
/// # Response
///
/// - `200 OK` with `{"ok": true}` once the relay accepted the message
/// - `400 Bad Request` when the body is malformed or a required field is blank
/// - `500 Internal Server Error` when the relay failed
pub async fn inquiry_handler<S>(
    State(state): State<AppState<S>>,
    payload: Result<Json<InquiryPayload>, JsonRejection>,
) -> RestResult<Json<Value>>
where
    S: DocumentStore + 'static,
{
    let Json(payload) = payload?;
    debug!(relay = state.relay().name(), "Processing inquiry");

    let receipt = submit_inquiry(state.relay(), &state.inquiry_settings(), payload).await?;

    let mut body = json!({ "ok": true });
    if let Some(id) = receipt.message_id {
        body["messageId"] = Value::String(id);
    }
    Ok(Json(body))
}
