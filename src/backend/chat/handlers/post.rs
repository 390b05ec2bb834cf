/**
 * Message Post Handler
 *
 * Handles `POST /post` and `POST /chat.html`: decodes the payload, runs it
 * through validation/sanitization, persists it to the file-backed store,
 * archives the channel directory (best effort), force-regenerates the
 * channel's chat page, and redirects the client to it.
 *
 * # Accepted Bodies
 *
 * - `application/json`: `{"content", "author", "tags": [..], "channel",
 *   "reply_to"}`
 * - `application/x-www-form-urlencoded`: same fields; `tags` is a single
 *   whitespace-separated value and `channel` defaults to `general`
 *
 * Any other content type is rejected with 400; bodies over 1 MiB with 413.
 *
 * # Side Effects
 *
 * The git commit and the page regeneration are both best-effort: their
 * failures are logged, never propagated. The redirect is issued as long as
 * the message file itself was written.
 */

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::Response,
};

use crate::backend::chat::{commit, store};
use crate::backend::error::BackendError;
use crate::backend::render::{chat_artifact_name, force_regenerate, CHAT_SCRIPT};
use crate::backend::server::state::AppState;
use crate::shared::message::{IncomingMessage, Message};

/// Upper bound on an accepted request body.
const MAX_POST_BODY_BYTES: usize = 1024 * 1024;

/// Handle a message post.
///
/// # Errors
///
/// * `400 Bad Request` - unsupported content type, malformed JSON, empty
///   content, or invalid channel name
/// * `413 Payload Too Large` - body over 1 MiB
/// * `500 Internal Server Error` - the message file could not be written
pub async fn handle_chat_post(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, BackendError> {
    let (parts, body) = request.into_parts();

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    tracing::debug!("Received Content-Type: {}", content_type);

    // Reject oversized bodies up front when the client declares a length,
    // and cap collection regardless so a chunked body cannot dodge the
    // limit.
    if let Some(length) = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
    {
        if length > MAX_POST_BODY_BYTES {
            return Err(BackendError::PayloadTooLarge);
        }
    }

    let bytes = axum::body::to_bytes(body, MAX_POST_BODY_BYTES)
        .await
        .map_err(|_| BackendError::PayloadTooLarge)?;

    let incoming = parse_body(&content_type, &bytes)?;
    let message = Message::from_incoming(incoming)?;
    let stored = store::write_message(state.root(), message).await?;
    let channel = stored.message.channel.clone();

    // Archive the channel directory; failure is logged, not propagated.
    let channel_dir = store::message_dir(state.root(), &channel);
    match commit::commit_text_files(&channel_dir).await {
        Ok(()) => tracing::info!("Committed message for channel {}", channel),
        Err(e) => tracing::warn!("Commit for channel {} failed: {}", channel, e),
    }

    // Write-triggered rebuild: the next read must see the new message.
    let artifact = chat_artifact_name(&channel);
    force_regenerate(
        &state.config,
        &artifact,
        CHAT_SCRIPT,
        &["--channel", &channel],
    )
    .await;

    redirect_to_channel(&channel)
}

/// Decode the request body according to its content type.
fn parse_body(content_type: &str, bytes: &[u8]) -> Result<IncomingMessage, BackendError> {
    if content_type.contains("application/json") {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::debug!("JSON decode error: {}", e);
            BackendError::invalid_request("Bad Request: Invalid JSON")
        })
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Ok(parse_form(bytes))
    } else {
        Err(BackendError::invalid_request(format!(
            "Invalid content type: {}. Expected application/json or application/x-www-form-urlencoded",
            content_type
        )))
    }
}

/// Assemble a payload from form fields.
///
/// `tags` arrives as one whitespace-separated value; a missing `channel`
/// falls back to the default channel. Unknown fields are ignored.
fn parse_form(bytes: &[u8]) -> IncomingMessage {
    let mut incoming = IncomingMessage {
        channel: "general".to_string(),
        ..IncomingMessage::default()
    };

    for (key, value) in form_urlencoded::parse(bytes) {
        match key.as_ref() {
            "content" => incoming.content = value.into_owned(),
            "author" => incoming.author = value.into_owned(),
            "tags" => {
                incoming.tags = value.split_whitespace().map(str::to_string).collect();
            }
            "channel" => incoming.channel = value.into_owned(),
            "reply_to" => {
                let value = value.into_owned();
                incoming.reply_to = (!value.is_empty()).then_some(value);
            }
            _ => {}
        }
    }

    incoming
}

/// 303 redirect to the channel's chat page.
fn redirect_to_channel(channel: &str) -> Result<Response, BackendError> {
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, format!("/chat/{}.html", channel))
        .body(Body::empty())
        .map_err(|e| BackendError::internal(format!("Failed to build response: {}", e)))
}
