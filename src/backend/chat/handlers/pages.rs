/**
 * Generated Page Handlers
 *
 * GET handlers for the pages that are rendered by external scripts: the
 * per-channel chat pages and the log report. Each request runs the
 * read-triggered regeneration protocol (rebuild only if the artifact is
 * stale), verifies the artifact actually exists, and serves it as a static
 * file.
 *
 * The index page is also handled here: it is not script-generated, but it
 * is bootstrapped from the template directory on first access.
 */

use axum::{extract::Path, extract::State, response::Response};

use crate::backend::error::BackendError;
use crate::backend::render::{
    artifact_exists, chat_artifact_name, generate_if_stale, CHAT_SCRIPT, LOG_SCRIPT,
};
use crate::backend::server::state::AppState;
use crate::backend::static_files;
use crate::shared::validate::is_valid_channel_name;

/// Handle `GET /` and `GET /index.html`.
///
/// Bootstraps `index.html` from the template directory if the root does not
/// have one yet, then serves it.
pub async fn serve_index(State(state): State<AppState>) -> Result<Response, BackendError> {
    static_files::ensure_index_exists(state.root()).await?;
    static_files::serve(state.root(), "index.html").await
}

/// Handle `GET /log.html`: regenerate the log report if stale, then serve it.
pub async fn serve_log_page(State(state): State<AppState>) -> Result<Response, BackendError> {
    generate_and_serve(&state, "log.html", LOG_SCRIPT, &[]).await
}

/// Handle `GET /chat.html`: the chat page for the default channel.
pub async fn serve_default_chat_page(
    State(state): State<AppState>,
) -> Result<Response, BackendError> {
    serve_chat_for(&state, "general").await
}

/// Handle `GET /chat/{channel}`.
///
/// An optional `.html` suffix is accepted and stripped, so
/// `/chat/general` and `/chat/general.html` are the same page. The channel
/// name is validated before any filesystem access.
///
/// # Errors
///
/// * `400 Bad Request` - channel name fails validation
/// * `500 Internal Server Error` - page was stale and the rebuild produced
///   no artifact
pub async fn serve_channel_page(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<Response, BackendError> {
    let channel = channel.strip_suffix(".html").unwrap_or(&channel);

    if !is_valid_channel_name(channel) {
        tracing::warn!("Rejected chat page request for channel {:?}", channel);
        return Err(BackendError::invalid_request("Invalid channel name"));
    }

    serve_chat_for(&state, channel).await
}

/// Regenerate-if-stale and serve the chat page for a validated channel.
async fn serve_chat_for(state: &AppState, channel: &str) -> Result<Response, BackendError> {
    let artifact = chat_artifact_name(channel);
    generate_and_serve(state, &artifact, CHAT_SCRIPT, &["--channel", channel]).await
}

/// The shared generate-if-stale-and-serve path for script-rendered pages.
async fn generate_and_serve(
    state: &AppState,
    artifact: &str,
    script: &str,
    args: &[&str],
) -> Result<Response, BackendError> {
    generate_if_stale(&state.config, artifact, script, args).await;

    if !artifact_exists(state.root(), artifact).await {
        return Err(BackendError::generation_failed(artifact));
    }

    static_files::serve(state.root(), artifact).await
}
