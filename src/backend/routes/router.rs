//! Router Configuration
//!
//! This module assembles the dispatch table for the application. Routing is
//! stateless per request; every handler re-derives what it needs from the
//! filesystem.
//!
//! # Route Table
//!
//! | Method | Path                  | Action                                     |
//! |--------|-----------------------|--------------------------------------------|
//! | GET    | `/`, `/index.html`    | bootstrap index if missing, serve it       |
//! | GET    | `/log.html`           | regenerate-if-stale, serve the log report  |
//! | GET    | `/chat.html`          | chat page for the default channel          |
//! | GET    | `/chat/{channel}`     | validated per-channel chat page            |
//! | GET    | `/css/*`, `/js/*`     | static assets with template fallback       |
//! | GET    | `*.txt`               | plain text rendered as HTML (fallback)     |
//! | GET    | anything else         | 404                                        |
//! | POST   | `/post`, `/chat.html` | store message, commit, rebuild, 303        |
//! | POST   | anything else         | 405                                        |
//!
//! The `*.txt` rule and the 404/405 defaults live in the fallback handler;
//! everything else is an explicit route.

use axum::{
    extract::{Path, Request, State},
    http::Method,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::backend::chat::handlers::{
    handle_chat_post, serve_channel_page, serve_default_chat_page, serve_index, serve_log_page,
};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::static_files;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(serve_index))
        .route("/index.html", get(serve_index))
        .route("/log.html", get(serve_log_page))
        .route(
            "/chat.html",
            get(serve_default_chat_page).post(handle_chat_post),
        )
        .route("/chat/{channel}", get(serve_channel_page))
        .route("/post", post(handle_chat_post))
        .route("/css/{*path}", get(serve_css))
        .route("/js/{*path}", get(serve_js))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve a stylesheet from `css/` (root first, then template fallback).
async fn serve_css(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, BackendError> {
    static_files::serve(state.root(), &format!("css/{}", path)).await
}

/// Serve a script asset from `js/` (root first, then template fallback).
async fn serve_js(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, BackendError> {
    static_files::serve(state.root(), &format!("js/{}", path)).await
}

/// Catch-all for everything without an explicit route.
///
/// GETs of `*.txt` paths are rendered as HTML; any other GET is a 404 and
/// any other method a 405, mirroring the route table above.
async fn fallback_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, BackendError> {
    let path = request.uri().path().trim_start_matches('/').to_string();

    if request.method() != Method::GET {
        return Err(BackendError::MethodNotAllowed);
    }

    if path.ends_with(".txt") {
        return static_files::serve_text_as_html(state.root(), &path).await;
    }

    Err(BackendError::not_found(path))
}
