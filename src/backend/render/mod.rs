/**
 * Generated-Page Rendering
 *
 * This module owns the protocol around generated HTML artifacts
 * (`chat_<channel>.html`, `log.html`): deciding when an artifact is stale,
 * and rebuilding it by invoking an external templating script.
 *
 * # Regeneration Protocol
 *
 * Two paths lead to a rebuild:
 *
 * - **Read-triggered** (`generate_if_stale`): a GET of a generated page
 *   checks the artifact's age against the freshness TTL and reruns the
 *   script only when the artifact is absent or too old. This keeps page
 *   loads from rebuilding on every request.
 * - **Write-triggered** (`force_regenerate`): a successful post deletes the
 *   artifact unconditionally and reruns the script, bypassing the TTL so
 *   the next read reflects the new message.
 *
 * A rebuild is always a full delete-then-recreate performed by the script;
 * nothing here is incremental. Script failures are not surfaced as errors:
 * callers verify success indirectly by checking that the expected artifact
 * exists afterwards.
 */

use std::path::Path;

use crate::backend::server::config::ServerConfig;

/// Artifact freshness policy
pub mod cache;

/// External script discovery and invocation
pub mod scripts;

pub use cache::needs_regeneration;
pub use scripts::{find_scripts, run_script, ScriptDescriptor, ScriptKind};

/// Script name that renders chat pages (`template/<backend>/chat.html.<ext>`).
pub const CHAT_SCRIPT: &str = "chat.html";

/// Script name that renders the log report page.
pub const LOG_SCRIPT: &str = "log.html";

/// Artifact filename for a channel's chat page.
pub fn chat_artifact_name(channel: &str) -> String {
    format!("chat_{}.html", channel)
}

/// Rerun the rendering script for `artifact` only if the artifact is stale.
pub async fn generate_if_stale(config: &ServerConfig, artifact: &str, script: &str, args: &[&str]) {
    let artifact_path = config.root.join(artifact);
    if cache::needs_regeneration(&artifact_path, config.page_ttl) {
        tracing::info!("Generating {}...", artifact);
        scripts::run_script(&config.root, script, args, config.script_timeout).await;
    }
}

/// Delete `artifact` and rerun its rendering script unconditionally.
///
/// Used after a write so the next read cannot serve the pre-write page out
/// of the freshness window.
pub async fn force_regenerate(config: &ServerConfig, artifact: &str, script: &str, args: &[&str]) {
    let artifact_path = config.root.join(artifact);
    cache::remove_artifact(&artifact_path).await;
    scripts::run_script(&config.root, script, args, config.script_timeout).await;
}

/// Whether the artifact exists under the content root.
///
/// This is the indirect success check for a script run: the scripts
/// themselves report nothing to the HTTP layer.
pub async fn artifact_exists(root: &Path, artifact: &str) -> bool {
    tokio::fs::metadata(root.join(artifact))
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
