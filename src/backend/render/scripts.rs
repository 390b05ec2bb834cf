/**
 * External Script Discovery and Invocation
 *
 * Rendering is delegated entirely to external scripts found by filename
 * convention: `template/<backend>/<name>.<ext>`, where `<ext>` selects the
 * interpreter through the static [`ScriptKind`] registry. Every backend
 * directory is scanned, so a deployment can ship the same page renderer in
 * more than one language and all of them run.
 *
 * # Invocation Contract
 *
 * Scripts are spawned as `<interpreter> <script-path> [args...]` with the
 * working directory set to the content root, inheriting the server's
 * environment. Each invocation is bounded by the configured timeout; on
 * expiry the child is killed. Failures of any kind (no match, spawn error,
 * non-zero exit, timeout) are logged and swallowed: the HTTP layer verifies
 * success indirectly by checking that the expected artifact exists.
 */

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

/// Supported script types, keyed by file extension.
///
/// The registry is static: an extension either maps to an interpreter here
/// or the file is not considered a script at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// `.py`, run with `python3`
    Python3,
    /// `.sh`, run with `sh`
    Shell,
    /// `.js`, run with `node`
    Node,
}

impl ScriptKind {
    /// All registered kinds, in probe order.
    pub const ALL: [ScriptKind; 3] = [ScriptKind::Python3, ScriptKind::Shell, ScriptKind::Node];

    /// The file extension this kind is discovered by.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Python3 => "py",
            Self::Shell => "sh",
            Self::Node => "js",
        }
    }

    /// The interpreter command used to run scripts of this kind.
    pub fn interpreter(self) -> &'static str {
        match self {
            Self::Python3 => "python3",
            Self::Shell => "sh",
            Self::Node => "node",
        }
    }

    /// Look up a kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }
}

/// A discovered script: its path and how to run it.
#[derive(Debug, Clone)]
pub struct ScriptDescriptor {
    pub path: PathBuf,
    pub kind: ScriptKind,
}

/// Find every script named `<name>.<ext>` in the immediate subdirectories
/// of `<root>/template/`.
///
/// Matches are returned in directory-listing order, which is
/// platform-dependent and therefore documented as non-deterministic. A
/// missing template directory yields an empty result.
pub async fn find_scripts(root: &Path, name: &str) -> Vec<ScriptDescriptor> {
    let mut found = Vec::new();
    let template_root = root.join("template");

    let Ok(mut entries) = tokio::fs::read_dir(&template_root).await else {
        return found;
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        for kind in ScriptKind::ALL {
            let candidate = entry.path().join(format!("{}.{}", name, kind.extension()));
            let is_file = tokio::fs::metadata(&candidate)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                found.push(ScriptDescriptor {
                    path: candidate,
                    kind,
                });
            }
        }
    }

    found
}

/// Run every script matching `name` with the given arguments.
///
/// Each match is spawned as `<interpreter> <script-path> [args...]` with the
/// working directory set to the content root and waited on up to `timeout`.
/// All failure modes are logged and swallowed; see the module docs for why.
pub async fn run_script(root: &Path, name: &str, args: &[&str], timeout: Duration) {
    // Resolve the root so script paths stay valid after the cwd change.
    let root = tokio::fs::canonicalize(root)
        .await
        .unwrap_or_else(|_| root.to_path_buf());

    let scripts = find_scripts(&root, name).await;
    if scripts.is_empty() {
        tracing::info!("No scripts found for {}", name);
        return;
    }

    for script in scripts {
        let interpreter = script.kind.interpreter();
        tracing::debug!(
            "Running {} {} {:?} in {}",
            interpreter,
            script.path.display(),
            args,
            root.display()
        );

        let mut command = Command::new(interpreter);
        command.arg(&script.path).args(args).current_dir(&root);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(
                    "Failed to spawn {} for {}: {}",
                    interpreter,
                    script.path.display(),
                    e
                );
                continue;
            }
        };

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) if status.success() => {}
            Ok(Ok(status)) => {
                tracing::warn!("Script {} exited with {}", script.path.display(), status);
            }
            Ok(Err(e)) => {
                tracing::warn!("Failed waiting on {}: {}", script.path.display(), e);
            }
            Err(_) => {
                tracing::warn!(
                    "Script {} timed out after {:?}, killing it",
                    script.path.display(),
                    timeout
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!("Failed to kill timed-out script: {}", e);
                }
            }
        }
    }
}
