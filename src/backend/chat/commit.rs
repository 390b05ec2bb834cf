/**
 * Git Commit Helper
 *
 * After a message is stored, its channel directory is staged and committed
 * to a per-channel git repository. This is an archival side effect, not part
 * of the request contract: the caller logs a failure and the request
 * succeeds anyway.
 *
 * The repository is initialized on first use. Commits carry a fixed local
 * identity so they work on hosts with no global git configuration.
 */

use std::path::Path;

use tokio::process::Command;

use crate::backend::error::BackendError;

/// Stage and commit all files in `dir`, initializing the repository first
/// if needed.
///
/// # Errors
///
/// Returns an error when git cannot be spawned or any step exits non-zero.
/// Callers treat this as non-fatal and log it.
pub async fn commit_text_files(dir: &Path) -> Result<(), BackendError> {
    if tokio::fs::metadata(dir.join(".git")).await.is_err() {
        run_git(dir, &["init", "--quiet"]).await?;
    }

    run_git(dir, &["add", "-A"]).await?;
    run_git(
        dir,
        &[
            "-c",
            "user.name=corkboard",
            "-c",
            "user.email=corkboard@localhost",
            "commit",
            "--quiet",
            "-m",
            "Add message",
        ],
    )
    .await?;

    Ok(())
}

/// Run one git subcommand in `dir` and fail on non-zero exit.
async fn run_git(dir: &Path, args: &[&str]) -> Result<(), BackendError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .map_err(|e| BackendError::internal(format!("Failed to spawn git: {}", e)))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(BackendError::internal(format!(
        "git {} failed ({}): {}",
        args.first().copied().unwrap_or("?"),
        output.status,
        stderr.trim()
    )))
}
