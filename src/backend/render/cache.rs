/**
 * Artifact Freshness Policy
 *
 * A generated artifact is stale when it does not exist or when its mtime is
 * older than the freshness TTL. Staleness is judged against wall-clock time;
 * a file whose mtime cannot be read counts as stale so an unreadable
 * artifact gets rebuilt rather than served forever.
 */

use std::path::Path;
use std::time::{Duration, SystemTime};

/// Whether `path` should be regenerated under the given TTL.
///
/// Returns true if the file does not exist, its metadata or mtime cannot be
/// read, or it was last modified more than `ttl` ago. An mtime in the future
/// counts as fresh (a just-written file on a skewed clock).
pub fn needs_regeneration(path: &Path, ttl: Duration) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return true;
    };
    let Ok(mtime) = metadata.modified() else {
        return true;
    };

    match SystemTime::now().duration_since(mtime) {
        Ok(age) => age > ttl,
        Err(_) => false,
    }
}

/// Remove a generated artifact so the next rebuild starts from nothing.
///
/// A missing file is fine; any other failure is logged and swallowed, since
/// the follow-up script run overwrites the artifact anyway.
pub async fn remove_artifact(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove artifact {}: {}", path.display(), e),
    }
}
