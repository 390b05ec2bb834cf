/**
 * File-Backed Message Store
 *
 * Each channel owns a directory `message/<channel>/` under the content
 * root; every accepted message becomes one immutable file in it, named by
 * its second-resolution creation timestamp (`20260808_153012.txt`).
 *
 * # Collision Handling
 *
 * Two posts to the same channel within the same second would claim the same
 * filename. Files are therefore created with create-new semantics and a
 * monotonic numeric suffix: the first post gets `20260808_153012.txt`, a
 * same-second successor gets `20260808_153012_2.txt`, then `_3`, and so on.
 * The common case keeps the plain timestamp convention that the external
 * templating scripts parse; the suffix only appears under contention.
 *
 * # Durability
 *
 * Writes are plain create-and-write, no temp-then-rename: a crash mid-write
 * can leave a partial message file. Messages are never mutated or deleted
 * by the server once written.
 */

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::backend::error::BackendError;
use crate::shared::message::Message;

/// A message successfully persisted to disk.
#[derive(Debug)]
pub struct StoredMessage {
    /// The sanitized message that was written
    pub message: Message,
    /// Absolute or root-relative path of the created file
    pub path: PathBuf,
}

/// The directory holding a channel's message files.
pub fn message_dir(root: &Path, channel: &str) -> PathBuf {
    root.join("message").join(channel)
}

/// Persist a validated message under its channel directory.
///
/// Creates the channel directory on first use. The caller is responsible
/// for having built `message` through [`Message::from_incoming`], which is
/// the only constructor that sanitizes client input.
pub async fn write_message(root: &Path, message: Message) -> Result<StoredMessage, BackendError> {
    let dir = message_dir(root, &message.channel);
    tokio::fs::create_dir_all(&dir).await?;

    let path = create_message_file(&dir, &message.filename_stamp(), &message.to_file_body()).await?;

    tracing::info!(
        "Stored message from {:?} in channel {} at {}",
        message.author,
        message.channel,
        path.display()
    );

    Ok(StoredMessage { message, path })
}

/// Create the message file, disambiguating same-second collisions.
///
/// Uses `create_new` so the existence probe and the creation are one atomic
/// step; a concurrent writer that wins the race just pushes this one to the
/// next suffix.
async fn create_message_file(
    dir: &Path,
    stamp: &str,
    body: &str,
) -> Result<PathBuf, BackendError> {
    let mut suffix: u32 = 1;
    loop {
        let filename = if suffix == 1 {
            format!("{}.txt", stamp)
        } else {
            format!("{}_{}.txt", stamp, suffix)
        };
        let path = dir.join(filename);

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(body.as_bytes()).await?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                suffix += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
