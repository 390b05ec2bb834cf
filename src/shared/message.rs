/**
 * Message Data Structures
 *
 * This module defines the Message struct persisted by the file-backed store
 * and the IncomingMessage payload accepted from clients.
 *
 * An IncomingMessage is exactly what a client sends: untrusted, unescaped,
 * possibly oversized. A Message is what the store writes: every text field
 * has been HTML-escaped and clamped, the channel name has passed validation,
 * and the creation timestamp has been fixed. The only way to build a Message
 * from client input is [`Message::from_incoming`], which enforces that
 * boundary.
 */
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::shared::validate::{
    is_valid_channel_name, sanitize, ValidationError, MAX_AUTHOR_CHARS, MAX_CONTENT_CHARS,
    MAX_TAGS, MAX_TAG_CHARS,
};

/// Raw message payload as submitted by a client.
///
/// Deserialized from a JSON body (`{content, author, tags, channel,
/// reply_to}`) or assembled field-by-field from a form body. Every field
/// except `content` is optional; the channel defaults to `general`, matching
/// the form on the default chat page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncomingMessage {
    /// The message text, required and non-empty after trimming
    #[serde(default)]
    pub content: String,
    /// The author's display name
    #[serde(default)]
    pub author: String,
    /// Free-form tags attached to the message
    #[serde(default)]
    pub tags: Vec<String>,
    /// Target channel name
    #[serde(default = "IncomingMessage::default_channel")]
    pub channel: String,
    /// Optional reference to an earlier message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl IncomingMessage {
    fn default_channel() -> String {
        "general".to_string()
    }
}

/// A validated, sanitized chat message ready to be persisted.
///
/// # Fields
/// * `author` - Escaped author name, at most 50 characters
/// * `content` - Escaped message text, at most 5000 characters
/// * `tags` - Up to 10 escaped tags, each at most 30 characters
/// * `channel` - Validated channel name (`[A-Za-z0-9_-]+`)
/// * `reply_to` - Optional reference to an earlier message, carried through
///   from the payload but not part of the on-disk body format
/// * `created_at` - Creation time, used for the message filename
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub author: String,
    pub content: String,
    pub tags: Vec<String>,
    pub channel: String,
    pub reply_to: Option<String>,
    pub created_at: DateTime<Local>,
}

impl Message {
    /// Validate and sanitize a client payload into a persistable message.
    ///
    /// # Validation
    ///
    /// * `content` must be non-empty after trimming
    /// * `channel` must match `[A-Za-z0-9_-]+` (after trimming and escaping,
    ///   so an injection attempt fails the name check rather than slipping
    ///   through escaped)
    ///
    /// # Sanitization
    ///
    /// Author, content, and each tag are HTML-escaped and clamped to their
    /// per-field limits; the tag list itself is clamped to ten entries.
    /// Empty tags are dropped.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::EmptyContent`] - content blank after trimming
    /// * [`ValidationError::InvalidChannelName`] - channel fails the predicate
    pub fn from_incoming(incoming: IncomingMessage) -> Result<Self, ValidationError> {
        if incoming.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        // Escape first, validate after: any character the escape rewrites is
        // by definition outside [A-Za-z0-9_-] and must be rejected.
        let channel = sanitize(&incoming.channel, usize::MAX);
        if !is_valid_channel_name(&channel) {
            return Err(ValidationError::InvalidChannelName);
        }

        let tags: Vec<String> = incoming
            .tags
            .iter()
            .map(|tag| sanitize(tag, MAX_TAG_CHARS))
            .filter(|tag| !tag.is_empty())
            .take(MAX_TAGS)
            .collect();

        Ok(Self {
            author: sanitize(&incoming.author, MAX_AUTHOR_CHARS),
            content: sanitize(&incoming.content, MAX_CONTENT_CHARS),
            tags,
            channel,
            reply_to: incoming.reply_to.filter(|r| !r.trim().is_empty()),
            created_at: Local::now(),
        })
    }

    /// Second-resolution timestamp used as the base of the message filename,
    /// e.g. `20260808_153012`.
    pub fn filename_stamp(&self) -> String {
        self.created_at.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Render the on-disk body for this message.
    ///
    /// Format: an `Author:` line, a `Channel:` line, a blank line, the
    /// content, and (only when tags are present) a blank line followed by the
    /// space-joined tags.
    pub fn to_file_body(&self) -> String {
        let mut body = format!(
            "Author: {}\nChannel: {}\n\n{}",
            self.author, self.channel, self.content
        );
        if !self.tags.is_empty() {
            body.push_str("\n\n");
            body.push_str(&self.tags.join(" "));
        }
        body
    }
}
