//! Input Validation and Sanitization
//!
//! This module implements the two guards that stand between untrusted request
//! input and the filesystem: the channel-name predicate and the
//! escape-and-clamp sanitizer applied to every free-text field before it is
//! persisted.
//!
//! Channel names become directory names under `message/`, so the predicate is
//! deliberately strict: ASCII alphanumerics, hyphens, and underscores only.
//! Anything else (path separators, `..`, whitespace, empty input) is rejected
//! before any filesystem access.
//!
//! Neither function ever errors; callers reject the request with a client
//! error when validation fails.

use thiserror::Error;

/// Maximum length of a sanitized author name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 50;

/// Maximum length of sanitized message content, in characters.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// Maximum number of tags kept per message.
pub const MAX_TAGS: usize = 10;

/// Maximum length of a single sanitized tag, in characters.
pub const MAX_TAG_CHARS: usize = 30;

/// Validation failures surfaced while building a [`Message`] from a raw
/// payload. The HTTP layer maps every variant to a 400 response.
///
/// [`Message`]: crate::shared::message::Message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message content was empty after trimming
    #[error("Message content is required")]
    EmptyContent,

    /// The channel name contained characters outside `[A-Za-z0-9_-]`
    #[error("Invalid channel name")]
    InvalidChannelName,
}

/// Check whether `channel` is a syntactically valid channel name.
///
/// A valid name is non-empty and consists entirely of ASCII alphanumerics,
/// hyphens, and underscores. This is the sole gate that keeps request-supplied
/// channel names from escaping the `message/` tree, so it runs before any
/// path is built from the name.
///
/// # Example
///
/// ```rust
/// use corkboard::shared::validate::is_valid_channel_name;
///
/// assert!(is_valid_channel_name("general"));
/// assert!(is_valid_channel_name("rust_users-2"));
/// assert!(!is_valid_channel_name("../evil"));
/// assert!(!is_valid_channel_name(""));
/// ```
pub fn is_valid_channel_name(channel: &str) -> bool {
    !channel.is_empty()
        && channel
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// HTML-escape `input` and clamp the result to at most `max_chars` characters.
///
/// The input is trimmed, escaped (`&`, `<`, `>`, quotes), and then truncated.
/// Truncation happens on the escaped text; if the cut would land inside an
/// escape sequence the partial entity is dropped entirely, so the output never
/// contains an unescaped `&`, `<`, or `>`.
pub fn sanitize(input: &str, max_chars: usize) -> String {
    let escaped = html_escape::encode_safe(input.trim());
    clamp_escaped(&escaped, max_chars)
}

/// Truncate escaped text to `max_chars` characters without leaving a partial
/// entity at the end.
fn clamp_escaped(escaped: &str, max_chars: usize) -> String {
    if escaped.chars().count() <= max_chars {
        return escaped.to_string();
    }

    let mut out: String = escaped.chars().take(max_chars).collect();

    // Every '&' in escaped text starts an entity. If the last one is not
    // terminated by ';' the cut split it, so drop the fragment.
    if let Some(amp) = out.rfind('&') {
        if !out[amp..].contains(';') {
            out.truncate(amp);
        }
    }

    out
}
