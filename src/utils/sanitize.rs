//! The single sanitization layer for guest-supplied text.
//!
//! Everything written to the wish store passes through [`clean_field`] (guest
//! submissions) or [`normalize_stored`] (backup restore). Stored text is always
//! tag-free and HTML-escaped, so it can be rendered in Telegram HTML replies
//! and the public API without further processing.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

use crate::utils::html::{escape_html, unescape_html};

/// Guest-editable fields and their length limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Message,
}

impl Field {
    /// Maximum length in characters, measured after tag stripping and trimming.
    pub fn max_chars(self) -> usize {
        match self {
            Field::Name => 100,
            Field::Message => 500,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "Name"),
            Field::Message => write!(f, "Message"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be between 1 and {max} characters")]
    Length { field: Field, max: usize },
}

#[allow(clippy::expect_used)]
fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

pub fn strip_tags(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}

/// Strips tags, trims, checks the length and HTML-escapes a guest-supplied field.
pub fn clean_field(raw: &str, field: Field) -> Result<String, ValidationError> {
    let stripped = strip_tags(raw);
    let trimmed = stripped.trim();
    let length = trimmed.chars().count();

    if length == 0 || length > field.max_chars() {
        return Err(ValidationError::Length {
            field,
            max: field.max_chars(),
        });
    }

    Ok(escape_html(trimmed))
}

/// Brings restored text into the stored form without double-escaping.
///
/// Strips tags and escapes only the angle brackets left over, which leaves
/// already-sanitized text unchanged. Returns `None` when nothing remains.
pub fn normalize_stored(text: &str) -> Option<String> {
    let stripped = strip_tags(text);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.replace('<', "&lt;").replace('>', "&gt;"))
}

/// Length of stored text as the guest typed it, with entities decoded.
///
/// Matches the count [`clean_field`] checks, so anything accepted there fits
/// its field here too.
pub fn stored_char_count(stored: &str) -> usize {
    unescape_html(stored).chars().count()
}
