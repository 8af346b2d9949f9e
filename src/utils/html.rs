//! Helpers for Telegram's HTML parse mode.

/// Telegram rejects messages longer than this many characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Escapes text for HTML output.
///
/// # Example
/// ```
/// use wedding_guestbook::utils::html::escape_html;
///
/// assert_eq!(escape_html("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Reverses [`escape_html`].
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Joins a header and entries into as few messages as possible, never
/// splitting an entry across two messages.
///
/// An entry that alone exceeds `limit` is sent on its own and left to the API
/// to reject.
pub fn split_into_messages(header: &str, entries: &[String], limit: usize) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = header.to_string();

    for entry in entries {
        let fits = current.chars().count() + entry.chars().count() <= limit;
        if !fits && !current.is_empty() {
            messages.push(std::mem::take(&mut current));
        }
        current.push_str(entry);
    }

    if !current.is_empty() {
        messages.push(current);
    }

    messages
}
