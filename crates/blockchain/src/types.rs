/// Longest body excerpt carried into error messages and debug output
pub const BODY_SNIPPET_LEN: usize = 200;

/// An un-normalized account-info exchange, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_snippet(&self) -> &str {
        snippet(&self.body, BODY_SNIPPET_LEN)
    }
}

/// First `max_chars` characters of `text`, never splitting a character
pub fn snippet(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
