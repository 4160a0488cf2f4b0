//! Token estimation.

/// Rough token count for `chars` characters of text.
pub fn estimate_tokens(chars: usize, chars_per_token: usize) -> usize {
    chars / chars_per_token.max(1)
}
