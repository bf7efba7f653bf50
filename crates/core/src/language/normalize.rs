//! Text normalization shared by every phonemization tier.

use unicode_normalization::UnicodeNormalization;

/// Punctuation kept by [`passthrough`].
const PASSTHROUGH_PUNCT: &str = ".,!?;:'-";

/// Compose, lowercase, collapse whitespace runs to single spaces and trim.
///
/// NFC composition runs first so decomposed tone marks line up with the
/// precomposed keys in the mapping tables.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last-resort phonemization: normalized text reduced to letters, digits,
/// spaces and a small punctuation set.
pub fn passthrough(text: &str) -> String {
    let kept: String = normalize(text)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || PASSTHROUGH_PUNCT.contains(*c))
        .collect();
    // Dropping characters can leave doubled or edge spaces behind.
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the text has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
