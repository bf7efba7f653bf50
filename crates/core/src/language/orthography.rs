//! Rule-based Vietnamese orthography to IPA mapper.
//!
//! Each word is parsed left to right: one optional onset at the start, then
//! a body loop over vowel clusters, single vowels and codas. Every decision
//! point takes the longest table key that matches. Unmatched letters pass
//! through unchanged and other unmatched characters are dropped, so the
//! mapper never fails.

use super::normalize::normalize;
use super::tables::{
    self, DIPHTHONGS, FINALS, INITIALS, MAX_DIPHTHONG_LEN, MAX_FINAL_LEN, MAX_INITIAL_LEN,
    MIN_DIPHTHONG_LEN, PUNCTUATION, VOWELS,
};
use crate::matching::longest_match;

/// Converts Vietnamese text to a space-delimited phoneme string.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrthographyMapper;

impl OrthographyMapper {
    pub fn new() -> Self {
        Self
    }

    /// Phonemize a whole text. Blank input yields an empty string.
    pub fn phonemize(&self, text: &str) -> String {
        normalize(text)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(|w| self.phonemize_word(w))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Phonemize a single already-normalized word.
    pub fn phonemize_word(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();

        // A lone punctuation token is emitted as-is.
        if let [c] = chars.as_slice() {
            if let Some(mapped) = PUNCTUATION.get(c) {
                return (*mapped).to_string();
            }
        }

        let mut core_end = chars.len();
        while core_end > 0 && PUNCTUATION.contains_key(&chars[core_end - 1]) {
            core_end -= 1;
        }
        let (core, trailing) = chars.split_at(core_end);

        let mut out = parse_core(core);
        for c in trailing {
            if let Some(mapped) = PUNCTUATION.get(c) {
                out.push_str(mapped);
            }
        }
        out
    }
}

fn parse_core(core: &[char]) -> String {
    let mut out = String::new();
    let mut pos = 0;

    if let Some((ipa, len)) =
        longest_match(core, 0, 1..=MAX_INITIAL_LEN, |s| INITIALS.get(s).copied())
    {
        out.push_str(ipa);
        pos = len;
    }

    while pos < core.len() {
        let (fragment, advance) = match_body(core, pos);
        if let Some(fragment) = fragment {
            out.push_str(&fragment);
        }
        pos += advance;
    }

    out
}

/// One body step at `pos`: the emitted fragment (if any) and how far to move.
fn match_body(core: &[char], pos: usize) -> (Option<String>, usize) {
    if let Some((ipa, len)) =
        longest_match(core, pos, MIN_DIPHTHONG_LEN..=MAX_DIPHTHONG_LEN, |s| {
            DIPHTHONGS.get(tables::detone(s).as_str()).copied()
        })
    {
        return (Some(ipa.to_string()), len);
    }

    // Single vowels keep their tone so the toned key is looked up directly.
    if let Some((ipa, len)) = longest_match(core, pos, 1..=1, |s| VOWELS.get(s).copied()) {
        return (Some(ipa.to_string()), len);
    }

    if let Some((ipa, len)) = longest_match(core, pos, 1..=MAX_FINAL_LEN, |s| FINALS.get(s).copied())
    {
        return (Some(ipa.to_string()), len);
    }

    let c = core[pos];
    if c.is_alphabetic() {
        (Some(c.to_string()), 1)
    } else {
        log::trace!("Dropping unmapped character {:?} (U+{:04X})", c, c as u32);
        (None, 1)
    }
}
