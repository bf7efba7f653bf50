//! Greedy longest-match lookup shared by the mapper and the tokenizer.

use std::ops::RangeInclusive;

/// Try substrings of `chars` starting at `pos`, longest length first, against
/// `lookup`. Returns the first hit together with its length in characters.
///
/// Lengths that would run past the end of `chars` are skipped.
pub fn longest_match<V>(
    chars: &[char],
    pos: usize,
    lengths: RangeInclusive<usize>,
    mut lookup: impl FnMut(&str) -> Option<V>,
) -> Option<(V, usize)> {
    for len in lengths.rev() {
        if len == 0 || pos + len > chars.len() {
            continue;
        }
        let candidate: String = chars[pos..pos + len].iter().collect();
        if let Some(value) = lookup(&candidate) {
            return Some((value, len));
        }
    }
    None
}
