//! Phoneme string to model id conversion.
//!
//! Greedy longest-match over the symbol table, up to three characters per
//! symbol. A character no table key covers becomes the separator id, so the
//! output always has the full length of the input.

use crate::matching::longest_match;
use crate::symbols::SymbolTable;
use crate::types::SymbolSequence;

/// Longest symbol the tokenizer will try to match.
pub const MAX_SYMBOL_LEN: usize = 3;

pub struct SymbolTokenizer {
    table: SymbolTable,
}

impl SymbolTokenizer {
    pub fn new(table: SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Encode `phonemes` into ids, optionally wrapped in BOS/EOS.
    ///
    /// An empty body is replaced by a single separator id.
    pub fn encode(&self, phonemes: &str, include_boundary: bool) -> SymbolSequence {
        let chars: Vec<char> = phonemes.chars().collect();
        let sep = self.table.sep_id();
        let mut body = Vec::with_capacity(chars.len());
        let mut unknown = 0;
        let mut pos = 0;

        while pos < chars.len() {
            match longest_match(&chars, pos, 1..=MAX_SYMBOL_LEN, |s| self.table.get(s)) {
                Some((id, len)) => {
                    body.push(id);
                    pos += len;
                }
                None => {
                    log::trace!("No symbol for {:?}, using separator", chars[pos]);
                    body.push(sep);
                    unknown += 1;
                    pos += 1;
                }
            }
        }

        if unknown > 0 {
            log::warn!(
                "{} unknown phoneme symbol(s) replaced with separator in {:?}",
                unknown,
                phonemes
            );
        }

        if body.is_empty() {
            body.push(sep);
        }
        let body_len = body.len();

        let ids = match (include_boundary, self.table.bos_id(), self.table.eos_id()) {
            (true, Some(bos), Some(eos)) => {
                let mut ids = Vec::with_capacity(body_len + 2);
                ids.push(bos);
                ids.extend(body);
                ids.push(eos);
                ids
            }
            _ => body,
        };

        SymbolSequence {
            ids,
            body_len,
            unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::language::tables::{DIPHTHONGS, FINALS, INITIALS, PUNCTUATION, VOWELS};
    use crate::symbols::ReservedSymbols;

    fn table(entries: &[(&str, i64)]) -> SymbolTable {
        let mut map: HashMap<String, i64> = [("_", 0), ("^", 1), ("$", 2), (" ", 3)]
            .into_iter()
            .map(|(s, i)| (s.to_string(), i))
            .collect();
        for &(s, i) in entries {
            map.insert(s.to_string(), i);
        }
        SymbolTable::new(map, ReservedSymbols::default()).unwrap()
    }

    #[test]
    fn test_greedy_longest_symbol() {
        let tok = SymbolTokenizer::new(table(&[("t", 10), ("tʰ", 11), ("a", 12), ("aː", 13)]));
        let seq = tok.encode("tʰaː", false);
        assert_eq!(seq.ids, vec![11, 13]);
        let seq = tok.encode("ta", false);
        assert_eq!(seq.ids, vec![10, 12]);
    }

    #[test]
    fn test_three_char_symbol() {
        let tok = SymbolTokenizer::new(table(&[("i", 10), ("iəw", 20), ("ə", 11), ("w", 12)]));
        assert_eq!(tok.encode("iəw", false).ids, vec![20]);
        assert_eq!(tok.encode("iə", false).ids, vec![10, 11]);
    }

    #[test]
    fn test_boundary_markers() {
        let tok = SymbolTokenizer::new(table(&[("a", 10)]));
        let seq = tok.encode("a a", true);
        assert_eq!(seq.ids, vec![1, 10, 3, 10, 2]);
        assert_eq!(seq.body_len, 3);
    }

    #[test]
    fn test_boundary_skipped_without_bos_eos() {
        let mut map: HashMap<String, i64> = HashMap::new();
        map.insert("_".into(), 0);
        map.insert(" ".into(), 1);
        map.insert("a".into(), 2);
        let tok = SymbolTokenizer::new(SymbolTable::new(map, ReservedSymbols::default()).unwrap());
        assert_eq!(tok.encode("a", true).ids, vec![2]);
    }

    #[test]
    fn test_unknown_symbol_becomes_separator() {
        let tok = SymbolTokenizer::new(table(&[("a", 10), ("b", 11)]));
        let seq = tok.encode("aЖb", true);
        assert_eq!(seq.ids, vec![1, 10, 3, 11, 2]);
        assert_eq!(seq.unknown, 1);
    }

    #[test]
    fn test_empty_input_never_empty_output() {
        let tok = SymbolTokenizer::new(table(&[]));
        assert_eq!(tok.encode("", false).ids, vec![3]);
        assert_eq!(tok.encode("", true).ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_builtin_table_covers_all_mapper_output() {
        let tok = SymbolTokenizer::new(SymbolTable::builtin());
        let values = INITIALS
            .values()
            .chain(VOWELS.values())
            .chain(DIPHTHONGS.values())
            .chain(FINALS.values())
            .chain(PUNCTUATION.values());
        for v in values {
            let seq = tok.encode(v, true);
            assert_eq!(seq.unknown, 0, "unknown symbol in {:?}", v);
            assert!(seq.len() >= 3);
            for id in &seq.ids {
                assert!(tok.table().contains_id(*id));
            }
        }
    }
}
