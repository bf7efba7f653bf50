//! Static Vietnamese orthography tables.
//!
//! Keys are lowercase orthographic substrings, values are IPA-like symbols.
//! Keys are unique within a table but may repeat across tables ("ng" is both
//! an initial and a final); the mapper picks the table by position.

use std::collections::{BTreeSet, HashMap};

/// The twelve vowel letters and their five toned forms, in the order
/// huyền (grave), sắc (acute), hỏi (hook), ngã (tilde), nặng (dot below).
pub const TONED_VOWELS: &[(char, [char; 5])] = &[
    ('a', ['à', 'á', 'ả', 'ã', 'ạ']),
    ('ă', ['ằ', 'ắ', 'ẳ', 'ẵ', 'ặ']),
    ('â', ['ầ', 'ấ', 'ẩ', 'ẫ', 'ậ']),
    ('e', ['è', 'é', 'ẻ', 'ẽ', 'ẹ']),
    ('ê', ['ề', 'ế', 'ể', 'ễ', 'ệ']),
    ('i', ['ì', 'í', 'ỉ', 'ĩ', 'ị']),
    ('o', ['ò', 'ó', 'ỏ', 'õ', 'ọ']),
    ('ô', ['ồ', 'ố', 'ổ', 'ỗ', 'ộ']),
    ('ơ', ['ờ', 'ớ', 'ở', 'ỡ', 'ợ']),
    ('u', ['ù', 'ú', 'ủ', 'ũ', 'ụ']),
    ('ư', ['ừ', 'ứ', 'ử', 'ữ', 'ự']),
    ('y', ['ỳ', 'ý', 'ỷ', 'ỹ', 'ỵ']),
];

/// Nucleus quality of each base vowel letter.
const VOWEL_IPA: &[(char, &str)] = &[
    ('a', "aː"),
    ('ă', "a"),
    ('â', "ə"),
    ('e', "ɛ"),
    ('ê', "e"),
    ('i', "i"),
    ('o', "ɔ"),
    ('ô', "o"),
    ('ơ', "əː"),
    ('u', "u"),
    ('ư', "ɨ"),
    ('y', "i"),
];

/// Longest key length in the initials table.
pub const MAX_INITIAL_LEN: usize = 3;
/// Longest key length in the diphthongs table.
pub const MAX_DIPHTHONG_LEN: usize = 3;
/// Shortest key length in the diphthongs table.
pub const MIN_DIPHTHONG_LEN: usize = 2;
/// Longest key length in the finals table.
pub const MAX_FINAL_LEN: usize = 2;

lazy_static::lazy_static! {
    /// Onset consonants, including the digraph and trigraph spellings.
    pub static ref INITIALS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // Trigraph
        m.insert("ngh", "ŋ");
        // Digraphs
        m.insert("ng", "ŋ");
        m.insert("nh", "ɲ");
        m.insert("ch", "c");
        m.insert("tr", "ʈ");
        m.insert("th", "tʰ");
        m.insert("ph", "f");
        m.insert("kh", "x");
        m.insert("gh", "ɣ");
        m.insert("gi", "z");
        m.insert("qu", "kw");
        // Single letters
        m.insert("b", "ɓ");
        m.insert("c", "k");
        m.insert("d", "z");
        m.insert("đ", "ɗ");
        m.insert("g", "ɣ");
        m.insert("h", "h");
        m.insert("k", "k");
        m.insert("l", "l");
        m.insert("m", "m");
        m.insert("n", "n");
        m.insert("p", "p");
        m.insert("q", "k");
        m.insert("r", "ʐ");
        m.insert("s", "ʂ");
        m.insert("t", "t");
        m.insert("v", "v");
        m.insert("x", "s");
        m
    };

    /// Single vowel letters in every tone, keyed by the toned character.
    pub static ref VOWELS: HashMap<String, &'static str> = {
        let mut m = HashMap::new();
        for &(base, toned) in TONED_VOWELS {
            let ipa = VOWEL_IPA
                .iter()
                .find(|(c, _)| *c == base)
                .map(|(_, ipa)| *ipa)
                .unwrap_or("");
            m.insert(base.to_string(), ipa);
            for t in toned {
                m.insert(t.to_string(), ipa);
            }
        }
        m
    };

    /// Vowel clusters, keyed by their detoned spelling.
    pub static ref DIPHTHONGS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // Triphthongs
        m.insert("iêu", "iəw");
        m.insert("yêu", "iəw");
        m.insert("ươi", "ɨəj");
        m.insert("ươu", "ɨəw");
        m.insert("uôi", "uəj");
        m.insert("oai", "waːj");
        m.insert("oay", "waj");
        m.insert("uây", "wəj");
        m.insert("uyê", "wiə");
        m.insert("uya", "wiə");
        // Centring diphthongs
        m.insert("iê", "iə");
        m.insert("yê", "iə");
        m.insert("ia", "iə");
        m.insert("ươ", "ɨə");
        m.insert("ưa", "ɨə");
        m.insert("uô", "uə");
        m.insert("ua", "uə");
        // Off-glides
        m.insert("ai", "aːj");
        m.insert("ay", "aj");
        m.insert("ây", "əj");
        m.insert("au", "aw");
        m.insert("âu", "əw");
        m.insert("eo", "ɛw");
        m.insert("êu", "ew");
        m.insert("iu", "iw");
        m.insert("oi", "ɔj");
        m.insert("ôi", "oj");
        m.insert("ơi", "əːj");
        m.insert("ui", "uj");
        m.insert("ưi", "ɨj");
        m.insert("ưu", "ɨw");
        // On-glides
        m.insert("oa", "waː");
        m.insert("oă", "wa");
        m.insert("oe", "wɛ");
        m.insert("uy", "wi");
        m.insert("uê", "we");
        m.insert("uơ", "wəː");
        m
    };

    /// Coda consonants.
    pub static ref FINALS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ch", "k");
        m.insert("nh", "ɲ");
        m.insert("ng", "ŋ");
        m.insert("c", "k");
        m.insert("m", "m");
        m.insert("n", "n");
        m.insert("p", "p");
        m.insert("t", "t");
        m
    };

    /// Punctuation symbols that survive into the phoneme string.
    pub static ref PUNCTUATION: HashMap<char, &'static str> = {
        let mut m = HashMap::new();
        m.insert('.', ".");
        m.insert(',', ",");
        m.insert('!', "!");
        m.insert('?', "?");
        m.insert(';', ";");
        m.insert(':', ":");
        m.insert('…', "…");
        m.insert('–', ",");
        m.insert('—', ",");
        m
    };

    /// Toned vowel character to its toneless base.
    pub static ref TONE_REMOVAL: HashMap<char, char> = {
        let mut m = HashMap::new();
        for &(base, toned) in TONED_VOWELS {
            for t in toned {
                m.insert(t, base);
            }
        }
        m
    };
}

/// Strip the tone mark from a single character. Characters without a tone
/// mark map to themselves; vowel quality marks (â, ơ, ư...) are kept.
pub fn remove_tone(c: char) -> char {
    TONE_REMOVAL.get(&c).copied().unwrap_or(c)
}

/// Strip tone marks from every character of `s`.
pub fn detone(s: &str) -> String {
    s.chars().map(remove_tone).collect()
}

/// Every distinct character any table can emit, sorted.
pub fn emitted_symbols() -> BTreeSet<char> {
    INITIALS
        .values()
        .chain(VOWELS.values())
        .chain(DIPHTHONGS.values())
        .chain(FINALS.values())
        .chain(PUNCTUATION.values())
        .flat_map(|v| v.chars())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_removal_covers_all_marks() {
        assert_eq!(TONE_REMOVAL.len(), 60);
        for &(base, toned) in TONED_VOWELS {
            for t in toned {
                assert_eq!(remove_tone(t), base, "{} should detone to {}", t, base);
            }
            assert_eq!(remove_tone(base), base);
        }
    }

    #[test]
    fn test_detone_keeps_quality_marks() {
        assert_eq!(detone("mấu"), "mâu");
        assert_eq!(detone("người"), "ngươi");
        assert_eq!(detone("đẹp"), "đep");
    }

    #[test]
    fn test_vowels_cover_every_tone() {
        assert_eq!(VOWELS.len(), 72);
        assert_eq!(VOWELS.get("à"), Some(&"aː"));
        assert_eq!(VOWELS.get("ợ"), Some(&"əː"));
        assert_eq!(VOWELS.get("ỹ"), Some(&"i"));
    }

    #[test]
    fn test_key_lengths_within_bounds() {
        for k in INITIALS.keys() {
            assert!(k.chars().count() <= MAX_INITIAL_LEN);
        }
        for k in DIPHTHONGS.keys() {
            let n = k.chars().count();
            assert!((MIN_DIPHTHONG_LEN..=MAX_DIPHTHONG_LEN).contains(&n), "{}", k);
        }
        for k in FINALS.keys() {
            assert!(k.chars().count() <= MAX_FINAL_LEN);
        }
    }

    #[test]
    fn test_ao_is_not_a_cluster() {
        // "chào" splits into onset, "à" and "o" through the vowel table
        assert!(!DIPHTHONGS.contains_key("ao"));
        assert_eq!(VOWELS.get("o"), Some(&"ɔ"));
    }

    #[test]
    fn test_diphthong_keys_are_toneless() {
        for k in DIPHTHONGS.keys() {
            assert_eq!(&detone(k), k);
        }
    }

    #[test]
    fn test_emitted_symbols() {
        let symbols = emitted_symbols();
        for c in ['ŋ', 'ɲ', 'ʰ', 'ː', 'ɨ', 'ə', '!', '.'] {
            assert!(symbols.contains(&c), "missing {}", c);
        }
    }
}
