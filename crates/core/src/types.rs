//! Request, result and id-sequence records passed between pipeline stages.

use serde::{Deserialize, Serialize};

/// Scalar controls handed to the inference collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InferenceScales {
    /// Sampling noise (Piper `noise_scale`)
    pub variability: f32,
    /// Speaking-rate multiplier, >1 is slower (Piper `length_scale`)
    pub duration_scale: f32,
    /// Phoneme duration noise (Piper `noise_w`)
    pub prosody_variation: f32,
}

impl Default for InferenceScales {
    fn default() -> Self {
        Self {
            variability: 0.667,
            duration_scale: 1.0,
            prosody_variation: 0.8,
        }
    }
}

/// One text to convert, with its inference controls.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub scales: InferenceScales,
    /// Wrap the ids in BOS/EOS markers
    pub include_boundary: bool,
}

impl SynthesisRequest {
    pub fn new(text: &str, scales: InferenceScales) -> Self {
        Self {
            text: text.to_string(),
            scales,
            include_boundary: true,
        }
    }

    pub fn variability(mut self, value: f32) -> Self {
        self.scales.variability = value;
        self
    }

    pub fn duration_scale(mut self, value: f32) -> Self {
        self.scales.duration_scale = value;
        self
    }

    pub fn prosody_variation(mut self, value: f32) -> Self {
        self.scales.prosody_variation = value;
        self
    }

    pub fn include_boundary(mut self, include: bool) -> Self {
        self.include_boundary = include;
        self
    }
}

/// Tokenizer output. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSequence {
    pub ids: Vec<i64>,
    /// Ids between the boundary markers
    pub body_len: usize,
    /// Symbols that were missing from the table and became SEP
    pub unknown: usize,
}

impl SymbolSequence {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.ids
    }
}

/// Successful pipeline output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisResult {
    pub phonemes: String,
    /// Symbols the tokenizer produced for the phoneme string
    pub phoneme_count: usize,
    /// All ids including boundary markers
    pub token_count: usize,
    pub ids: Vec<i64>,
    /// Phonemization tier that produced `phonemes`
    pub strategy: String,
    pub unknown_symbols: usize,
    pub scales: InferenceScales,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scales() {
        let s = InferenceScales::default();
        assert!((s.variability - 0.667).abs() < f32::EPSILON);
        assert!((s.duration_scale - 1.0).abs() < f32::EPSILON);
        assert!((s.prosody_variation - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_request_builder() {
        let req = SynthesisRequest::new("xin chào", InferenceScales::default())
            .variability(0.5)
            .duration_scale(1.2)
            .prosody_variation(0.3)
            .include_boundary(false);
        assert_eq!(req.text, "xin chào");
        assert!((req.scales.variability - 0.5).abs() < f32::EPSILON);
        assert!((req.scales.duration_scale - 1.2).abs() < f32::EPSILON);
        assert!((req.scales.prosody_variation - 0.3).abs() < f32::EPSILON);
        assert!(!req.include_boundary);
    }

    #[test]
    fn test_symbol_sequence_accessors() {
        let seq = SymbolSequence { ids: vec![1, 5, 2], body_len: 1, unknown: 0 };
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
        assert_eq!(seq.as_slice(), &[1, 5, 2]);
    }

    #[test]
    fn test_result_serde_roundtrip() {
        let result = SynthesisResult {
            phonemes: "sin caːɔ!".into(),
            phoneme_count: 9,
            token_count: 11,
            ids: vec![1, 20, 9, 14, 3, 7, 5, 30, 22, 6, 2],
            strategy: "orthography".into(),
            unknown_symbols: 0,
            scales: InferenceScales::default(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: SynthesisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
