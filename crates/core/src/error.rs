//! Error types for the text-to-symbol pipeline.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Input,
    Phonemization,
    Tokenization,
    Inference,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input",
            Stage::Phonemization => "phonemization",
            Stage::Tokenization => "tokenization",
            Stage::Inference => "inference",
        };
        f.write_str(name)
    }
}

/// A stage failure. No partial result is attached.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("empty text")]
    EmptyText,

    #[error("phonemization failed")]
    PhonemizationFailed,

    #[error("tokenization failed")]
    TokenizationFailed,

    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

impl PipelineError {
    /// The stage that reported this failure.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::EmptyText => Stage::Input,
            PipelineError::PhonemizationFailed => Stage::Phonemization,
            PipelineError::TokenizationFailed => Stage::Tokenization,
            PipelineError::InferenceFailed(_) => Stage::Inference,
        }
    }
}

/// Problems with a symbol table handed in by the config provider.
#[derive(Debug, Error, PartialEq)]
pub enum SymbolTableError {
    #[error("symbol table has no {role} symbol {symbol:?}")]
    MissingReserved { role: &'static str, symbol: String },

    #[error("symbol {symbol:?} has negative id {id}")]
    NegativeId { symbol: String, id: i64 },

    #[error("symbol {symbol:?} has no id")]
    EmptyIdList { symbol: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(PipelineError::EmptyText.to_string(), "empty text");
        assert_eq!(PipelineError::PhonemizationFailed.to_string(), "phonemization failed");
        assert_eq!(PipelineError::TokenizationFailed.to_string(), "tokenization failed");
        assert_eq!(
            PipelineError::InferenceFailed("model crashed".into()).to_string(),
            "inference failed: model crashed"
        );
    }

    #[test]
    fn test_failure_stages() {
        assert_eq!(PipelineError::EmptyText.stage(), Stage::Input);
        assert_eq!(PipelineError::PhonemizationFailed.stage(), Stage::Phonemization);
        assert_eq!(PipelineError::TokenizationFailed.stage(), Stage::Tokenization);
        assert_eq!(PipelineError::InferenceFailed(String::new()).stage(), Stage::Inference);
        assert_eq!(Stage::Tokenization.to_string(), "tokenization");
    }

    #[test]
    fn test_symbol_table_error_message() {
        let e = SymbolTableError::MissingReserved { role: "pad", symbol: "_".into() };
        assert_eq!(e.to_string(), "symbol table has no pad symbol \"_\"");
    }
}
