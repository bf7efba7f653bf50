//! Vietnamese text to TTS symbol-id conversion.
//!
//! Rule-based orthography mapping with an optional external phonemizer in
//! front of it, followed by greedy tokenization against a model's symbol
//! table.

pub mod config;
pub mod error;
pub mod language;
pub mod matching;
pub mod pipeline;
pub mod symbols;
pub mod tokenize;
pub mod types;

pub use config::VoiceConfig;
pub use error::{PipelineError, Stage, SymbolTableError};
pub use pipeline::{Inference, Pipeline};
pub use symbols::SymbolTable;
pub use tokenize::SymbolTokenizer;
pub use types::{InferenceScales, SymbolSequence, SynthesisRequest, SynthesisResult};
