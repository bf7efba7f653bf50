//! Text to symbol-id pipeline.
//!
//! normalize -> phonemize (fallback chain) -> tokenize -> inference. Each
//! stage must succeed for the next to run; the first failure is returned
//! as a [`PipelineError`] and nothing is retried here.

use anyhow::Result;

use crate::config::VoiceConfig;
use crate::error::PipelineError;
use crate::language::engine::ExternalEngine;
use crate::language::normalize::{is_blank, normalize};
use crate::language::strategy::StrategyChain;
use crate::symbols::SymbolTable;
use crate::tokenize::SymbolTokenizer;
use crate::types::{InferenceScales, SynthesisRequest, SynthesisResult};

/// The neural model that turns ids into audio samples.
pub trait Inference: Send + Sync {
    fn infer(&self, ids: &[i64], scales: &InferenceScales) -> Result<Vec<f32>>;
}

/// Shared, read-only pipeline. Safe to call from several threads at once.
pub struct Pipeline {
    chain: StrategyChain,
    tokenizer: SymbolTokenizer,
    default_scales: InferenceScales,
}

impl Pipeline {
    pub fn new(chain: StrategyChain, table: SymbolTable, default_scales: InferenceScales) -> Self {
        Self {
            chain,
            tokenizer: SymbolTokenizer::new(table),
            default_scales,
        }
    }

    /// Build from a voice config, initializing `engine` once if given.
    pub fn from_config(config: &VoiceConfig, engine: Option<Box<dyn ExternalEngine>>) -> Result<Self> {
        let table = config.symbol_table()?;
        let chain = StrategyChain::new(engine, config.voice());
        Ok(Self::new(chain, table, config.default_scales()))
    }

    /// Rule-based only, built-in symbol table, default scales.
    pub fn offline() -> Self {
        Self::new(
            StrategyChain::offline(),
            SymbolTable::builtin(),
            InferenceScales::default(),
        )
    }

    pub fn chain(&self) -> &StrategyChain {
        &self.chain
    }

    pub fn table(&self) -> &SymbolTable {
        self.tokenizer.table()
    }

    pub fn default_scales(&self) -> InferenceScales {
        self.default_scales
    }

    /// A request for `text` carrying this pipeline's default scales.
    pub fn request(&self, text: &str) -> SynthesisRequest {
        SynthesisRequest::new(text, self.default_scales)
    }

    /// Convert the request text to ids. Inference is not invoked.
    pub fn run(&self, request: &SynthesisRequest) -> Result<SynthesisResult, PipelineError> {
        if is_blank(&request.text) {
            log::debug!("Rejecting blank input");
            return Err(PipelineError::EmptyText);
        }

        let text = normalize(&request.text);

        let phonemized = self
            .chain
            .phonemize(&text)
            .filter(|p| !p.phonemes.is_empty())
            .ok_or(PipelineError::PhonemizationFailed)?;

        let seq = self
            .tokenizer
            .encode(&phonemized.phonemes, request.include_boundary);
        if seq.is_empty() {
            return Err(PipelineError::TokenizationFailed);
        }

        log::debug!(
            "{:?} -> {} phoneme symbols, {} ids via {}",
            text,
            seq.body_len,
            seq.len(),
            phonemized.strategy
        );

        Ok(SynthesisResult {
            phonemes: phonemized.phonemes,
            phoneme_count: seq.body_len,
            token_count: seq.len(),
            unknown_symbols: seq.unknown,
            ids: seq.ids,
            strategy: phonemized.strategy,
            scales: request.scales,
        })
    }

    /// [`run`](Self::run), then hand the ids to `model`.
    pub fn synthesize(
        &self,
        request: &SynthesisRequest,
        model: &dyn Inference,
    ) -> Result<(SynthesisResult, Vec<f32>), PipelineError> {
        let result = self.run(request)?;
        let audio = model
            .infer(&result.ids, &result.scales)
            .map_err(|e| PipelineError::InferenceFailed(format!("{:#}", e)))?;
        Ok((result, audio))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::offline()
    }
}
