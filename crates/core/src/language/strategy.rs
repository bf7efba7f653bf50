//! Ordered phonemization fallback chain.
//!
//! Tiers are tried top-down for every call and the first one that returns a
//! non-blank phoneme string wins:
//! - ExternalTier: an [`ExternalEngine`], present only if it initialized
//! - OrthographyTier: the rule-based [`OrthographyMapper`]
//! - PassthroughTier: cleaned raw text, the terminal tier

use super::engine::ExternalEngine;
use super::normalize::passthrough;
use super::orthography::OrthographyMapper;

/// One tier of the fallback chain.
pub trait PhonemizeStrategy: Send + Sync {
    /// Tier name, reported with every result it produces.
    fn name(&self) -> &str;

    /// Phonemize `text`, or `None` if this tier has nothing to offer.
    fn phonemize(&self, text: &str) -> Option<String>;
}

/// Wraps an initialized external engine and the voice it should speak with.
pub struct ExternalTier {
    engine: Box<dyn ExternalEngine>,
    voice: String,
}

impl ExternalTier {
    /// Initialize `engine` once. Returns `None` (and logs why) on failure.
    pub fn init(engine: Box<dyn ExternalEngine>, voice: &str) -> Option<Self> {
        match engine.initialize() {
            Ok(()) => {
                log::info!("External phonemizer '{}' enabled (voice {})", engine.name(), voice);
                Some(Self {
                    engine,
                    voice: voice.to_string(),
                })
            }
            Err(e) => {
                log::warn!(
                    "External phonemizer '{}' failed to initialize, disabled: {:#}",
                    engine.name(),
                    e
                );
                None
            }
        }
    }
}

impl PhonemizeStrategy for ExternalTier {
    fn name(&self) -> &str {
        self.engine.name()
    }

    fn phonemize(&self, text: &str) -> Option<String> {
        let out = self.engine.phonemize(text, &self.voice)?;
        let out = out.trim();
        if out.is_empty() {
            None
        } else {
            Some(out.to_string())
        }
    }
}

/// Rule-based Vietnamese mapper tier.
#[derive(Default)]
pub struct OrthographyTier {
    mapper: OrthographyMapper,
}

impl PhonemizeStrategy for OrthographyTier {
    fn name(&self) -> &str {
        "orthography"
    }

    fn phonemize(&self, text: &str) -> Option<String> {
        let out = self.mapper.phonemize(text);
        if out.is_empty() { None } else { Some(out) }
    }
}

/// Letters, digits and basic punctuation of the input, unchanged.
#[derive(Default)]
pub struct PassthroughTier;

impl PhonemizeStrategy for PassthroughTier {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn phonemize(&self, text: &str) -> Option<String> {
        let out = passthrough(text);
        if out.is_empty() { None } else { Some(out) }
    }
}

/// Output of a successful chain call.
#[derive(Debug, Clone, PartialEq)]
pub struct Phonemized {
    pub phonemes: String,
    /// Name of the tier that produced `phonemes`.
    pub strategy: String,
}

/// The fallback chain. Built once, immutable afterwards.
pub struct StrategyChain {
    tiers: Vec<Box<dyn PhonemizeStrategy>>,
    external_enabled: bool,
}

impl StrategyChain {
    /// Standard chain: optional external engine, then mapper, then passthrough.
    ///
    /// The engine is initialized here and only here.
    pub fn new(engine: Option<Box<dyn ExternalEngine>>, voice: &str) -> Self {
        let mut tiers: Vec<Box<dyn PhonemizeStrategy>> = Vec::new();
        let mut external_enabled = false;
        if let Some(tier) = engine.and_then(|e| ExternalTier::init(e, voice)) {
            tiers.push(Box::new(tier));
            external_enabled = true;
        }
        tiers.push(Box::new(OrthographyTier::default()));
        tiers.push(Box::new(PassthroughTier));
        Self {
            tiers,
            external_enabled,
        }
    }

    /// Chain without an external engine.
    pub fn offline() -> Self {
        Self::new(None, "")
    }

    /// Chain over an arbitrary tier list, tried in the given order.
    pub fn from_tiers(tiers: Vec<Box<dyn PhonemizeStrategy>>) -> Self {
        Self {
            tiers,
            external_enabled: false,
        }
    }

    /// Whether the external engine made it into the chain.
    pub fn external_enabled(&self) -> bool {
        self.external_enabled
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Run the tiers in order; `None` only if every tier came up empty.
    pub fn phonemize(&self, text: &str) -> Option<Phonemized> {
        for tier in &self.tiers {
            match tier.phonemize(text) {
                Some(phonemes) => {
                    log::debug!("Phonemized via {}: {}", tier.name(), phonemes);
                    return Some(Phonemized {
                        phonemes,
                        strategy: tier.name().to_string(),
                    });
                }
                None => log::debug!("Tier {} produced nothing, falling through", tier.name()),
            }
        }
        None
    }
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::offline()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{Result, bail};

    /// Engine double that records how often it is asked to phonemize.
    pub(crate) struct MockEngine {
        pub init_ok: bool,
        pub reply: Option<String>,
        pub calls: Arc<AtomicUsize>,
    }

    impl MockEngine {
        pub(crate) fn new(init_ok: bool, reply: Option<&str>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let engine = Self {
                init_ok,
                reply: reply.map(|s| s.to_string()),
                calls: Arc::clone(&calls),
            };
            (engine, calls)
        }
    }

    impl ExternalEngine for MockEngine {
        fn name(&self) -> &str {
            "mock"
        }

        fn initialize(&self) -> Result<()> {
            if self.init_ok {
                Ok(())
            } else {
                bail!("missing runtime data")
            }
        }

        fn phonemize(&self, _text: &str, _voice: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[test]
    fn test_offline_chain_order() {
        let chain = StrategyChain::offline();
        assert!(!chain.external_enabled());
        assert_eq!(chain.tier_names(), vec!["orthography", "passthrough"]);
    }

    #[test]
    fn test_external_engine_wins() {
        let (engine, calls) = MockEngine::new(true, Some(" sin caːw "));
        let chain = StrategyChain::new(Some(Box::new(engine)), "vi");
        assert!(chain.external_enabled());
        let out = chain.phonemize("xin chào").unwrap();
        assert_eq!(out.phonemes, "sin caːw");
        assert_eq!(out.strategy, "mock");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blank_engine_output_falls_through() {
        let (engine, calls) = MockEngine::new(true, Some("   "));
        let chain = StrategyChain::new(Some(Box::new(engine)), "vi");
        let out = chain.phonemize("xin chào").unwrap();
        assert_eq!(out.strategy, "orthography");
        assert_eq!(out.phonemes, "sin caːɔ");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let (engine, _) = MockEngine::new(true, None);
        let chain = StrategyChain::new(Some(Box::new(engine)), "vi");
        assert_eq!(chain.phonemize("bà").unwrap().strategy, "orthography");
    }

    #[test]
    fn test_failed_init_never_calls_engine() {
        let (engine, calls) = MockEngine::new(false, Some("x"));
        let chain = StrategyChain::new(Some(Box::new(engine)), "vi");
        assert!(!chain.external_enabled());
        for _ in 0..5 {
            assert_eq!(chain.phonemize("xin chào").unwrap().strategy, "orthography");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_passthrough_is_terminal() {
        let chain = StrategyChain::offline();
        let out = chain.phonemize("2024").unwrap();
        assert_eq!(out.strategy, "passthrough");
        assert_eq!(out.phonemes, "2024");
    }

    #[test]
    fn test_everything_empty() {
        let chain = StrategyChain::offline();
        assert_eq!(chain.phonemize("@#$%"), None);
    }

    #[test]
    fn test_custom_tier_list() {
        let chain = StrategyChain::from_tiers(vec![Box::new(PassthroughTier)]);
        assert_eq!(chain.phonemize("Xin chào").unwrap().phonemes, "xin chào");
    }
}
