//! Vietnamese text to phoneme conversion.

pub mod engine;
pub mod normalize;
pub mod orthography;
pub mod strategy;
pub mod tables;

pub use engine::{EspeakNg, ExternalEngine, get_engine};
pub use orthography::OrthographyMapper;
pub use strategy::{Phonemized, PhonemizeStrategy, StrategyChain};
