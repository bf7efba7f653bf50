//! Voice model configuration.
//!
//! Reads the Piper-style JSON that ships next to a voice model and turns it
//! into the pieces the pipeline needs: the symbol table, default inference
//! scales and the espeak voice id.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SymbolTableError;
use crate::symbols::{ReservedSymbols, SymbolTable};
use crate::types::InferenceScales;

/// Environment variable naming a config file to use when none is given.
pub const CONFIG_ENV: &str = "VNPHON_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InferenceDefaults {
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f32,
    #[serde(default = "default_length_scale")]
    pub length_scale: f32,
    #[serde(default = "default_noise_w")]
    pub noise_w: f32,
}

fn default_noise_scale() -> f32 {
    0.667
}

fn default_length_scale() -> f32 {
    1.0
}

fn default_noise_w() -> f32 {
    0.8
}

impl Default for InferenceDefaults {
    fn default() -> Self {
        Self {
            noise_scale: default_noise_scale(),
            length_scale: default_length_scale(),
            noise_w: default_noise_w(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EspeakSettings {
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_voice() -> String {
    "vi".to_string()
}

impl Default for EspeakSettings {
    fn default() -> Self {
        Self {
            voice: default_voice(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioSettings {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    22050
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

/// A voice model's configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceConfig {
    /// Symbol to id list; only the first id of each list is used.
    pub phoneme_id_map: HashMap<String, Vec<i64>>,
    #[serde(default)]
    pub inference: InferenceDefaults,
    #[serde(default)]
    pub espeak: EspeakSettings,
    #[serde(default)]
    pub audio: AudioSettings,
}

impl VoiceConfig {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read voice config: {}", path.display()))?;
        let config = Self::from_json(&data)
            .with_context(|| format!("Invalid voice config: {}", path.display()))?;
        log::info!(
            "Loaded voice config {} ({} symbols, voice {})",
            path.display(),
            config.phoneme_id_map.len(),
            config.espeak.voice
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse voice config JSON")?;
        Ok(config)
    }

    /// Build the symbol table with the default reserved symbols.
    pub fn symbol_table(&self) -> Result<SymbolTable, SymbolTableError> {
        let mut ids = HashMap::with_capacity(self.phoneme_id_map.len());
        for (symbol, list) in &self.phoneme_id_map {
            let id = list.first().copied().ok_or_else(|| SymbolTableError::EmptyIdList {
                symbol: symbol.clone(),
            })?;
            ids.insert(symbol.clone(), id);
        }
        SymbolTable::new(ids, ReservedSymbols::default())
    }

    pub fn default_scales(&self) -> InferenceScales {
        InferenceScales {
            variability: self.inference.noise_scale,
            duration_scale: self.inference.length_scale,
            prosody_variation: self.inference.noise_w,
        }
    }

    pub fn voice(&self) -> &str {
        &self.espeak.voice
    }
}

/// Resolve the config path: explicit argument first, then `VNPHON_CONFIG`.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    std::env::var(CONFIG_ENV).ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
