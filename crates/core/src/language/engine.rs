//! External grapheme-to-phoneme engines.
//!
//! An engine is initialized once when the strategy chain is built. If that
//! fails the engine is left out of the chain for the rest of the process.
//! - EspeakNg: the system `espeak-ng` binary, called as a subprocess

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// A phonemizer that lives outside this crate.
pub trait ExternalEngine: Send + Sync {
    /// Engine name for logs and diagnostics.
    fn name(&self) -> &str;

    /// One-time setup. An error disables the engine permanently.
    fn initialize(&self) -> Result<()>;

    /// Phonemize `text` with the given voice, or `None` when the engine
    /// produced nothing usable.
    fn phonemize(&self, text: &str, voice: &str) -> Option<String>;
}

/// espeak-ng backend via subprocess.
pub struct EspeakNg {
    pub binary: String,
    /// espeak-ng data directory, passed as `--path` when set.
    pub data_path: Option<PathBuf>,
}

impl EspeakNg {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
            data_path: None,
        }
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(path) = &self.data_path {
            cmd.arg(format!("--path={}", path.display()));
        }
        cmd
    }
}

impl Default for EspeakNg {
    fn default() -> Self {
        Self::new("espeak-ng")
    }
}

impl ExternalEngine for EspeakNg {
    fn name(&self) -> &str {
        "espeak-ng"
    }

    fn initialize(&self) -> Result<()> {
        let output = self
            .command()
            .arg("--version")
            .output()
            .with_context(|| format!("Failed to run {}", self.binary))?;
        if !output.status.success() {
            bail!(
                "{} --version exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        log::debug!(
            "espeak-ng ready: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }

    fn phonemize(&self, text: &str, voice: &str) -> Option<String> {
        let output = match self
            .command()
            .args(["-q", "--ipa", "-v", voice])
            .arg(text)
            .output()
        {
            Ok(o) => o,
            Err(e) => {
                log::debug!("espeak-ng failed to start: {}", e);
                return None;
            }
        };
        if !output.status.success() {
            log::debug!(
                "espeak-ng exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }
        let stdout = String::from_utf8(output.stdout).ok()?;
        // espeak-ng prints one line per clause.
        let phonemes = stdout.split_whitespace().collect::<Vec<_>>().join(" ");
        if phonemes.is_empty() {
            None
        } else {
            Some(phonemes)
        }
    }
}

/// Get an external engine by name.
///
/// Modes:
/// - "espeak": use espeak-ng; callers may treat a failed initialize as fatal.
/// - "none": no external engine; the rule-based mapper is used.
/// - "auto": espeak-ng, left out of the chain if it fails to initialize.
///
/// Availability is decided by [`ExternalEngine::initialize`] when the chain
/// is built, so the binary is only started once.
pub fn get_engine(name: &str) -> Result<Option<Box<dyn ExternalEngine>>> {
    match name {
        "auto" | "espeak" => {
            log::debug!("Selected espeak-ng engine ({} mode)", name);
            Ok(Some(Box::new(EspeakNg::default())))
        }
        "none" => {
            log::info!("No external engine, using rule-based phonemizer");
            Ok(None)
        }
        _ => bail!("Unknown engine: '{}'. Available: auto, espeak, none", name),
    }
}
