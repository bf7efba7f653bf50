//! vnphon CLI: Vietnamese text to phonemes and TTS symbol ids.

use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};

use vnphon_core::config::{VoiceConfig, config_path};
use vnphon_core::language::{StrategyChain, get_engine};
use vnphon_core::{InferenceScales, Pipeline, SymbolTable};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "vnphon",
    about = "Convert Vietnamese text to phonemes and TTS model symbol ids",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the phoneme string for a text
    Phonemize(PhonemizeArgs),
    /// Run the full pipeline and print symbol ids
    Encode(EncodeArgs),
    /// Show the symbol table in use
    Symbols(SymbolsArgs),
}

// ─── Shared arguments ────────────────────────────────────────────

#[derive(Parser, Debug)]
struct EngineArgs {
    /// External phonemizer
    #[arg(long, default_value = "auto", value_parser = ["auto", "espeak", "none"])]
    engine: String,

    /// Voice passed to the external phonemizer (default: from config, else "vi")
    #[arg(long)]
    voice: Option<String>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Voice model config JSON (default: $VNPHON_CONFIG, else built-in table)
    #[arg(long)]
    config: Option<PathBuf>,
}

// ─── Subcommands ─────────────────────────────────────────────────

#[derive(Parser, Debug)]
struct PhonemizeArgs {
    /// Text to phonemize
    #[arg(long)]
    text: String,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Text to encode
    #[arg(long)]
    text: String,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Do not wrap ids in BOS/EOS markers
    #[arg(long, default_value_t = false)]
    no_boundary: bool,

    /// Sampling noise (default: from config)
    #[arg(long)]
    noise_scale: Option<f32>,

    /// Duration multiplier, >1 is slower (default: from config)
    #[arg(long)]
    length_scale: Option<f32>,

    /// Phoneme duration noise (default: from config)
    #[arg(long)]
    noise_w: Option<f32>,

    /// Print the full result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SymbolsArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Phonemize(args) => run_phonemize(args),
        Command::Encode(args) => run_encode(args),
        Command::Symbols(args) => run_symbols(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Load the voice config from --config or $VNPHON_CONFIG, if either is set.
fn load_config(args: &ConfigArgs) -> Result<Option<VoiceConfig>> {
    match config_path(args.config.as_deref()) {
        Some(path) => Ok(Some(VoiceConfig::load(&path)?)),
        None => {
            log::debug!("No voice config given, using built-in symbol table");
            Ok(None)
        }
    }
}

fn build_chain(args: &EngineArgs, config: Option<&VoiceConfig>) -> Result<StrategyChain> {
    let voice = args
        .voice
        .clone()
        .or_else(|| config.map(|c| c.voice().to_string()))
        .unwrap_or_else(|| "vi".to_string());
    let engine = get_engine(&args.engine)?;
    let chain = StrategyChain::new(engine, &voice);
    if args.engine == "espeak" && !chain.external_enabled() {
        bail!("espeak-ng was requested but failed to initialize");
    }
    Ok(chain)
}

// ─── Runners ─────────────────────────────────────────────────────

fn run_phonemize(args: PhonemizeArgs) -> Result<()> {
    let chain = build_chain(&args.engine, None)?;
    match chain.phonemize(&args.text) {
        Some(out) => {
            println!("{}", out.phonemes);
            log::info!("Strategy: {}", out.strategy);
        }
        None => log::warn!("No phonemes produced"),
    }
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let chain = build_chain(&args.engine, config.as_ref())?;

    let (table, scales) = match &config {
        Some(c) => (c.symbol_table()?, c.default_scales()),
        None => (SymbolTable::builtin(), InferenceScales::default()),
    };
    let pipeline = Pipeline::new(chain, table, scales);

    let mut request = pipeline
        .request(&args.text)
        .include_boundary(!args.no_boundary);
    if let Some(v) = args.noise_scale {
        request = request.variability(v);
    }
    if let Some(v) = args.length_scale {
        request = request.duration_scale(v);
    }
    if let Some(v) = args.noise_w {
        request = request.prosody_variation(v);
    }

    let result = pipeline
        .run(&request)
        .map_err(|e| anyhow!("{} stage failed: {}", e.stage(), e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.phonemes);
        println!(
            "{}",
            result
                .ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
        log::info!(
            "{} phoneme symbols, {} ids via {} ({} unknown)",
            result.phoneme_count,
            result.token_count,
            result.strategy,
            result.unknown_symbols
        );
    }
    Ok(())
}

fn run_symbols(args: SymbolsArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let table = match &config {
        Some(c) => c.symbol_table()?,
        None => SymbolTable::builtin(),
    };
    let reserved = table.reserved();
    println!("symbols: {}", table.len());
    println!("pad {:?}: {}", reserved.pad, table.pad_id());
    println!("sep {:?}: {}", reserved.sep, table.sep_id());
    match (table.bos_id(), table.eos_id()) {
        (Some(bos), Some(eos)) => {
            println!("bos {:?}: {}", reserved.bos, bos);
            println!("eos {:?}: {}", reserved.eos, eos);
        }
        _ => println!("no boundary markers"),
    }
    Ok(())
}
