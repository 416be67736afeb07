//! Benchmark entry point.
//!
//! Wires configuration, logging, and the measurement harness into a
//! command-line binary. Every flag defaults to the canonical benchmark
//! constants, so `rtt-bench` with no arguments runs the standard
//! 100000-trial measurement with the responder on core 1.

use anyhow::{Context, Result};
use clap::Parser;
use rtt_common::BenchConfig;
use rtt_runtime::run_benchmark;
use std::path::PathBuf;
use tracing::{info, warn};

/// Benchmark command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "rtt-bench",
    about = "Cross-core IPC round-trip latency benchmark",
    version,
    long_about = None
)]
struct Args {
    /// Path to a benchmark configuration file (TOML).
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of successful round trips to record (overrides config).
    #[arg(long, short = 'n')]
    trials: Option<u64>,

    /// Unmeasured exchanges before the measured loop (overrides config).
    #[arg(long)]
    warmup: Option<u64>,

    /// Core for the responder thread (overrides config).
    #[arg(long)]
    responder_core: Option<usize>,

    /// Core for the initiator thread (overrides config).
    #[arg(long)]
    initiator_core: Option<usize>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "starting rtt-bench");

    let mut config = load_config(&args)?;

    // Override with command-line arguments
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(warmup) = args.warmup {
        config.warmup = warmup;
    }
    if let Some(core) = args.responder_core {
        config.placement.responder_core = core;
    }
    if let Some(core) = args.initiator_core {
        config.placement.initiator_core = Some(core);
    }
    config
        .validate()
        .context("invalid benchmark configuration")?;

    info!(
        trials = config.trials,
        responder_core = config.placement.responder_core,
        initiator_core = ?config.placement.initiator_core,
        "configuration loaded"
    );

    let report = run_benchmark(&config).context("benchmark failed")?;
    println!("{report}");

    Ok(())
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!(
        "rtt_bench={},rtt_runtime={},rtt_transport={},rtt_common={}",
        level, level, level, level
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Resolution priority (first existing file wins):
/// 1. Command-line `--config` argument
/// 2. `RTT_CONFIG_PATH` environment variable
/// 3. `config/default.toml` (local development)
/// 4. Built-in defaults
fn load_config(args: &Args) -> Result<BenchConfig> {
    // 1. Command-line argument (highest priority)
    if let Some(config_path) = &args.config {
        info!(?config_path, "loading config from command-line argument");
        return BenchConfig::from_file(config_path)
            .with_context(|| format!("failed to load config from {:?}", config_path));
    }

    // 2. Environment variable
    if let Ok(env_path) = std::env::var("RTT_CONFIG_PATH") {
        let config_path = PathBuf::from(&env_path);
        if config_path.exists() {
            info!(?config_path, "loading config from RTT_CONFIG_PATH");
            return BenchConfig::from_file(&config_path).with_context(|| {
                format!("failed to load config from RTT_CONFIG_PATH={:?}", env_path)
            });
        }
        warn!(
            path = %env_path,
            "RTT_CONFIG_PATH set but file does not exist, checking other locations"
        );
    }

    // 3. Local development path
    let local_path = PathBuf::from("config/default.toml");
    if local_path.exists() {
        info!(?local_path, "loading config from local path");
        return BenchConfig::from_file(&local_path)
            .with_context(|| format!("failed to load config from {:?}", local_path));
    }

    // 4. Built-in defaults
    info!("no config file found, using built-in defaults");
    Ok(BenchConfig::default())
}
