//! concord-inspect
//!
//! Reads hex-encoded frames from stdin, one per line, and prints each decoded
//! envelope (or the rejection) as one JSON line on stdout.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use concord_client::config::{self, ConcordConfig};
use concord_client::inspect::inspect_line;
use concord_core::{EventCodec, Role};

const DEFAULT_CONFIG: &str = "concord.yaml";

/// Decode Concord frames from stdin.
#[derive(Parser)]
#[command(name = "concord-inspect")]
#[command(about = "Decode hex-encoded Concord frames from stdin", long_about = None)]
struct Cli {
    /// Side that receives the frames.
    #[arg(short, long, value_enum, default_value_t = Side::Client)]
    role: Side,

    /// Config file (defaults to ./concord.yaml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    /// Decode service-to-client frames.
    Client,
    /// Decode client-to-service frames.
    Server,
}

impl From<Side> for Role {
    fn from(side: Side) -> Self {
        match side {
            Side::Client => Role::Client,
            Side::Server => Role::Server,
        }
    }
}

fn load_config(path: Option<&Path>) -> concord_core::Result<ConcordConfig> {
    match path {
        Some(p) => config::load_from_file(p),
        None if Path::new(DEFAULT_CONFIG).exists() => config::load_from_file(DEFAULT_CONFIG),
        None => Ok(ConcordConfig::default()),
    }
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let role = Role::from(cli.role);
    let codec = EventCodec::new(role);
    tracing::info!(
        ?role,
        protocol_version = cfg.protocol.version,
        max_frame_bytes = cfg.protocol.max_frame_bytes,
        "concord-inspect reading stdin"
    );

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                return ExitCode::FAILURE;
            }
        };
        let Some(report) = inspect_line(&codec, cfg.protocol.max_frame_bytes, &line) else {
            continue;
        };
        let written = serde_json::to_string(&report)
            .map_err(io::Error::from)
            .and_then(|json| writeln!(out, "{json}"));
        if let Err(e) = written {
            tracing::error!(error = %e, "stdout write failed");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
