//! These structs provide the CLI interface for the receipt-points CLI.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// receipt-points: A service that scores purchase receipts for reward points.
///
/// Receipts are submitted as JSON, checked for well-formed fields and kept in memory under a
/// generated id. The points a receipt earns are computed from its retailer name, total, items,
/// purchase date and purchase time.
///
/// Run `serve` to start the HTTP service, or `score` to check a single receipt file offline.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP service.
    ///
    /// Endpoints:
    ///
    /// - POST /receipts/process: submit a receipt, returns {"id": "..."}
    ///
    /// - GET /receipts/{id}/points: returns {"points": N}
    ///
    /// - GET /receipts/{id}: returns the receipt as it was submitted
    ///
    /// Receipts are held in memory only and are gone when the service stops.
    Serve(ServeArgs),
    /// Validate a receipt JSON file and print the points it earns, rule by rule.
    Score(ScoreArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// Path to a JSON configuration file. Without one, built-in defaults are used.
    #[arg(long, env = "RECEIPT_POINTS_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// Args for the `receipt-points serve` command.
#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// The address to listen on, e.g. 0.0.0.0:8080. Overrides the configuration file.
    #[arg(long, env = "RECEIPT_POINTS_BIND")]
    bind: Option<SocketAddr>,
}

impl ServeArgs {
    pub fn new(bind: Option<SocketAddr>) -> Self {
        Self { bind }
    }

    pub fn bind(&self) -> Option<SocketAddr> {
        self.bind
    }
}

/// Args for the `receipt-points score` command.
#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// The receipt JSON file to score.
    receipt: PathBuf,
}

impl ScoreArgs {
    pub fn new(receipt: impl Into<PathBuf>) -> Self {
        Self {
            receipt: receipt.into(),
        }
    }

    pub fn receipt(&self) -> &Path {
        &self.receipt
    }
}
