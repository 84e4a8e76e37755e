//! atlas-server: host for the Atlas-Alert zone engine
//!
//! Loads a zone file, then either serves a single alert session over a REST
//! API or replays a recorded track offline. Classification itself lives in
//! `atlas-core`.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

pub mod config;
pub mod notify;
pub mod replay;
pub mod web;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Zone definition file (JSON, `{ "zones": [...] }`)
    #[arg(short, long)]
    pub zones: Option<PathBuf>,

    /// Port for the REST API
    #[arg(short, long, default_value_t = 3001)]
    pub port: u16,

    /// Replay a JSON-lines track file instead of serving, then exit
    #[arg(long)]
    pub replay: Option<PathBuf>,
}
