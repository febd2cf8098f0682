//! Command-line interface.
use clap::Parser;
use std::path::PathBuf;

/// Neovim plugin adapter.
///
/// Reads one JSON request from standard input and writes one JSON response
/// line to standard output.  Logs go to standard error.
#[derive(Parser, Debug)]
#[command(name = "nvim-adapter", version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options that shape how every command runs.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Adapter config file (default: <config home>/nvim-adapter/adapter.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the Neovim configuration directory
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Override the directory packages are installed into
    #[arg(long, value_name = "DIR")]
    pub plugin_root: Option<PathBuf>,

    /// Preview changes without applying, regardless of the request context
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}
