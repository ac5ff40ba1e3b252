use clap::Parser;
use std::path::PathBuf;

/// Heads-up Hold'em agent speaking the line protocol on stdin/stdout.
#[derive(Parser, Debug)]
#[command(
    name = "deepgreen",
    version,
    about = "Heads-up Hold'em agent: reads game lines on stdin, answers decisions on stdout"
)]
pub struct DeepGreenCli {
    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(long)]
    pub debug: bool,
    /// Append log lines to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// TOML configuration file (default: $DEEPGREEN_CONFIG)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
    /// Strategy set to play with; overrides config and environment
    #[arg(long, value_name = "NAME")]
    pub strategy: Option<String>,
}
