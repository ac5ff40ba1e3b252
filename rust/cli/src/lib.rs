//! # deepgreen CLI Library
//!
//! An autonomous heads-up Hold'em agent. A match host feeds it one
//! whitespace-separated line per game event on stdin; every `Action` line is
//! answered with exactly one `"<action> <amount>"` line on stdout.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, resolves configuration, installs logging and
//! drives a [`Bot`] over the input until end of stream.
//!
//! ```no_run
//! use std::io;
//! let stdin = io::stdin();
//! let code = deepgreen_cli::run(
//!     ["deepgreen", "--debug"],
//!     &mut stdin.lock(),
//!     &mut io::stdout(),
//!     &mut io::stderr(),
//! );
//! assert_eq!(code, 0);
//! ```
//!
//! ## Modules
//!
//! - [`protocol`]: line dispatch and the per-line [`LineOutcome`]
//! - [`state`]: settings, match state and round resets
//! - [`hand`]: hole cards, table cards and per-player info
//! - [`betting`]: the bet decision rule
//! - [`output`]: reply lines
//! - [`config`]: defaults, TOML file and environment overrides

use clap::Parser;
use std::io::{BufRead, Write};
use tracing::{error, info};

pub mod betting;
pub mod cli;
pub mod config;
mod error;
pub mod exit_code;
pub mod hand;
pub mod io_utils;
pub mod logging;
pub mod output;
pub mod protocol;
pub mod state;

use cli::DeepGreenCli;
use config::{ConfigResolved, ValueSource};

pub use error::{CliError, LineError};
pub use protocol::{Bot, LineOutcome, RunSummary};

/// Main entry point for the agent.
///
/// # Returns
///
/// Exit code: `0` once input ends (or after `--print-config`), `2` for bad
/// arguments, bad configuration, or a reply stream that can no longer be
/// written.
pub fn run<I, S>(args: I, input: &mut dyn BufRead, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DeepGreenCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    exit_code::ERROR
                }
            };
        }
    };

    match execute(cli, input, out) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn execute(cli: DeepGreenCli, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), CliError> {
    let mut resolved = config::load_with_sources(cli.config.as_deref())?;
    if let Some(strategy) = cli.strategy {
        resolved.config.strategy = strategy;
        resolved.sources.strategy = ValueSource::Cli;
    }

    if cli.print_config {
        return print_config(&resolved, out);
    }

    logging::init_logging(cli.debug, cli.log_file.as_deref())?;

    let ConfigResolved { config, .. } = resolved;
    let strategies = deepgreen_ai::create_strategy_set(&config.strategy)?;
    let options = state::BotOptions {
        default_big_blind: config.default_big_blind,
        reset_players_on_round: config.reset_players_on_round,
        players: config.players.clone(),
    };
    info!(
        strategy = %config.strategy,
        self_player = %config.self_player,
        default_big_blind = config.default_big_blind,
        "deepgreen ready"
    );

    let mut bot = Bot::new(&config.self_player, strategies, options);
    let summary = bot.run(input, out)?;
    info!(
        lines = summary.lines,
        responses = summary.responses,
        fallbacks = summary.fallbacks,
        failures = summary.failures,
        malformed = summary.malformed,
        "input closed, exiting"
    );
    Ok(())
}

fn print_config(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "default_big_blind": {
            "value": config.default_big_blind,
            "source": sources.default_big_blind,
        },
        "reset_players_on_round": {
            "value": config.reset_players_on_round,
            "source": sources.reset_players_on_round,
        },
        "strategy": {
            "value": config.strategy,
            "source": sources.strategy,
        },
        "self_player": {
            "value": config.self_player,
            "source": sources.self_player,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = DeepGreenCli::try_parse_from([
            "deepgreen",
            "--debug",
            "--log-file",
            "bot.log",
            "--config",
            "bot.toml",
            "--strategy",
            "baseline",
            "--print-config",
        ])
        .unwrap();
        assert!(cli.debug);
        assert!(cli.print_config);
        assert_eq!(cli.log_file.unwrap().to_str(), Some("bot.log"));
        assert_eq!(cli.config.unwrap().to_str(), Some("bot.toml"));
        assert_eq!(cli.strategy.as_deref(), Some("baseline"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = DeepGreenCli::try_parse_from(["deepgreen"]).unwrap();
        assert!(!cli.debug);
        assert!(cli.log_file.is_none());
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let mut input: &[u8] = b"";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["deepgreen", "--bogus"], &mut input, &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(!err.is_empty());
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let mut input: &[u8] = b"";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["deepgreen", "--help"], &mut input, &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(String::from_utf8(out).unwrap().contains("--print-config"));
    }
}
