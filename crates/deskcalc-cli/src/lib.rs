//! deskcalc CLI library
//!
//! Argument parsing, configuration loading and the command handlers behind
//! the `deskcalc` binary.

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{ClockArgs, ClockFormatArg, Cli, Commands, EvalArgs, PressArgs, TuiArgs};
pub use config::{
    config_path, load as load_config, AnalyticsSection, CliConfig, ClockSection, DeskConfig,
    Verbosity, DEFAULT_CONFIG_FILE,
};
pub use error::{CliError, CliResult};
