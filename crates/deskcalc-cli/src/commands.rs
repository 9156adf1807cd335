//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use deskcalc::clock::ClockFormat;
use std::path::PathBuf;

/// deskcalc: the desktop calculator widget in your terminal
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to ./deskcalc.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive calculator
    Tui(TuiArgs),

    /// Press keypad keys and print the result
    Press(PressArgs),

    /// Evaluate an expression
    Eval(EvalArgs),

    /// Print the clock text
    Clock(ClockArgs),

    /// Print the page head tags
    Meta,

    /// Print the effective configuration as YAML
    Config,
}

/// Arguments for the tui command
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// Clock format (overrides the config file)
    #[arg(long)]
    pub clock: Option<ClockFormatArg>,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Key labels or aliases, e.g. `12 + 3 =` or `9 sqrt`
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print the full state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression to evaluate
    #[arg(required = true, allow_hyphen_values = true)]
    pub expression: Vec<String>,
}

/// Arguments for the clock command
#[derive(Parser, Debug)]
pub struct ClockArgs {
    /// Clock format (overrides the config file)
    #[arg(short, long)]
    pub format: Option<ClockFormatArg>,
}

/// Clock format as given on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockFormatArg {
    /// Day, date and time
    Full,
    /// Time only
    Time,
    /// Day and date only
    Day,
}

impl From<ClockFormatArg> for ClockFormat {
    fn from(arg: ClockFormatArg) -> Self {
        match arg {
            ClockFormatArg::Full => Self::Full,
            ClockFormatArg::Time => Self::TimeOnly,
            ClockFormatArg::Day => Self::DayOnly,
        }
    }
}
