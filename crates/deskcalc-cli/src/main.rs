//! deskcalc: the desktop calculator widget from the command line
//!
//! ## Usage
//!
//! ```bash
//! deskcalc tui                    # Interactive calculator
//! deskcalc press 12 + 3 =         # Press keys, print the display
//! deskcalc eval "2 ^ 10"          # Evaluate an expression
//! deskcalc clock --format time    # Print the clock
//! deskcalc meta                   # Print the page head tags
//! ```

use clap::Parser;
use deskcalc::clock::ClockFormat;
use deskcalc_cli::{
    handlers::{calc, info, tui},
    load_config, logging, Cli, CliConfig, CliResult, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let desk = &config.desk;

    let output = match cli.command {
        Commands::Tui(args) => {
            let format = args.clock.map_or(desk.clock.format, ClockFormat::from);
            return tui::execute_tui(desk, format);
        }
        Commands::Press(args) => calc::execute_press(desk, &args)?,
        Commands::Eval(args) => calc::execute_eval(desk, &args)?,
        Commands::Clock(args) => {
            info::execute_clock(args.format.map_or(desk.clock.format, ClockFormat::from))
        }
        Commands::Meta => info::execute_meta(desk),
        Commands::Config => info::execute_config(desk)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    logging::init(verbosity);

    let desk = load_config(cli.config.as_deref())?;
    Ok(CliConfig::new().with_verbosity(verbosity).with_desk(desk))
}
