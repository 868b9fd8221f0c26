use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use resolve_pr::cli::{Cli, Commands};
use resolve_pr::{color, commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = color::ColorMode::resolve(cli.color);
    logging::init(cli.verbose, cli.quiet, color_mode.should_colorize());

    match run(cli, color_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", color::error(color_mode, format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, color_mode: color::ColorMode) -> Result<()> {
    let announce = cli.verbose > 0 && !cli.quiet;

    match cli.command {
        None => commands::resolve::cmd_resolve(&cli.resolve, announce, color_mode),
        Some(Commands::Resolve(args)) => commands::resolve::cmd_resolve(&args, announce, color_mode),
        Some(Commands::Init {
            global,
            local,
            force,
        }) => commands::init::cmd_init(global, local, force, color_mode),
    }
}
