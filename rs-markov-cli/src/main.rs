use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::error;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
	// Progress messages at info level unless RUST_LOG says otherwise
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();

	let result = match &cli.command {
		Commands::Build(args) => commands::build::run(args),
		Commands::Generate(args) => commands::generate::run(args),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e:#}");
			ExitCode::FAILURE
		}
	}
}
