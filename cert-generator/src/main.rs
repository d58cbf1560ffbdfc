use std::{io, process::ExitCode};

use anyhow::Context;
use cert_generator::{
	prompt::Prompt,
	repl::{self, Mode},
	Error,
};
use log::error;

mod args;

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let opts = args::options().run();

	match run(&opts) {
		Ok(code) => code,
		Err(e) => {
			error!("{e:#}");
			ExitCode::FAILURE
		},
	}
}

fn run(opts: &args::Options) -> anyhow::Result<ExitCode> {
	let mode = if opts.once { Mode::Once } else { Mode::Loop };
	let mut prompt = Prompt::new(io::stdin().lock(), io::stdout().lock()).out_dir(&opts.out_dir);

	match repl::run(&mut prompt, mode) {
		Ok(()) => Ok(ExitCode::SUCCESS),
		Err(e @ Error::Console(_)) => Err(e).context("terminal is no longer usable"),
		Err(e @ Error::EndOfInput) => Err(e.into()),
		// already reported on the console and logged by the driver
		Err(_) => Ok(ExitCode::FAILURE),
	}
}
