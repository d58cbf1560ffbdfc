//! Drives the prompt/generate/report cycle.

use std::io::{BufRead, Write};

use log::warn;

use crate::{cert::generate, prompt::Prompt, Error, Result};

/// How many prompt cycles to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	/// Prompt again after every cycle until the input is closed.
	Loop,
	/// Run one cycle and return its outcome.
	Once,
}

/// Run prompt cycles on `prompt`.
///
/// In [Mode::Loop] a failed generation is reported and the next cycle
/// starts; the loop ends with `Ok` once the input is closed. In
/// [Mode::Once] the outcome of the single cycle is returned after it
/// has been reported. Console failures always end the run.
pub fn run<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, mode: Mode) -> Result<()> {
	loop {
		let outcome = prompt.collect().and_then(|request| generate(&request));
		match outcome {
			Err(Error::EndOfInput) => {
				return match mode {
					Mode::Loop => Ok(()),
					Mode::Once => Err(Error::EndOfInput),
				}
			},
			Err(e @ Error::Console(_)) => return Err(e),
			_ => {},
		}
		if let Err(e) = &outcome {
			warn!("certificate generation failed: {}", e.with_causes());
		}
		prompt.report(&outcome)?;
		if mode == Mode::Once {
			return outcome.map(|_| ());
		}
	}
}
