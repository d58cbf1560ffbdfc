//! Command Line argument parsing
#![allow(missing_docs)]

use std::path::PathBuf;

use bpaf::Bpaf;

#[derive(Clone, Debug, Bpaf)]
#[bpaf(options, version)]
/// Interactive self-signed TLS certificate generator
pub struct Options {
	/// Directory relative certificate and key paths are written to
	#[bpaf(long, argument("DIR"), fallback(PathBuf::from(".")), debug_fallback)]
	pub out_dir: PathBuf,
	/// Generate a single certificate and exit, failing if it could not be written
	#[bpaf(long)]
	pub once: bool,
}
