use std::{fmt, io, net::AddrParseError, num::ParseIntError, path::PathBuf};

#[derive(Debug)]
#[non_exhaustive]
/// The error type of the cert-generator crate
pub enum Error {
	/// The lifetime line was not a base-10 integer
	InvalidLifetime {
		/// The rejected input
		input: String,
		/// Why it was rejected
		source: ParseIntError,
	},
	/// A usage token was not an integer
	InvalidUsage {
		/// The rejected token
		token: String,
		/// Why it was rejected
		source: ParseIntError,
	},
	/// A usage code outside of the known extended key usage table
	UnknownUsage(i64),
	/// An IP address token could not be parsed
	InvalidIpAddress {
		/// The rejected token
		token: String,
		/// Why it was rejected
		source: AddrParseError,
	},
	/// Reading answers or writing prompts failed
	Console(io::Error),
	/// The prompt stream was closed
	EndOfInput,
	/// The P-256 key pair could not be generated
	KeyGeneration,
	/// The system random source could not provide a serial number
	SerialNumber(rand::Error),
	/// rcgen rejected the key pair, the parameters or the signing step
	Certificate(rcgen::Error),
	/// `not_before + lifetime` is not representable as an X.509 time
	ValidityOutOfRange(i64),
	/// PEM encoding produced no output for the given block label
	EmptyPem {
		/// Label of the PEM block
		label: &'static str,
	},
	/// Writing an output file failed
	Write {
		/// Destination that failed
		path: PathBuf,
		/// Underlying failure
		source: io::Error,
	},
}

impl Error {
	/// This error followed by each of its sources, separated by `: `.
	pub fn with_causes(&self) -> String {
		let mut text = self.to_string();
		let mut source = std::error::Error::source(self);
		while let Some(cause) = source {
			text.push_str(": ");
			text.push_str(&cause.to_string());
			source = cause.source();
		}
		text
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			InvalidLifetime { input, .. } => {
				write!(f, "Invalid lifetime {input:?}, expected a number of days")?
			},
			InvalidUsage { token, .. } => write!(f, "Invalid extended key usage code {token:?}")?,
			UnknownUsage(code) => write!(f, "Unknown extended key usage code {code}")?,
			InvalidIpAddress { token, .. } => write!(f, "Invalid IP address {token:?}")?,
			Console(_) => write!(f, "Console I/O failed")?,
			EndOfInput => write!(f, "Input stream closed")?,
			KeyGeneration => write!(f, "Failed to generate private key")?,
			SerialNumber(_) => write!(f, "Failed to generate serial number")?,
			Certificate(_) => write!(f, "Failed to create certificate")?,
			ValidityOutOfRange(days) => {
				write!(f, "A lifetime of {days} days is outside the representable validity range")?
			},
			EmptyPem { label } => write!(f, "Failed to encode {label} to PEM")?,
			Write { path, .. } => write!(f, "Failed to write {}", path.display())?,
		};
		Ok(())
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::InvalidLifetime { source, .. } | Error::InvalidUsage { source, .. } => {
				Some(source)
			},
			Error::InvalidIpAddress { source, .. } => Some(source),
			Error::Console(e) | Error::Write { source: e, .. } => Some(e),
			Error::SerialNumber(e) => Some(e),
			Error::Certificate(e) => Some(e),
			_ => None,
		}
	}
}

impl From<rcgen::Error> for Error {
	fn from(e: rcgen::Error) -> Self {
		Error::Certificate(e)
	}
}

impl From<ring::error::Unspecified> for Error {
	fn from(_unspecified: ring::error::Unspecified) -> Self {
		Error::KeyGeneration
	}
}
