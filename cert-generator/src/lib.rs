#![warn(missing_docs)]
//! This library wraps [rcgen] to issue self-signed TLS certificates for
//! development and testing. A [CertificateRequest] is collected from a
//! line oriented [prompt::Prompt], [generate] turns it into a P-256 key
//! and a signed certificate, and both are written as PEM files.
//!
//! ```no_run
//! # use cert_generator::{generate, CertificateRequest, ExtendedUsage};
//! let request = CertificateRequest {
//! 	organization: "Crab widgits SE".into(),
//! 	lifetime_days: 365,
//! 	extended_usages: vec![ExtendedUsage::ServerAuth],
//! 	..CertificateRequest::with_defaults(".")
//! };
//! let files = generate(&request)?;
//! println!("{}", files.cert_path.display());
//! # Ok::<(), cert_generator::Error>(())
//! ```

mod cert;
pub use cert::{
	generate, parse_usages, CertificateBuilder, CertificateRequest, ExtendedUsage, GeneratedFiles,
	PemCertifiedKey, SelfSigned, CERTIFICATE_LABEL, DEFAULT_CERT_STEM, DEFAULT_HOST,
	DEFAULT_KEY_STEM, PRIVATE_KEY_LABEL,
};
mod error;
pub use error::Error;
pub mod prompt;
pub mod repl;

/// A specialized `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
