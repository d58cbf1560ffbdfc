use std::{
	net::IpAddr,
	path::{Path, PathBuf},
};

use super::ExtendedUsage;

/// DNS name used when the host is left blank
pub const DEFAULT_HOST: &str = "localhost";
/// Certificate file stem used when the path is left blank
pub const DEFAULT_CERT_STEM: &str = "cert";
/// Private key file stem used when the path is left blank
pub const DEFAULT_KEY_STEM: &str = "key";

/// Everything needed to issue one self-signed certificate.
///
/// Built per prompt cycle with defaults already applied, so the
/// generator never substitutes values itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
	/// Subject OrganizationName, taken verbatim
	pub organization: String,
	/// DNS subject alternative name
	pub host: String,
	/// IP subject alternative names, following `host`
	pub ip_addresses: Vec<IpAddr>,
	/// Length of the validity window; may be zero or negative
	pub lifetime_days: i64,
	/// Extended key usages; empty omits the extension
	pub extended_usages: Vec<ExtendedUsage>,
	/// Certificate file stem, `.pem` is appended
	pub cert_stem: String,
	/// Private key file stem, `.pem` is appended
	pub key_stem: String,
	/// Directory relative stems are resolved against
	pub out_dir: PathBuf,
}

impl CertificateRequest {
	/// A request with an empty organization, one day of validity, no
	/// extended usages and default host and stems inside `out_dir`.
	pub fn with_defaults(out_dir: impl Into<PathBuf>) -> Self {
		Self {
			organization: String::new(),
			host: DEFAULT_HOST.into(),
			ip_addresses: Vec::new(),
			lifetime_days: 1,
			extended_usages: Vec::new(),
			cert_stem: DEFAULT_CERT_STEM.into(),
			key_stem: DEFAULT_KEY_STEM.into(),
			out_dir: out_dir.into(),
		}
	}
	/// `<out_dir>/<cert_stem>.pem`
	pub fn cert_path(&self) -> PathBuf {
		pem_path(&self.out_dir, &self.cert_stem)
	}
	/// `<out_dir>/<key_stem>.pem`
	pub fn key_path(&self) -> PathBuf {
		pem_path(&self.out_dir, &self.key_stem)
	}
}

fn pem_path(dir: &Path, stem: &str) -> PathBuf {
	dir.join(format!("{stem}.pem"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_paths() {
		let request = CertificateRequest::with_defaults(".");
		assert_eq!(request.cert_path(), Path::new("./cert.pem"));
		assert_eq!(request.key_path(), Path::new("./key.pem"));
		assert_eq!(request.host, "localhost");
	}
	#[test]
	fn stems_keep_dots() {
		let request = CertificateRequest {
			cert_stem: "server.crt".into(),
			key_stem: "nested/server".into(),
			..CertificateRequest::with_defaults("out")
		};
		assert_eq!(request.cert_path(), Path::new("out/server.crt.pem"));
		assert_eq!(request.key_path(), Path::new("out/nested/server.pem"));
	}
	#[cfg(unix)]
	#[test]
	fn absolute_stem_ignores_out_dir() {
		let request = CertificateRequest {
			cert_stem: "/tmp/cert".into(),
			..CertificateRequest::with_defaults("out")
		};
		assert_eq!(request.cert_path(), Path::new("/tmp/cert.pem"));
	}
}
