use std::{
	fs,
	io::Write,
	path::{Path, PathBuf},
};

use log::{debug, info};
use pem::Pem;
use time::OffsetDateTime;

mod params;
pub use params::{CertificateBuilder, SelfSigned};
mod request;
pub use request::{CertificateRequest, DEFAULT_CERT_STEM, DEFAULT_HOST, DEFAULT_KEY_STEM};
mod signature;
mod usage;
pub use usage::{parse_usages, ExtendedUsage};

use crate::Error;

/// PEM label of the certificate block
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";
/// PEM label of the PKCS8 private key block
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

#[cfg(unix)]
const CERT_MODE: u32 = 0o644;
#[cfg(unix)]
const KEY_MODE: u32 = 0o600;

#[derive(Debug, Clone)]
/// PEM serialized Certificate and PEM serialized corresponding private key
pub struct PemCertifiedKey {
	/// `CERTIFICATE` block holding the DER certificate
	pub cert_pem: String,
	/// `PRIVATE KEY` block holding the PKCS8 key
	pub private_key_pem: String,
}

impl PemCertifiedKey {
	/// Write the certificate, then the key. A failure writing the key
	/// leaves the certificate in place.
	pub fn write(&self, cert_path: &Path, key_path: &Path) -> Result<(), Error> {
		#[cfg(unix)]
		{
			write_file(cert_path, self.cert_pem.as_bytes(), CERT_MODE)?;
			write_file(key_path, self.private_key_pem.as_bytes(), KEY_MODE)?;
		}
		#[cfg(not(unix))]
		{
			write_file(cert_path, self.cert_pem.as_bytes())?;
			write_file(key_path, self.private_key_pem.as_bytes())?;
		}
		Ok(())
	}
}

/// Paths of the files written by [generate].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
	/// Where the certificate was written
	pub cert_path: PathBuf,
	/// Where the private key was written
	pub key_path: PathBuf,
}

/// Issue a self-signed certificate for `request` and write it, with its
/// private key, as PEM files.
pub fn generate(request: &CertificateRequest) -> Result<GeneratedFiles, Error> {
	debug!("generating P-256 key pair");
	let key_pair = signature::ecdsa_p256()?;
	let serial = signature::random_serial()?;

	debug!(
		"signing certificate for {:?} valid {} days",
		request.host, request.lifetime_days
	);
	let signed = CertificateBuilder::new()
		.organization_name(&request.organization)
		.subject_alternative_names(&request.host, &request.ip_addresses)?
		.validity(OffsetDateTime::now_utc(), request.lifetime_days)?
		.extended_key_usages(&request.extended_usages)
		.serial_number(serial)
		.self_signed(key_pair)?;

	let files = GeneratedFiles {
		cert_path: request.cert_path(),
		key_path: request.key_path(),
	};
	signed
		.serialize_pem()?
		.write(&files.cert_path, &files.key_path)?;
	info!(
		"wrote {} and {}",
		files.cert_path.display(),
		files.key_path.display()
	);
	Ok(files)
}

fn encode_pem(label: &'static str, der: Vec<u8>) -> Result<String, Error> {
	let encoded = pem::encode(&Pem::new(label, der));
	if encoded.is_empty() {
		return Err(Error::EmptyPem { label });
	}
	Ok(encoded)
}

#[cfg(unix)]
fn write_file(path: &Path, contents: &[u8], mode: u32) -> Result<(), Error> {
	use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

	let wrap = |source| Error::Write {
		path: path.to_path_buf(),
		source,
	};
	let mut file = fs::OpenOptions::new()
		.create(true)
		.write(true)
		.truncate(true)
		.mode(mode)
		.open(path)
		.map_err(wrap)?;
	// `mode` only applies to newly created files
	file.set_permissions(fs::Permissions::from_mode(mode))
		.map_err(wrap)?;
	file.write_all(contents).map_err(wrap)?;
	Ok(())
}

#[cfg(not(unix))]
fn write_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
	let mut file = fs::File::create(path).map_err(|source| Error::Write {
		path: path.to_path_buf(),
		source,
	})?;
	file.write_all(contents).map_err(|source| Error::Write {
		path: path.to_path_buf(),
		source,
	})
}
