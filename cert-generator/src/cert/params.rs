use std::net::IpAddr;

use rcgen::{
	Certificate, CertificateParams, DistinguishedName, DnType, Ia5String, IsCa, KeyPair,
	KeyUsagePurpose, SanType, SerialNumber,
};
use time::{Duration, OffsetDateTime};

use super::{usage::ExtendedUsage, PemCertifiedKey};
use crate::Error;

/// Builder to configure the [CertificateParams] of a self-signed
/// certificate.
pub struct CertificateBuilder {
	params: CertificateParams,
}

impl Default for CertificateBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl CertificateBuilder {
	/// Initialize `CertificateParams` for a self-signed leaf: empty
	/// subject, `CA:FALSE` basic constraints and digital signature key
	/// usage.
	/// # Example
	/// ```
	/// # use cert_generator::CertificateBuilder;
	/// let cert = CertificateBuilder::new();
	/// ```
	pub fn new() -> Self {
		let mut params = CertificateParams::default();
		// override default Common Name
		params.distinguished_name = DistinguishedName::new();
		params.is_ca = IsCa::ExplicitNoCa;
		params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
		Self { params }
	}
	/// Return `&self.params`.
	pub fn params(&self) -> &CertificateParams {
		&self.params
	}
	/// Set OrganizationName, the only attribute of the subject.
	/// Multiple calls will replace previous value.
	pub fn organization_name(mut self, name: &str) -> Self {
		self.params
			.distinguished_name
			.push(DnType::OrganizationName, name);
		self
	}
	/// Record `host` as DNS name followed by `ips` as IP address
	/// subject alternative names. `host` is not checked for DNS syntax.
	pub fn subject_alternative_names(mut self, host: &str, ips: &[IpAddr]) -> Result<Self, Error> {
		let host = Ia5String::try_from(host)?;
		self.params.subject_alt_names.push(SanType::DnsName(host));
		self.params
			.subject_alt_names
			.extend(ips.iter().copied().map(SanType::IpAddress));
		Ok(self)
	}
	/// Validity window starting at `not_before` and lasting `days` days.
	/// Zero and negative lifetimes are kept as is.
	pub fn validity(mut self, not_before: OffsetDateTime, days: i64) -> Result<Self, Error> {
		let not_after = days
			.checked_mul(86_400)
			.and_then(|secs| not_before.checked_add(Duration::seconds(secs)))
			.filter(|t| (1..=9999).contains(&t.year()))
			.ok_or(Error::ValidityOutOfRange(days))?;
		self.params.not_before = not_before;
		self.params.not_after = not_after;
		Ok(self)
	}
	/// Set `extended_key_usages`. Multiple calls will replace previous
	/// values; an empty slice omits the extension.
	pub fn extended_key_usages(mut self, usages: &[ExtendedUsage]) -> Self {
		self.params.extended_key_usages = usages.iter().map(|u| u.purpose()).collect();
		self
	}
	/// Set the serial number instead of letting rcgen derive one.
	pub fn serial_number(mut self, serial: SerialNumber) -> Self {
		self.params.serial_number = Some(serial);
		self
	}
	/// Sign the parameters with `key_pair`, which also provides the
	/// subject public key.
	pub fn self_signed(self, key_pair: KeyPair) -> Result<SelfSigned, Error> {
		let cert = self.params.self_signed(&key_pair)?;
		Ok(SelfSigned { cert, key_pair })
	}
}

/// A signed certificate together with the key pair that signed it.
pub struct SelfSigned {
	cert: Certificate,
	key_pair: KeyPair,
}

impl SelfSigned {
	/// Encode the DER certificate and the PKCS8 private key as PEM.
	pub fn serialize_pem(&self) -> Result<PemCertifiedKey, Error> {
		let cert_pem = super::encode_pem(super::CERTIFICATE_LABEL, self.cert.der().to_vec())?;
		let private_key_pem =
			super::encode_pem(super::PRIVATE_KEY_LABEL, self.key_pair.serialize_der())?;
		Ok(PemCertifiedKey {
			cert_pem,
			private_key_pem,
		})
	}
}
