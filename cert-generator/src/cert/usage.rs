use rcgen::ExtendedKeyUsagePurpose;

use crate::Error;

/// Extended key usage purposes selectable by numeric code.
///
/// The numbering is fixed: codes are what users type at the prompt, so
/// existing values must never be renumbered. New purposes get new codes
/// at the end of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedUsage {
	/// anyExtendedKeyUsage
	Any,
	/// id-kp-serverAuth
	ServerAuth,
	/// id-kp-clientAuth
	ClientAuth,
	/// id-kp-codeSigning
	CodeSigning,
	/// id-kp-emailProtection
	EmailProtection,
	/// id-kp-ipsecEndSystem
	IpsecEndSystem,
	/// id-kp-ipsecTunnel
	IpsecTunnel,
	/// id-kp-ipsecUser
	IpsecUser,
	/// id-kp-timeStamping
	TimeStamping,
	/// id-kp-OCSPSigning
	OcspSigning,
	/// Microsoft Server Gated Crypto
	MicrosoftServerGatedCrypto,
	/// Netscape Server Gated Crypto
	NetscapeServerGatedCrypto,
	/// Microsoft commercial code signing
	MicrosoftCommercialCodeSigning,
	/// Microsoft kernel mode code signing
	MicrosoftKernelCodeSigning,
}

impl ExtendedUsage {
	/// Every purpose, indexed by its code.
	pub const ALL: [ExtendedUsage; 14] = [
		ExtendedUsage::Any,
		ExtendedUsage::ServerAuth,
		ExtendedUsage::ClientAuth,
		ExtendedUsage::CodeSigning,
		ExtendedUsage::EmailProtection,
		ExtendedUsage::IpsecEndSystem,
		ExtendedUsage::IpsecTunnel,
		ExtendedUsage::IpsecUser,
		ExtendedUsage::TimeStamping,
		ExtendedUsage::OcspSigning,
		ExtendedUsage::MicrosoftServerGatedCrypto,
		ExtendedUsage::NetscapeServerGatedCrypto,
		ExtendedUsage::MicrosoftCommercialCodeSigning,
		ExtendedUsage::MicrosoftKernelCodeSigning,
	];

	/// Look up the purpose registered under `code`.
	pub fn from_code(code: i64) -> Result<Self, Error> {
		usize::try_from(code)
			.ok()
			.and_then(|i| Self::ALL.get(i))
			.copied()
			.ok_or(Error::UnknownUsage(code))
	}

	/// The numeric code of this purpose.
	pub fn code(self) -> u8 {
		self as u8
	}

	/// Short human readable name, as shown in the prompt.
	pub fn name(self) -> &'static str {
		use ExtendedUsage::*;
		match self {
			Any => "any",
			ServerAuth => "server",
			ClientAuth => "client",
			CodeSigning => "code sign",
			EmailProtection => "email protection",
			IpsecEndSystem => "IPSEC end system",
			IpsecTunnel => "IPSEC tunnel",
			IpsecUser => "IPSEC user",
			TimeStamping => "time stamping",
			OcspSigning => "OCSP signing",
			MicrosoftServerGatedCrypto => "Microsoft server gated crypto",
			NetscapeServerGatedCrypto => "Netscape server gated crypto",
			MicrosoftCommercialCodeSigning => "Microsoft commercial code signing",
			MicrosoftKernelCodeSigning => "Microsoft kernel code signing",
		}
	}

	/// Convert into the purpose rcgen writes into the extension.
	pub fn purpose(self) -> ExtendedKeyUsagePurpose {
		use ExtendedUsage::*;
		match self {
			Any => ExtendedKeyUsagePurpose::Any,
			ServerAuth => ExtendedKeyUsagePurpose::ServerAuth,
			ClientAuth => ExtendedKeyUsagePurpose::ClientAuth,
			CodeSigning => ExtendedKeyUsagePurpose::CodeSigning,
			EmailProtection => ExtendedKeyUsagePurpose::EmailProtection,
			TimeStamping => ExtendedKeyUsagePurpose::TimeStamping,
			OcspSigning => ExtendedKeyUsagePurpose::OcspSigning,
			IpsecEndSystem => ExtendedKeyUsagePurpose::Other(vec![1, 3, 6, 1, 5, 5, 7, 3, 5]),
			IpsecTunnel => ExtendedKeyUsagePurpose::Other(vec![1, 3, 6, 1, 5, 5, 7, 3, 6]),
			IpsecUser => ExtendedKeyUsagePurpose::Other(vec![1, 3, 6, 1, 5, 5, 7, 3, 7]),
			MicrosoftServerGatedCrypto => {
				ExtendedKeyUsagePurpose::Other(vec![1, 3, 6, 1, 4, 1, 311, 10, 3, 3])
			},
			NetscapeServerGatedCrypto => {
				ExtendedKeyUsagePurpose::Other(vec![2, 16, 840, 1, 113730, 4, 1])
			},
			MicrosoftCommercialCodeSigning => {
				ExtendedKeyUsagePurpose::Other(vec![1, 3, 6, 1, 4, 1, 311, 2, 1, 22])
			},
			MicrosoftKernelCodeSigning => {
				ExtendedKeyUsagePurpose::Other(vec![1, 3, 6, 1, 4, 1, 311, 61, 1, 1])
			},
		}
	}

	/// The `0=any, 1=server, ...` legend shown next to the usage prompt.
	pub fn legend() -> String {
		Self::ALL
			.iter()
			.map(|u| format!("{}={}", u.code(), u.name()))
			.collect::<Vec<_>>()
			.join(", ")
	}
}

/// Parse a comma separated list of usage codes such as `1,2`.
///
/// A blank line is the empty set. Repeated codes are kept once, in the
/// order they first appear.
pub fn parse_usages(line: &str) -> Result<Vec<ExtendedUsage>, Error> {
	let mut usages = Vec::new();
	if line.trim().is_empty() {
		return Ok(usages);
	}
	for token in line.split(',') {
		let token = token.trim();
		let code = token.parse::<i64>().map_err(|source| Error::InvalidUsage {
			token: token.into(),
			source,
		})?;
		let usage = ExtendedUsage::from_code(code)?;
		if !usages.contains(&usage) {
			usages.push(usage);
		}
	}
	Ok(usages)
}
