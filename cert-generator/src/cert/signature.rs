use pki_types::PrivatePkcs8KeyDer;
use rand::{rngs::OsRng, RngCore};
use rcgen::{KeyPair, SerialNumber};

use crate::Error;

/// Generate a fresh ECDSA P-256 key pair usable for SHA-256 signatures.
pub fn ecdsa_p256() -> Result<KeyPair, Error> {
	use ring::signature::EcdsaKeyPair;
	use ring::signature::ECDSA_P256_SHA256_ASN1_SIGNING;

	let rng = ring::rand::SystemRandom::new();
	let alg = &rcgen::PKCS_ECDSA_P256_SHA256;
	#[rustfmt::skip]
	let pkcs8_bytes = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)?;

	let pkcs8 = PrivatePkcs8KeyDer::from(pkcs8_bytes.as_ref());
	let key_pair = KeyPair::from_pkcs8_der_and_sign_algo(&pkcs8, alg)?;
	Ok(key_pair)
}

/// Draw a serial number uniformly from `[0, 2^128)`.
pub fn random_serial() -> Result<SerialNumber, Error> {
	let mut bytes = [0u8; 16];
	OsRng.try_fill_bytes(&mut bytes).map_err(Error::SerialNumber)?;
	Ok(SerialNumber::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn signature_ecdsa_p256_sha256() -> crate::Result<()> {
		let key_pair = ecdsa_p256()?;
		assert_eq!(
			format!("{:?}", key_pair.algorithm()),
			"PKCS_ECDSA_P256_SHA256"
		);
		Ok(())
	}
	#[test]
	fn key_pairs_are_fresh() -> crate::Result<()> {
		let a = ecdsa_p256()?;
		let b = ecdsa_p256()?;
		assert_ne!(a.public_key_raw(), b.public_key_raw());
		assert_ne!(a.serialize_der(), b.serialize_der());
		Ok(())
	}
	#[test]
	fn serials_fit_in_128_bits() -> crate::Result<()> {
		let serial = random_serial()?;
		assert!(serial.to_bytes().len() <= 16);
		assert_ne!(random_serial()?, serial);
		Ok(())
	}
}
