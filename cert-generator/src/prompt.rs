//! Line oriented collection of a [CertificateRequest].

use std::{
	io::{BufRead, Write},
	net::IpAddr,
	path::PathBuf,
};

use crate::{
	cert::{parse_usages, CertificateRequest, ExtendedUsage, GeneratedFiles},
	Error, Result,
};

/// Printed after every prompt cycle
pub const SEPARATOR: &str = "########################################################";

/// Reads certificate parameters from `input`, one line per field,
/// writing the prompts to `output`.
pub struct Prompt<R, W> {
	input: R,
	output: W,
	out_dir: PathBuf,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
	/// Prompt on `output`, read answers from `input`. Files go to the
	/// current directory unless [Prompt::out_dir] says otherwise.
	pub fn new(input: R, output: W) -> Self {
		Self {
			input,
			output,
			out_dir: PathBuf::from("."),
		}
	}
	/// Resolve relative path stems against `dir`.
	pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.out_dir = dir.into();
		self
	}
	/// Consume the prompt, returning the output sink.
	pub fn into_output(self) -> W {
		self.output
	}
	/// Ask for every field of a request.
	///
	/// Each answer is parsed as soon as it is read, so an invalid
	/// lifetime or usage list ends the cycle without asking for the
	/// remaining fields. Empty host and paths fall back to their
	/// defaults; any other answer is kept verbatim.
	pub fn collect(&mut self) -> Result<CertificateRequest> {
		let mut request = CertificateRequest::with_defaults(self.out_dir.clone());
		self.say("Provide cert data:\n")?;

		request.organization = self.ask("Org -> ")?;
		if let Some(host) = non_empty(self.ask("Host ('localhost' if empty) -> ")?) {
			request.host = host;
		}
		request.ip_addresses =
			parse_ip_addresses(&self.ask("IP addresses, e.g. '127.0.0.1,::1' (none if empty) -> ")?)?;
		request.lifetime_days = parse_lifetime(&self.ask("Lifetime (days) -> ")?)?;
		let legend = ExtendedUsage::legend();
		request.extended_usages =
			parse_usages(&self.ask(&format!("Extended key usage, e.g. '1,2' ({legend}) -> "))?)?;
		if let Some(stem) = non_empty(self.ask("Certificate path ('cert.pem' if empty) -> ")?) {
			request.cert_stem = stem;
		}
		if let Some(stem) = non_empty(self.ask("Key path ('key.pem' if empty) -> ")?) {
			request.key_stem = stem;
		}
		Ok(request)
	}
	/// Print the outcome of one cycle followed by [SEPARATOR].
	pub fn report(&mut self, outcome: &Result<GeneratedFiles>) -> Result<()> {
		let text = match outcome {
			Ok(files) => format!(
				"Generated certificate: {}\nGenerated private key: {}\n",
				files.cert_path.display(),
				files.key_path.display()
			),
			Err(e) => format!("{}\n", e.with_causes()),
		};
		self.say(&text)?;
		self.say(SEPARATOR)?;
		self.say("\n")
	}

	fn say(&mut self, text: &str) -> Result<()> {
		self.output.write_all(text.as_bytes()).map_err(Error::Console)?;
		self.output.flush().map_err(Error::Console)
	}

	fn ask(&mut self, prompt: &str) -> Result<String> {
		self.say(prompt)?;
		let mut buf = Vec::new();
		if self.input.read_until(b'\n', &mut buf).map_err(Error::Console)? == 0 {
			return Err(Error::EndOfInput);
		}
		while matches!(buf.last(), Some(b'\n' | b'\r')) {
			buf.pop();
		}
		// answers are free text, undecodable bytes must not end the session
		Ok(String::from_utf8_lossy(&buf).into_owned())
	}
}

fn non_empty(answer: String) -> Option<String> {
	if answer.is_empty() {
		None
	} else {
		Some(answer)
	}
}

/// Parse a lifetime in days. Zero and negative values are accepted.
pub fn parse_lifetime(line: &str) -> Result<i64> {
	let input = line.trim();
	input.parse::<i64>().map_err(|source| Error::InvalidLifetime {
		input: input.into(),
		source,
	})
}

/// Parse a comma separated list of IPv4/IPv6 addresses. A blank line is
/// the empty list.
pub fn parse_ip_addresses(line: &str) -> Result<Vec<IpAddr>> {
	if line.trim().is_empty() {
		return Ok(Vec::new());
	}
	line.split(',')
		.map(str::trim)
		.map(|token| {
			token.parse::<IpAddr>().map_err(|source| Error::InvalidIpAddress {
				token: token.into(),
				source,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn prompt(script: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
		Prompt::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()).out_dir("out")
	}

	#[test]
	fn collect_all_fields() -> Result<()> {
		let mut p = prompt("Crab widgits SE\nmy.host.com\n10.0.0.1, ::1\n30\n1,2\nserver\nserver-key\n");
		let request = p.collect()?;
		assert_eq!(request.organization, "Crab widgits SE");
		assert_eq!(request.host, "my.host.com");
		assert_eq!(
			request.ip_addresses,
			vec![
				"10.0.0.1".parse::<IpAddr>().unwrap(),
				"::1".parse::<IpAddr>().unwrap()
			]
		);
		assert_eq!(request.lifetime_days, 30);
		assert_eq!(
			request.extended_usages,
			vec![ExtendedUsage::ServerAuth, ExtendedUsage::ClientAuth]
		);
		assert_eq!(request.cert_path(), PathBuf::from("out/server.pem"));
		assert_eq!(request.key_path(), PathBuf::from("out/server-key.pem"));
		Ok(())
	}
	#[test]
	fn collect_applies_defaults() -> Result<()> {
		let mut p = prompt("Org\n\n\n365\n1\n\n\n");
		let request = p.collect()?;
		assert_eq!(request.host, "localhost");
		assert!(request.ip_addresses.is_empty());
		assert_eq!(request.cert_path(), PathBuf::from("out/cert.pem"));
		assert_eq!(request.key_path(), PathBuf::from("out/key.pem"));
		Ok(())
	}
	#[test]
	fn collect_keeps_blank_organization() -> Result<()> {
		let mut p = prompt("\n\n\n1\n\n\n\n");
		let request = p.collect()?;
		assert_eq!(request.organization, "");
		assert!(request.extended_usages.is_empty());
		Ok(())
	}
	#[test]
	fn collect_keeps_answers_verbatim() -> Result<()> {
		let mut p = prompt("Org\n my.host \n\n7\n\n  \n\n");
		let request = p.collect()?;
		assert_eq!(request.host, " my.host ");
		assert_eq!(request.cert_stem, "  ");
		assert_eq!(request.key_stem, "key");
		Ok(())
	}
	#[test]
	fn collect_decodes_non_utf8_lossily() -> Result<()> {
		let script = b"Caf\xe9 GmbH\n\n\n7\n\n\n\n".to_vec();
		let mut p = Prompt::new(Cursor::new(script), Vec::new());
		let request = p.collect()?;
		assert_eq!(request.organization, "Caf\u{FFFD} GmbH");
		Ok(())
	}
	#[test]
	fn report_includes_cause() -> Result<()> {
		let mut p = prompt("");
		p.report(&Err(parse_lifetime("abc").unwrap_err()))?;
		let shown = String::from_utf8(p.output.clone()).unwrap();
		assert_eq!(
			shown,
			format!(
				"Invalid lifetime \"abc\", expected a number of days: invalid digit found in string\n{SEPARATOR}\n"
			)
		);
		Ok(())
	}
	#[test]
	fn collect_handles_crlf() -> Result<()> {
		let mut p = prompt("Org\r\nhost\r\n\r\n7\r\n2\r\n\r\n\r\n");
		let request = p.collect()?;
		assert_eq!(request.organization, "Org");
		assert_eq!(request.host, "host");
		assert_eq!(request.lifetime_days, 7);
		Ok(())
	}
	#[test]
	fn collect_stops_at_bad_lifetime() {
		let mut p = prompt("Org\n\n\nabc\n1\n\n\n");
		match p.collect() {
			Err(Error::InvalidLifetime { input, .. }) => assert_eq!(input, "abc"),
			other => panic!("unexpected {other:?}"),
		}
		let shown = String::from_utf8(p.output.clone()).unwrap();
		assert!(shown.ends_with("Lifetime (days) -> "));
	}
	#[test]
	fn collect_stops_at_bad_usage() {
		let mut p = prompt("Org\n\n\n10\n1,2,abc\n\n\n");
		assert!(matches!(p.collect(), Err(Error::InvalidUsage { .. })));
		let shown = String::from_utf8(p.output.clone()).unwrap();
		assert!(!shown.contains("Certificate path"));
	}
	#[test]
	fn collect_rejects_bad_ip() {
		let mut p = prompt("Org\n\n10.0.0.300\n10\n1\n\n\n");
		match p.collect() {
			Err(Error::InvalidIpAddress { token, .. }) => assert_eq!(token, "10.0.0.300"),
			other => panic!("unexpected {other:?}"),
		}
	}
	#[test]
	fn collect_end_of_input() {
		let mut p = prompt("Org\nhost\n");
		assert!(matches!(p.collect(), Err(Error::EndOfInput)));
	}
	#[test]
	fn usage_prompt_lists_codes() -> Result<()> {
		let mut p = prompt("Org\n\n\n1\n\n\n\n");
		p.collect()?;
		let shown = String::from_utf8(p.output.clone()).unwrap();
		assert!(shown.contains("0=any, 1=server, 2=client, 3=code sign"));
		Ok(())
	}
	#[test]
	fn report_success() -> Result<()> {
		let mut p = prompt("");
		p.report(&Ok(GeneratedFiles {
			cert_path: "out/cert.pem".into(),
			key_path: "out/key.pem".into(),
		}))?;
		let shown = String::from_utf8(p.output.clone()).unwrap();
		assert_eq!(
			shown,
			format!(
				"Generated certificate: out/cert.pem\nGenerated private key: out/key.pem\n{SEPARATOR}\n"
			)
		);
		Ok(())
	}
	#[test]
	fn report_error() -> Result<()> {
		let mut p = prompt("");
		p.report(&Err(Error::UnknownUsage(42)))?;
		let shown = String::from_utf8(p.output.clone()).unwrap();
		assert_eq!(
			shown,
			format!("Unknown extended key usage code 42\n{SEPARATOR}\n")
		);
		Ok(())
	}
	#[test]
	fn lifetime_parsing() {
		assert_eq!(parse_lifetime(" 365 ").unwrap(), 365);
		assert_eq!(parse_lifetime("0").unwrap(), 0);
		assert_eq!(parse_lifetime("-5").unwrap(), -5);
		assert!(parse_lifetime("").is_err());
		assert!(parse_lifetime("1.5").is_err());
	}
}
