//! Invite batch validation.
//!
//! A batch is all-or-nothing: one bad token rejects every address in it, so
//! the actor fixes the entry and resubmits without losing what they typed.

use tracing::debug;

use crate::error::ValidationError;


/// Longest address accepted, per RFC 5321 path limits.
const MAX_EMAIL_LEN: usize = 320;

/// Validates and normalizes invite batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailValidator {
	separators: Vec<char>,
}

impl Default for EmailValidator {
	fn default() -> Self {
		Self { separators: vec![';'] }
	}
}

impl EmailValidator {
	/// Creates a validator splitting free-text entries on `separators`.
	pub fn new(separators: impl IntoIterator<Item = char>) -> Self {
		Self {
			separators: separators.into_iter().collect(),
		}
	}

	pub fn separators(&self) -> &[char] {
		&self.separators
	}

	/// Splits, trims and checks every candidate entry.
	///
	/// Empty tokens left over from splitting (`"a@b.com;"`) are dropped. An
	/// entry with no address in it at all (`"  "`, `" ; "`) is an error.
	pub fn validate<I, S>(&self, candidates: I) -> Result<ValidEmails, ValidationError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut emails = Vec::new();
		for (entry, candidate) in candidates.into_iter().enumerate() {
			let candidate = candidate.as_ref();
			let before = emails.len();
			for token in candidate.split(self.separators.as_slice()).map(str::trim) {
				if token.is_empty() {
					continue;
				}
				if !is_valid_email(token) {
					debug!(entry, token, "Rejecting malformed invite address");
					return Err(ValidationError::InvalidEmail {
						token: token.to_string(),
						entry,
					});
				}
				emails.push(token.to_string());
			}
			if emails.len() == before {
				debug!(entry, "Rejecting invite entry without an address");
				return Err(ValidationError::EmptyEntry { entry });
			}
		}
		Ok(ValidEmails(emails))
	}
}

/// Returns whether `value` looks like `local@domain.tld` once trimmed.
pub fn is_valid_email(value: &str) -> bool {
	let trimmed = value.trim();
	if trimmed.is_empty() || trimmed.len() > MAX_EMAIL_LEN {
		return false;
	}

	let mut segments = trimmed.split('@');
	let local = segments.next().unwrap_or_default();
	let domain = segments.next().unwrap_or_default();

	if segments.next().is_some() {
		return false;
	}

	if local.is_empty() || domain.is_empty() {
		return false;
	}

	let forbidden = |ch: char| ch.is_whitespace() || ch.is_control() || matches!(ch, ';' | ',' | '"');
	if local.chars().any(forbidden) || domain.chars().any(forbidden) {
		return false;
	}

	domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Addresses that passed validation, trimmed and in entry order.
///
/// Duplicates are preserved; deduplication is a workflow policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidEmails(Vec<String>);

impl ValidEmails {
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn into_vec(self) -> Vec<String> {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, String> {
		self.0.iter()
	}

	/// Drops repeated addresses, ASCII case-insensitively, keeping the first.
	pub fn dedup_within(&mut self) {
		let mut seen = std::collections::HashSet::new();
		self.0.retain(|email| seen.insert(email.to_ascii_lowercase()));
	}

	/// Drops every address for which `exists` returns true.
	pub fn remove_where(&mut self, mut exists: impl FnMut(&str) -> bool) {
		self.0.retain(|email| !exists(email));
	}
}

impl IntoIterator for ValidEmails {
	type Item = String;
	type IntoIter = std::vec::IntoIter<String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a ValidEmails {
	type Item = &'a String;
	type IntoIter = std::slice::Iter<'a, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
