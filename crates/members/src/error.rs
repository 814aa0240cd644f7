use hitch_primitives::MemberId;
use thiserror::Error;

/// An invite batch was rejected.
///
/// The display text is meant for the actor and names the entry that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A non-empty token is not shaped like an email address.
	#[error("'{token}' is not a valid email address")]
	InvalidEmail {
		/// The trimmed token that failed.
		token: String,
		/// Index of the candidate entry the token came from.
		entry: usize,
	},

	/// A candidate entry was blank after trimming.
	#[error("email entry {} is empty", .entry + 1)]
	EmptyEntry {
		/// Index of the blank candidate entry.
		entry: usize,
	},
}

impl ValidationError {
	/// Index of the candidate entry that caused the rejection.
	pub fn entry(&self) -> usize {
		match self {
			Self::InvalidEmail { entry, .. } | Self::EmptyEntry { entry } => *entry,
		}
	}

	/// The offending token, if the entry was not blank.
	pub fn token(&self) -> Option<&str> {
		match self {
			Self::InvalidEmail { token, .. } => Some(token),
			Self::EmptyEntry { .. } => None,
		}
	}
}

/// A roster snapshot that breaks a well-formedness rule.
///
/// These are diagnostics: the core keeps working on whatever snapshot the
/// host supplies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
	#[error("roster has {count} owners, expected exactly one")]
	OwnerCount { count: usize },

	#[error("duplicate member id '{0}'")]
	DuplicateId(MemberId),

	#[error("duplicate member email '{0}'")]
	DuplicateEmail(String),
}
