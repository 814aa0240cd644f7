//! Membership policies and their TOML representation.
//!
//! Every field has a default, so an empty document (or no file at all)
//! yields the stock behavior: `;` separated entries, duplicates kept, three
//! second validation warnings and no requests for unmapped rows.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A value parsed but is not usable.
	#[error("invalid configuration: {0}")]
	Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// How duplicate addresses are handled when an invite batch is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
	/// Send the batch exactly as validated.
	#[default]
	Keep,
	/// Drop repeats inside the batch, first occurrence wins.
	WithinBatch,
	/// Drop addresses that already belong to a roster member.
	AgainstRoster,
	/// Both of the above.
	All,
}

impl DedupPolicy {
	pub fn within_batch(self) -> bool {
		matches!(self, Self::WithinBatch | Self::All)
	}

	pub fn against_roster(self) -> bool {
		matches!(self, Self::AgainstRoster | Self::All)
	}
}

/// What to do when a member without a mapping record edits their localhost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmappedEditPolicy {
	/// Keep the edit local; never emit a request.
	#[default]
	Ignore,
	/// Emit a change request without a mapping id and let the backend decide.
	Dispatch,
}

/// Invite dialog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InviteConfig {
	/// Characters that split one free-text entry into several addresses.
	pub separators: Vec<char>,
	pub dedup: DedupPolicy,
	/// Visibility hint for validation warnings, in milliseconds.
	pub warning_timeout_ms: u64,
}

impl Default for InviteConfig {
	fn default() -> Self {
		Self {
			separators: vec![';'],
			dedup: DedupPolicy::Keep,
			warning_timeout_ms: 3_000,
		}
	}
}

/// Localhost mapping settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalhostConfig {
	pub unmapped_edits: UnmappedEditPolicy,
}

/// Top-level membership configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MembersConfig {
	pub invite: InviteConfig,
	pub localhost: LocalhostConfig,
}

impl MembersConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// Rejects settings that would make invite validation meaningless.
	pub fn validate(&self) -> Result<()> {
		if self.invite.separators.is_empty() {
			return Err(ConfigError::Invalid("invite.separators must not be empty".into()));
		}
		if let Some(bad) = self
			.invite
			.separators
			.iter()
			.find(|c| matches!(c, '@' | '.') || c.is_whitespace())
		{
			return Err(ConfigError::Invalid(format!("invite.separators cannot contain {bad:?}")));
		}
		Ok(())
	}

	pub fn warning_timeout(&self) -> Duration {
		Duration::from_millis(self.invite.warning_timeout_ms)
	}
}
