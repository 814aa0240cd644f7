//! Line-based event scripts.
//!
//! One event per line. Blank lines and lines starting with `#` are skipped.

use std::path::PathBuf;

use hitch_members::MemberId;
use thiserror::Error;

/// A UI event replayed against the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	OpenInvite,
	/// Replace the invite entries; whitespace separates entries.
	Pending(Vec<String>),
	/// Submit, with whatever text was typed but not yet committed.
	Submit(Option<String>),
	CancelInvite,
	Edit(MemberId),
	Type(MemberId, String),
	Commit(MemberId),
	Discard(MemberId),
	Remove(MemberId),
	/// Load a new roster snapshot.
	Roster(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
	#[error("unknown event '{0}'")]
	UnknownEvent(String),
	#[error("'{event}' expects {expected}")]
	MissingArgument { event: &'static str, expected: &'static str },
	#[error("'{0}' takes no arguments")]
	UnexpectedArgument(&'static str),
}

/// Parses one script line. `Ok(None)` means the line holds no event.
pub fn parse_line(line: &str) -> Result<Option<Event>, ParseError> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}

	let (word, rest) = match line.split_once(char::is_whitespace) {
		Some((word, rest)) => (word, rest.trim()),
		None => (line, ""),
	};

	let member = |event: &'static str| -> Result<MemberId, ParseError> {
		let id = rest.split_whitespace().next().ok_or(ParseError::MissingArgument {
			event,
			expected: "a member id",
		})?;
		Ok(MemberId::new(id))
	};
	let bare = |event: &'static str, value: Event| -> Result<Event, ParseError> {
		if rest.is_empty() {
			Ok(value)
		} else {
			Err(ParseError::UnexpectedArgument(event))
		}
	};

	let event = match word {
		"open" => bare("open", Event::OpenInvite)?,
		"cancel" => bare("cancel", Event::CancelInvite)?,
		"pending" => Event::Pending(rest.split_whitespace().map(str::to_string).collect()),
		"submit" => Event::Submit((!rest.is_empty()).then(|| rest.to_string())),
		"edit" => Event::Edit(member("edit")?),
		"commit" => Event::Commit(member("commit")?),
		"discard" => Event::Discard(member("discard")?),
		"remove" => Event::Remove(member("remove")?),
		"type" => {
			let id = member("type")?;
			let value = rest
				.split_once(char::is_whitespace)
				.map(|(_, value)| value.trim().to_string())
				.unwrap_or_default();
			Event::Type(id, value)
		}
		"roster" => {
			if rest.is_empty() {
				return Err(ParseError::MissingArgument {
					event: "roster",
					expected: "a snapshot path",
				});
			}
			Event::Roster(PathBuf::from(rest))
		}
		other => return Err(ParseError::UnknownEvent(other.to_string())),
	};
	Ok(Some(event))
}
