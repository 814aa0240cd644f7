//! Actor-facing notification queue.
//!
//! The core decides what the actor is told and how long it stays relevant.
//! Presenting it is up to the host, which drains the queue after each event.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	#[default]
	Info,
	/// Something the actor can fix, such as a rejected invite batch.
	Warn,
	Error,
}

/// How long a notification stays relevant once shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
	/// Stays until the host dismisses it.
	Never,
	After(Duration),
}

impl AutoDismiss {
	/// Used when nothing more specific is configured.
	pub const STANDARD: Self = Self::After(Duration::from_secs(4));
}

impl Default for AutoDismiss {
	fn default() -> Self {
		Self::STANDARD
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub level: Level,
	pub message: String,
	pub auto_dismiss: AutoDismiss,
}

impl Notification {
	pub fn new(level: Level, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
			auto_dismiss: AutoDismiss::default(),
		}
	}

	pub fn info(message: impl Into<String>) -> Self {
		Self::new(Level::Info, message)
	}

	pub fn warn(message: impl Into<String>) -> Self {
		Self::new(Level::Warn, message)
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(Level::Error, message)
	}

	pub fn with_auto_dismiss(mut self, auto_dismiss: AutoDismiss) -> Self {
		self.auto_dismiss = auto_dismiss;
		self
	}
}

/// Notifications raised by the membership core, oldest first.
#[derive(Debug, Default)]
pub struct NotificationCenter {
	pending: VecDeque<Notification>,
}

impl NotificationCenter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	pub fn push(&mut self, notification: Notification) {
		self.pending.push_back(notification);
	}

	/// Queues the warning shown when an invite batch is rejected.
	///
	/// The message names the offending token, or the blank entry.
	pub fn push_validation_warning(&mut self, err: &ValidationError, timeout: Duration) {
		debug!(entry = err.entry(), token = err.token(), "Invite rejection notice");
		self.push(Notification::warn(err.to_string()).with_auto_dismiss(AutoDismiss::After(timeout)));
	}

	pub fn clear(&mut self) {
		self.pending.clear();
	}

	pub fn take_pending(&mut self) -> Vec<Notification> {
		self.pending.drain(..).collect()
	}
}
