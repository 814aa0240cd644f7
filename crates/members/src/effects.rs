//! Outbound effects and the collaborator seams that consume them.
//!
//! Dispatch is fire-and-forget: the core hands a [`MemberCommand`] over and
//! never learns whether the backend accepted it.

use std::fmt;

use hitch_primitives::MemberCommand;

/// Something the host must act on after an event was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
	/// Forward a request to the backend.
	Dispatch(MemberCommand),
	/// Move input focus to the invite email entry.
	FocusInviteInput,
}

/// Receives requests produced by the core.
pub trait Dispatcher {
	fn dispatch(&mut self, command: MemberCommand);
}

impl<F> Dispatcher for F
where
	F: FnMut(MemberCommand),
{
	fn dispatch(&mut self, command: MemberCommand) {
		self(command)
	}
}

/// Destructive action the actor is asked to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmAction {
	Remove,
}

impl ConfirmAction {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Remove => "remove",
		}
	}
}

impl fmt::Display for ConfirmAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Asks the actor whether to go ahead with `action` on `subject`.
pub trait Confirm {
	fn confirm(&mut self, action: ConfirmAction, subject: &str) -> bool;
}

impl<F> Confirm for F
where
	F: FnMut(ConfirmAction, &str) -> bool,
{
	fn confirm(&mut self, action: ConfirmAction, subject: &str) -> bool {
		self(action, subject)
	}
}
