//! Invite dialog state machine.
//!
//! ```text
//! Closed ──open──► Open(pending = [])
//!   ▲                 │  update_pending / failed submit (stays Open)
//!   └── cancel ───────┤
//!   └── submit ok ────┘  InviteCommand
//! ```

use hitch_primitives::{InviteCommand, ProjectId};
use tracing::{debug, info};

use crate::config::DedupPolicy;
use crate::email::EmailValidator;
use crate::error::ValidationError;
use crate::roster::MembershipRoster;


/// Signal that the email entry should take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InviteState {
	#[default]
	Closed,
	Open {
		/// Raw entries collected so far, in entry order.
		pending: Vec<String>,
		/// Rejection from the most recent submit, cleared on the next edit.
		last_error: Option<ValidationError>,
	},
}

/// Outcome of [`InviteWorkflow::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// The batch validated; the dialog closed.
	Invite(InviteCommand),
	/// The batch was rejected; the dialog stays open with its entries.
	Rejected(ValidationError),
	/// There was no open dialog to submit.
	NotOpen,
}

/// Collects, validates and submits one invite batch at a time.
#[derive(Debug, Clone)]
pub struct InviteWorkflow {
	project_id: ProjectId,
	validator: EmailValidator,
	dedup: DedupPolicy,
	state: InviteState,
}

impl InviteWorkflow {
	pub fn new(project_id: ProjectId) -> Self {
		Self {
			project_id,
			validator: EmailValidator::default(),
			dedup: DedupPolicy::default(),
			state: InviteState::Closed,
		}
	}

	pub fn with_validator(mut self, validator: EmailValidator) -> Self {
		self.validator = validator;
		self
	}

	pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
		self.dedup = dedup;
		self
	}

	pub fn state(&self) -> &InviteState {
		&self.state
	}

	pub fn is_open(&self) -> bool {
		matches!(self.state, InviteState::Open { .. })
	}

	/// Entries collected in the open dialog; empty when closed.
	pub fn pending(&self) -> &[String] {
		match &self.state {
			InviteState::Open { pending, .. } => pending,
			InviteState::Closed => &[],
		}
	}

	pub fn last_error(&self) -> Option<&ValidationError> {
		match &self.state {
			InviteState::Open { last_error, .. } => last_error.as_ref(),
			InviteState::Closed => None,
		}
	}

	/// Opens an empty dialog. Returns `None` if one is already open.
	pub fn open(&mut self) -> Option<FocusRequest> {
		if self.is_open() {
			debug!("Invite dialog already open");
			return None;
		}
		debug!(project = %self.project_id, "Open invite dialog");
		self.state = InviteState::Open {
			pending: Vec::new(),
			last_error: None,
		};
		Some(FocusRequest)
	}

	/// Replaces the collected entries. Returns `false` when closed.
	pub fn update_pending(&mut self, emails: Vec<String>) -> bool {
		match &mut self.state {
			InviteState::Open { pending, last_error } => {
				*pending = emails;
				*last_error = None;
				true
			}
			InviteState::Closed => {
				debug!("Ignoring invite entries while closed");
				false
			}
		}
	}

	/// Submits without deduplicating against existing members.
	pub fn submit(&mut self, trailing_free_text: Option<&str>) -> SubmitOutcome {
		self.submit_against(trailing_free_text, &MembershipRoster::new(&[]))
	}

	/// Submits the batch, using `roster` for [`DedupPolicy::AgainstRoster`].
	///
	/// Text typed but not yet turned into an entry is passed as
	/// `trailing_free_text` and joins the batch before validation.
	pub fn submit_against(&mut self, trailing_free_text: Option<&str>, roster: &MembershipRoster<'_>) -> SubmitOutcome {
		let InviteState::Open { pending, last_error } = &mut self.state else {
			debug!("Ignoring invite submit while closed");
			return SubmitOutcome::NotOpen;
		};

		if let Some(text) = trailing_free_text.filter(|t| !t.trim().is_empty()) {
			pending.push(text.to_string());
		}

		let mut emails = match self.validator.validate(pending.iter()) {
			Ok(emails) => emails,
			Err(err) => {
				debug!(error = %err, "Invite batch rejected");
				*last_error = Some(err.clone());
				return SubmitOutcome::Rejected(err);
			}
		};

		if self.dedup.within_batch() {
			emails.dedup_within();
		}
		if self.dedup.against_roster() {
			emails.remove_where(|email| roster.contains_email(email));
		}

		info!(project = %self.project_id, count = emails.len(), "Invite batch accepted");
		self.state = InviteState::Closed;
		SubmitOutcome::Invite(InviteCommand {
			project_id: self.project_id.clone(),
			emails: emails.into_vec(),
		})
	}

	/// Closes the dialog and forgets its entries.
	pub fn cancel(&mut self) {
		if self.is_open() {
			debug!("Cancel invite dialog");
		}
		self.state = InviteState::Closed;
	}
}
