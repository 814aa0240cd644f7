//! Localhost mapping edit state machine.
//!
//! One editor per member row:
//!
//! ```text
//! Idle(value) ──begin_edit──► Editing(original, proposed)
//!      ▲                            │
//!      ├──── resolve: Change ───────┤  Idle(proposed)
//!      └──── resolve: NoOp / cancel ┘  Idle(original)
//! ```

use hitch_primitives::{ChangeRequest, MappingId, MemberId, ProjectId};
use tracing::debug;

use crate::config::UnmappedEditPolicy;


/// Transient state of one in-progress cell edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEditState {
	pub mapping_id: Option<MappingId>,
	pub member_id: MemberId,
	pub original_value: String,
	pub proposed_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingState {
	Idle { value: String },
	Editing(MappingEditState),
}

/// Why a resolution produced no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
	/// The proposed value equals the original.
	Unchanged,
	/// The member has no mapping record to change.
	NoMapping,
	/// Nothing was being edited.
	NotEditing,
}

/// Outcome of [`LocalhostMappingEditor::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingResolution {
	/// A request for the dispatch collaborator.
	Change(ChangeRequest),
	/// Nothing to send.
	NoOp(NoOpReason),
}

impl MappingResolution {
	pub fn is_noop(&self) -> bool {
		matches!(self, Self::NoOp(_))
	}

	pub fn into_request(self) -> Option<ChangeRequest> {
		match self {
			Self::Change(req) => Some(req),
			Self::NoOp(_) => None,
		}
	}
}

/// Tracks the edit of a single member's localhost value and decides whether
/// committing it warrants a change request.
#[derive(Debug, Clone)]
pub struct LocalhostMappingEditor {
	project_id: ProjectId,
	unmapped: UnmappedEditPolicy,
	state: MappingState,
}

impl LocalhostMappingEditor {
	/// Creates an idle editor with an empty value.
	pub fn new(project_id: ProjectId) -> Self {
		Self::with_value(project_id, String::new())
	}

	/// Creates an idle editor showing `value`.
	pub fn with_value(project_id: ProjectId, value: impl Into<String>) -> Self {
		Self {
			project_id,
			unmapped: UnmappedEditPolicy::default(),
			state: MappingState::Idle { value: value.into() },
		}
	}

	pub fn with_unmapped_policy(mut self, policy: UnmappedEditPolicy) -> Self {
		self.unmapped = policy;
		self
	}

	pub fn state(&self) -> &MappingState {
		&self.state
	}

	pub fn is_editing(&self) -> bool {
		matches!(self.state, MappingState::Editing(_))
	}

	/// The value a presentation layer should show for this row.
	pub fn value(&self) -> &str {
		match &self.state {
			MappingState::Idle { value } => value,
			MappingState::Editing(edit) => &edit.proposed_value,
		}
	}

	/// Starts editing, seeding the proposal with the current value.
	///
	/// An edit already in progress is discarded. An empty mapping id is
	/// treated as absent.
	pub fn begin_edit(
		&mut self,
		mapping_id: Option<MappingId>,
		member_id: impl Into<MemberId>,
		current_value: impl Into<String>,
	) {
		let member_id = member_id.into();
		let current_value = current_value.into();
		if let MappingState::Editing(prev) = &self.state {
			debug!(member = %prev.member_id, "Discarding unresolved localhost edit");
		}
		debug!(member = %member_id, value = %current_value, "Begin localhost edit");
		self.state = MappingState::Editing(MappingEditState {
			mapping_id: mapping_id.filter(|id| !id.is_empty()),
			member_id,
			original_value: current_value.clone(),
			proposed_value: current_value,
		});
	}

	/// Replaces the proposed value. Returns `false` when not editing.
	pub fn update_proposed(&mut self, new_value: impl Into<String>) -> bool {
		match &mut self.state {
			MappingState::Editing(edit) => {
				edit.proposed_value = new_value.into();
				true
			}
			MappingState::Idle { .. } => {
				debug!("Ignoring localhost proposal outside of an edit");
				false
			}
		}
	}

	/// Points an edit in progress at a newer snapshot of its member.
	///
	/// The proposed value is kept; the mapping id and the value it is
	/// compared against are replaced. Returns `false` when not editing.
	pub fn rebase(&mut self, mapping_id: Option<MappingId>, current_value: impl Into<String>) -> bool {
		let MappingState::Editing(edit) = &mut self.state else {
			return false;
		};
		edit.mapping_id = mapping_id.filter(|id| !id.is_empty());
		edit.original_value = current_value.into();
		debug!(member = %edit.member_id, mapped = edit.mapping_id.is_some(), "Rebased localhost edit");
		true
	}

	/// Ends the edit without sending anything.
	pub fn cancel(&mut self) {
		if let MappingState::Editing(edit) = &mut self.state {
			debug!(member = %edit.member_id, "Cancel localhost edit");
			let value = std::mem::take(&mut edit.original_value);
			self.state = MappingState::Idle { value };
		}
	}

	/// Ends the edit, deciding whether it produces a change request.
	pub fn resolve(&mut self) -> MappingResolution {
		let edit = match std::mem::replace(&mut self.state, MappingState::Idle { value: String::new() }) {
			MappingState::Editing(edit) => edit,
			idle @ MappingState::Idle { .. } => {
				self.state = idle;
				return MappingResolution::NoOp(NoOpReason::NotEditing);
			}
		};

		let reason = if edit.proposed_value == edit.original_value {
			Some(NoOpReason::Unchanged)
		} else if edit.mapping_id.is_none() && self.unmapped == UnmappedEditPolicy::Ignore {
			Some(NoOpReason::NoMapping)
		} else {
			None
		};

		if let Some(reason) = reason {
			debug!(member = %edit.member_id, ?reason, "Localhost edit resolved without a request");
			self.state = MappingState::Idle {
				value: edit.original_value,
			};
			return MappingResolution::NoOp(reason);
		}

		debug!(member = %edit.member_id, value = %edit.proposed_value, "Localhost edit resolved to change request");
		self.state = MappingState::Idle {
			value: edit.proposed_value.clone(),
		};
		MappingResolution::Change(ChangeRequest {
			mapping_id: edit.mapping_id,
			project_id: self.project_id.clone(),
			member_id: edit.member_id,
			new_value: edit.proposed_value,
		})
	}
}
