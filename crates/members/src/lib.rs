#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Membership core for a shared project.
//!
//! Everything here is synchronous and owned by the caller: UI events come in
//! through [`MembersPanel`], decisions are made against the current roster
//! snapshot, and the results leave as queued [`Effect`]s and
//! [`Notification`]s for the host to drain.
//!
//! * [`EmailValidator`] - splits, trims and shape-checks invite batches
//! * [`MembershipRoster`] - read-only queries over a roster snapshot
//! * [`LocalhostMappingEditor`] - per-row edit state and commit decision
//! * [`InviteWorkflow`] - invite dialog state machine
//! * [`MembersPanel`] - host facade wiring the above together
//!
//! ```text
//! UI event ──► MembersPanel ──┬─► InviteWorkflow ──► EmailValidator
//!                             ├─► LocalhostMappingEditor
//!                             └─► MembershipRoster (remove path)
//!                                        │
//!              Effect / Notification ◄───┘
//! ```

/// Policies and TOML configuration.
pub mod config;
/// Outbound effects and the collaborator traits that consume them.
pub mod effects;
/// Invite batch validation.
pub mod email;
/// Error types shared across the state machines.
pub mod error;
/// Invite dialog state machine.
pub mod invite;
/// Localhost mapping edit state machine.
pub mod mapping;
/// Actor-facing notifications.
pub mod notifications;
/// Host facade.
pub mod panel;
/// Roster snapshot queries.
pub mod roster;

pub use config::{ConfigError, DedupPolicy, MembersConfig, UnmappedEditPolicy};
pub use effects::{Confirm, ConfirmAction, Dispatcher, Effect};
pub use email::{EmailValidator, ValidEmails, is_valid_email};
pub use error::{RosterError, ValidationError};
pub use hitch_primitives::{
	ChangeRequest, InviteCommand, MappingId, Member, MemberCommand, MemberId, ProjectId,
	RemoveRequest,
};
pub use invite::{FocusRequest, InviteState, InviteWorkflow, SubmitOutcome};
pub use mapping::{LocalhostMappingEditor, MappingEditState, MappingResolution, MappingState, NoOpReason};
pub use notifications::{AutoDismiss, Level, Notification, NotificationCenter};
pub use panel::{Flushed, MemberRow, MembersPanel, RemoveOutcome};
pub use roster::MembershipRoster;
