//! Host facade for the members view.
//!
//! [`MembersPanel`] owns the invite dialog, one mapping editor per row that
//! has been touched, and the last roster snapshot. Every event method runs
//! to completion and leaves its results in the effect and notification
//! queues; the host drains them with [`MembersPanel::take_effects`],
//! [`MembersPanel::take_notifications`] or [`MembersPanel::flush`].

use std::collections::{HashMap, VecDeque};

use hitch_primitives::{Member, MemberCommand, MemberId, ProjectId, RemoveRequest};
use tracing::{debug, info, warn};

use crate::config::MembersConfig;
use crate::effects::{Confirm, ConfirmAction, Dispatcher, Effect};
use crate::email::EmailValidator;
use crate::invite::{InviteWorkflow, SubmitOutcome};
use crate::mapping::{LocalhostMappingEditor, MappingResolution};
use crate::notifications::{Notification, NotificationCenter};
use crate::roster::MembershipRoster;

#[cfg(test)]
mod tests;

/// Outcome of [`MembersPanel::remove_member`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
	/// Confirmed; the request was queued.
	Requested(RemoveRequest),
	/// The actor declined the confirmation prompt.
	Declined,
	/// The actor is not an owner, or the row is the owner.
	NotRemovable,
	/// No member with that id in the current snapshot.
	NotFound,
}

/// One display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRow<'a> {
	pub member: &'a Member,
	/// Value to show in the localhost cell, including an edit in progress.
	pub localhost: &'a str,
	pub editing: bool,
	/// Whether the row gets a remove action.
	pub removable: bool,
}

/// What [`MembersPanel::flush`] handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flushed {
	pub dispatched: usize,
	pub focus_invite_input: bool,
}

#[derive(Debug)]
pub struct MembersPanel {
	project_id: ProjectId,
	actor_is_owner: bool,
	config: MembersConfig,
	members: Vec<Member>,
	invite: InviteWorkflow,
	mappings: HashMap<MemberId, LocalhostMappingEditor>,
	effects: VecDeque<Effect>,
	notifications: NotificationCenter,
}

impl MembersPanel {
	pub fn new(project_id: impl Into<ProjectId>, actor_is_owner: bool, config: MembersConfig) -> Self {
		let project_id = project_id.into();
		let invite = InviteWorkflow::new(project_id.clone())
			.with_validator(EmailValidator::new(config.invite.separators.iter().copied()))
			.with_dedup(config.invite.dedup);
		Self {
			project_id,
			actor_is_owner,
			config,
			members: Vec::new(),
			invite,
			mappings: HashMap::new(),
			effects: VecDeque::new(),
			notifications: NotificationCenter::new(),
		}
	}

	pub fn with_roster(mut self, members: Vec<Member>) -> Self {
		self.set_roster(members);
		self
	}

	pub fn project_id(&self) -> &ProjectId {
		&self.project_id
	}

	pub fn actor_is_owner(&self) -> bool {
		self.actor_is_owner
	}

	pub fn set_actor_is_owner(&mut self, actor_is_owner: bool) {
		self.actor_is_owner = actor_is_owner;
	}

	pub fn config(&self) -> &MembersConfig {
		&self.config
	}

	/// Replaces the roster snapshot.
	///
	/// Idle editors are dropped so the new snapshot's values show. Edits in
	/// progress survive as long as their member is still present, rebased
	/// onto the member's new mapping record and value.
	pub fn set_roster(&mut self, members: Vec<Member>) {
		for problem in MembershipRoster::new(&members).problems() {
			warn!(project = %self.project_id, %problem, "Malformed roster snapshot");
		}
		self.mappings.retain(|id, editor| {
			if !editor.is_editing() {
				return false;
			}
			let Some(member) = members.iter().find(|m| &m.id == id) else {
				return false;
			};
			editor.rebase(member.localhost_mapping_id.clone(), member.localhost.clone());
			true
		});
		debug!(project = %self.project_id, members = members.len(), "Roster snapshot replaced");
		self.members = members;
	}

	pub fn roster(&self) -> MembershipRoster<'_> {
		MembershipRoster::new(&self.members)
	}

	/// Display rows in snapshot order.
	pub fn rows(&self) -> impl Iterator<Item = MemberRow<'_>> {
		let roster = self.roster();
		self.members.iter().map(move |member| {
			let editor = self.mappings.get(&member.id);
			MemberRow {
				member,
				localhost: editor.map_or(member.localhost.as_str(), LocalhostMappingEditor::value),
				editing: editor.is_some_and(LocalhostMappingEditor::is_editing),
				removable: roster.is_removable(member, self.actor_is_owner),
			}
		})
	}

	pub fn invite(&self) -> &InviteWorkflow {
		&self.invite
	}

	pub fn open_invite(&mut self) -> bool {
		match self.invite.open() {
			Some(_focus) => {
				self.effects.push_back(Effect::FocusInviteInput);
				true
			}
			None => false,
		}
	}

	pub fn update_invite_pending(&mut self, emails: Vec<String>) -> bool {
		self.invite.update_pending(emails)
	}

	/// Submits the invite dialog.
	///
	/// A rejected batch becomes a warning notification; an accepted one is
	/// queued for dispatch unless deduplication left it empty.
	pub fn submit_invite(&mut self, trailing_free_text: Option<&str>) -> SubmitOutcome {
		let roster = MembershipRoster::new(&self.members);
		let outcome = self.invite.submit_against(trailing_free_text, &roster);
		match &outcome {
			SubmitOutcome::Invite(cmd) if cmd.emails.is_empty() => {
				info!(project = %self.project_id, "Invite batch empty, nothing to send");
			}
			SubmitOutcome::Invite(cmd) => {
				self.effects
					.push_back(Effect::Dispatch(MemberCommand::Invite(cmd.clone())));
			}
			SubmitOutcome::Rejected(err) => {
				self.notifications
					.push_validation_warning(err, self.config.warning_timeout());
			}
			SubmitOutcome::NotOpen => {}
		}
		outcome
	}

	pub fn cancel_invite(&mut self) {
		self.invite.cancel();
	}

	pub fn mapping(&self, member_id: &MemberId) -> Option<&LocalhostMappingEditor> {
		self.mappings.get(member_id)
	}

	/// Starts editing a member's localhost. Returns `false` for unknown ids.
	pub fn begin_mapping_edit(&mut self, member_id: &MemberId) -> bool {
		let Some(member) = self.members.iter().find(|m| &m.id == member_id) else {
			debug!(member = %member_id, "Edit requested for unknown member");
			return false;
		};
		let editor = self.mappings.entry(member_id.clone()).or_insert_with(|| {
			LocalhostMappingEditor::with_value(self.project_id.clone(), member.localhost.clone())
				.with_unmapped_policy(self.config.localhost.unmapped_edits)
		});
		// A committed value shows until the next snapshot arrives.
		let current = if editor.is_editing() {
			member.localhost.clone()
		} else {
			editor.value().to_string()
		};
		editor.begin_edit(member.localhost_mapping_id.clone(), member.id.clone(), current);
		true
	}

	pub fn update_mapping(&mut self, member_id: &MemberId, value: impl Into<String>) -> bool {
		self.mappings
			.get_mut(member_id)
			.is_some_and(|editor| editor.update_proposed(value))
	}

	/// Resolves a member's edit, queueing a change request if one results.
	///
	/// Returns `None` if the member was never edited.
	pub fn commit_mapping(&mut self, member_id: &MemberId) -> Option<MappingResolution> {
		let resolution = self.mappings.get_mut(member_id)?.resolve();
		if let MappingResolution::Change(req) = &resolution {
			self.effects
				.push_back(Effect::Dispatch(MemberCommand::ChangeLocalhost(req.clone())));
		}
		Some(resolution)
	}

	pub fn cancel_mapping_edit(&mut self, member_id: &MemberId) -> bool {
		match self.mappings.get_mut(member_id) {
			Some(editor) if editor.is_editing() => {
				editor.cancel();
				true
			}
			_ => false,
		}
	}

	/// Runs the remove path: removability check, confirmation, request.
	pub fn remove_member(&mut self, member_id: &MemberId, confirm: &mut impl Confirm) -> RemoveOutcome {
		let roster = MembershipRoster::new(&self.members);
		let Some(member) = roster.find_by_id(member_id) else {
			debug!(member = %member_id, "Remove requested for unknown member");
			return RemoveOutcome::NotFound;
		};
		if !roster.is_removable(member, self.actor_is_owner) {
			debug!(member = %member_id, actor_is_owner = self.actor_is_owner, "Member not removable");
			return RemoveOutcome::NotRemovable;
		}
		if !confirm.confirm(ConfirmAction::Remove, &member.name) {
			debug!(member = %member_id, "Remove declined");
			return RemoveOutcome::Declined;
		}

		let req = RemoveRequest {
			project_id: self.project_id.clone(),
			member_id: member.id.clone(),
		};
		info!(project = %self.project_id, member = %member_id, "Remove requested");
		self.effects
			.push_back(Effect::Dispatch(MemberCommand::Remove(req.clone())));
		RemoveOutcome::Requested(req)
	}

	pub fn has_pending_effects(&self) -> bool {
		!self.effects.is_empty()
	}

	pub fn take_effects(&mut self) -> Vec<Effect> {
		self.effects.drain(..).collect()
	}

	pub fn take_notifications(&mut self) -> Vec<Notification> {
		self.notifications.take_pending()
	}

	pub fn notifications(&self) -> &NotificationCenter {
		&self.notifications
	}

	/// Hands every queued command to `dispatcher`, in queue order.
	pub fn flush(&mut self, dispatcher: &mut impl Dispatcher) -> Flushed {
		let mut flushed = Flushed::default();
		for effect in self.effects.drain(..) {
			match effect {
				Effect::Dispatch(command) => {
					debug!(kind = command.kind(), "Dispatching member command");
					dispatcher.dispatch(command);
					flushed.dispatched += 1;
				}
				Effect::FocusInviteInput => flushed.focus_invite_input = true,
			}
		}
		flushed
	}
}
