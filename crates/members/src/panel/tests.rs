use std::time::Duration;

use hitch_primitives::{ChangeRequest, InviteCommand, MappingId, Member, MemberCommand, MemberId, ProjectId, RemoveRequest};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use super::*;
use crate::config::{DedupPolicy, UnmappedEditPolicy};
use crate::mapping::NoOpReason;
use crate::notifications::{AutoDismiss, Level};

fn snapshot() -> Vec<Member> {
	vec![
		Member::new("u1", "owner@example.com", "Owner").owner().with_mapping("map1", "10.0.0.1"),
		Member::new("u2", "bob@example.com", "Bob").with_mapping("map2", "10.0.0.2"),
		Member::new("u3", "cy@example.com", "Cy"),
	]
}

#[fixture]
fn panel() -> MembersPanel {
	MembersPanel::new("p1", true, MembersConfig::default()).with_roster(snapshot())
}

fn id(raw: &str) -> MemberId {
	MemberId::new(raw)
}

fn commands(panel: &mut MembersPanel) -> Vec<MemberCommand> {
	let mut out = Vec::new();
	panel.flush(&mut |cmd: MemberCommand| out.push(cmd));
	out
}

#[rstest]
fn rows_mark_removable_for_owner(panel: MembersPanel) {
	let removable: Vec<_> = panel.rows().map(|r| (r.member.id.as_str(), r.removable)).collect();
	assert_eq!(removable, vec![("u1", false), ("u2", true), ("u3", true)]);
}

#[rstest]
fn rows_hide_remove_for_non_owner(mut panel: MembersPanel) {
	panel.set_actor_is_owner(false);
	assert!(panel.rows().all(|r| !r.removable));
}

#[rstest]
fn open_queues_focus(mut panel: MembersPanel) {
	assert!(panel.open_invite());
	assert!(!panel.open_invite());
	assert_eq!(panel.take_effects(), vec![Effect::FocusInviteInput]);
}

#[rstest]
fn accepted_invite_is_dispatched(mut panel: MembersPanel) {
	panel.open_invite();
	panel.update_invite_pending(vec!["x@y.com".into()]);
	panel.submit_invite(None);

	let mut dispatched = Vec::new();
	let flushed = panel.flush(&mut |cmd: MemberCommand| dispatched.push(cmd));
	assert_eq!(flushed, Flushed { dispatched: 1, focus_invite_input: true });
	assert_eq!(
		dispatched,
		vec![MemberCommand::Invite(InviteCommand {
			project_id: ProjectId::new("p1"),
			emails: vec!["x@y.com".into()],
		})]
	);
	assert!(!panel.invite().is_open());
}

#[rstest]
fn rejected_invite_notifies_and_stays_open(mut panel: MembersPanel) {
	panel.open_invite();
	panel.take_effects();

	let outcome = panel.submit_invite(Some("bad-email"));
	assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
	assert!(panel.invite().is_open());
	assert!(!panel.has_pending_effects());

	let notes = panel.take_notifications();
	assert_eq!(notes.len(), 1);
	assert_eq!(notes[0].level, Level::Warn);
	assert_eq!(notes[0].message, "'bad-email' is not a valid email address");
	assert_eq!(notes[0].auto_dismiss, AutoDismiss::After(Duration::from_secs(3)));
}

#[rstest]
fn cancelled_invite_sends_nothing(mut panel: MembersPanel) {
	panel.open_invite();
	panel.update_invite_pending(vec!["x@y.com".into()]);
	panel.cancel_invite();
	assert_eq!(panel.submit_invite(None), SubmitOutcome::NotOpen);
	assert!(commands(&mut panel).is_empty());
}

#[rstest]
fn empty_invite_is_not_dispatched(mut panel: MembersPanel) {
	panel.open_invite();
	assert!(matches!(panel.submit_invite(None), SubmitOutcome::Invite(_)));
	assert!(commands(&mut panel).is_empty());
}

#[test]
fn roster_dedup_can_empty_the_batch() {
	let mut config = MembersConfig::default();
	config.invite.dedup = DedupPolicy::AgainstRoster;
	let mut panel = MembersPanel::new("p1", true, config).with_roster(snapshot());
	panel.open_invite();
	panel.update_invite_pending(vec!["bob@example.com".into()]);
	panel.submit_invite(None);
	assert!(commands(&mut panel).is_empty());
	assert!(!panel.invite().is_open());
}

#[rstest]
fn mapping_change_is_dispatched(mut panel: MembersPanel) {
	assert!(panel.begin_mapping_edit(&id("u2")));
	assert!(panel.update_mapping(&id("u2"), "10.0.0.9"));
	let row = panel.rows().find(|r| r.member.id == id("u2")).unwrap();
	assert!(row.editing);
	assert_eq!(row.localhost, "10.0.0.9");

	assert!(matches!(panel.commit_mapping(&id("u2")), Some(MappingResolution::Change(_))));
	assert_eq!(
		commands(&mut panel),
		vec![MemberCommand::ChangeLocalhost(ChangeRequest {
			mapping_id: Some(MappingId::new("map2")),
			project_id: ProjectId::new("p1"),
			member_id: id("u2"),
			new_value: "10.0.0.9".into(),
		})]
	);
}

#[rstest]
fn unchanged_mapping_sends_nothing(mut panel: MembersPanel) {
	panel.begin_mapping_edit(&id("u2"));
	panel.update_mapping(&id("u2"), "10.0.0.2");
	assert_eq!(panel.commit_mapping(&id("u2")), Some(MappingResolution::NoOp(NoOpReason::Unchanged)));
	assert!(commands(&mut panel).is_empty());
}

#[rstest]
fn unmapped_member_edit_stays_local(mut panel: MembersPanel) {
	panel.begin_mapping_edit(&id("u3"));
	panel.update_mapping(&id("u3"), "10.0.0.3");
	assert_eq!(panel.commit_mapping(&id("u3")), Some(MappingResolution::NoOp(NoOpReason::NoMapping)));
	assert!(commands(&mut panel).is_empty());
}

#[test]
fn unmapped_member_edit_dispatches_under_policy() {
	let mut config = MembersConfig::default();
	config.localhost.unmapped_edits = UnmappedEditPolicy::Dispatch;
	let mut panel = MembersPanel::new("p1", true, config).with_roster(snapshot());
	panel.begin_mapping_edit(&id("u3"));
	panel.update_mapping(&id("u3"), "10.0.0.3");
	panel.commit_mapping(&id("u3"));
	let sent = commands(&mut panel);
	assert!(matches!(&sent[..], [MemberCommand::ChangeLocalhost(req)] if req.mapping_id.is_none()));
}

#[rstest]
fn mapping_events_for_unknown_member(mut panel: MembersPanel) {
	assert!(!panel.begin_mapping_edit(&id("ghost")));
	assert!(!panel.update_mapping(&id("ghost"), "1.1.1.1"));
	assert_eq!(panel.commit_mapping(&id("ghost")), None);
	assert!(!panel.cancel_mapping_edit(&id("ghost")));
}

#[rstest]
fn cancelled_mapping_edit_restores_value(mut panel: MembersPanel) {
	panel.begin_mapping_edit(&id("u2"));
	panel.update_mapping(&id("u2"), "10.9.9.9");
	assert!(panel.cancel_mapping_edit(&id("u2")));
	assert!(!panel.cancel_mapping_edit(&id("u2")));
	let row = panel.rows().find(|r| r.member.id == id("u2")).unwrap();
	assert_eq!(row.localhost, "10.0.0.2");
	assert!(!row.editing);
}

#[rstest]
fn roster_refresh_keeps_active_edits(mut panel: MembersPanel) {
	panel.begin_mapping_edit(&id("u2"));
	panel.begin_mapping_edit(&id("u3"));
	panel.cancel_mapping_edit(&id("u3"));

	panel.set_roster(snapshot());
	assert!(panel.mapping(&id("u2")).is_some_and(|ed| ed.is_editing()));
	assert!(panel.mapping(&id("u3")).is_none());

	panel.set_roster(snapshot().into_iter().filter(|m| m.id != id("u2")).collect());
	assert!(panel.mapping(&id("u2")).is_none());
}

#[rstest]
fn roster_refresh_rebases_active_edit_onto_new_mapping(mut panel: MembersPanel) {
	panel.begin_mapping_edit(&id("u3"));
	panel.update_mapping(&id("u3"), "10.0.0.9");

	let refreshed = snapshot()
		.into_iter()
		.map(|m| if m.id == id("u3") { m.with_mapping("map3", "") } else { m })
		.collect();
	panel.set_roster(refreshed);

	assert!(matches!(panel.commit_mapping(&id("u3")), Some(MappingResolution::Change(_))));
	assert_eq!(
		commands(&mut panel),
		vec![MemberCommand::ChangeLocalhost(ChangeRequest {
			mapping_id: Some(MappingId::new("map3")),
			project_id: ProjectId::new("p1"),
			member_id: id("u3"),
			new_value: "10.0.0.9".into(),
		})]
	);
}

#[rstest]
fn second_edit_starts_from_committed_value(mut panel: MembersPanel) {
	panel.begin_mapping_edit(&id("u2"));
	panel.update_mapping(&id("u2"), "10.0.0.9");
	panel.commit_mapping(&id("u2"));
	commands(&mut panel);

	assert!(panel.begin_mapping_edit(&id("u2")));
	let row = panel.rows().find(|r| r.member.id == id("u2")).unwrap();
	assert_eq!(row.localhost, "10.0.0.9");
	assert!(row.editing);
	assert_eq!(panel.commit_mapping(&id("u2")), Some(MappingResolution::NoOp(NoOpReason::Unchanged)));
	assert!(commands(&mut panel).is_empty());
}

#[rstest]
fn confirmed_remove_is_dispatched(mut panel: MembersPanel) {
	let mut asked = Vec::new();
	let outcome = panel.remove_member(&id("u2"), &mut |action: ConfirmAction, subject: &str| {
		asked.push((action, subject.to_string()));
		true
	});
	let expected = RemoveRequest {
		project_id: ProjectId::new("p1"),
		member_id: id("u2"),
	};
	assert_eq!(outcome, RemoveOutcome::Requested(expected.clone()));
	assert_eq!(asked, vec![(ConfirmAction::Remove, "Bob".to_string())]);
	assert_eq!(commands(&mut panel), vec![MemberCommand::Remove(expected)]);
}

#[rstest]
fn declined_remove_sends_nothing(mut panel: MembersPanel) {
	let outcome = panel.remove_member(&id("u2"), &mut |_: ConfirmAction, _: &str| false);
	assert_eq!(outcome, RemoveOutcome::Declined);
	assert!(commands(&mut panel).is_empty());
}

#[rstest]
fn owner_row_is_never_removed(mut panel: MembersPanel) {
	let outcome = panel.remove_member(&id("u1"), &mut |_: ConfirmAction, _: &str| -> bool {
		panic!("owner removal must not prompt")
	});
	assert_eq!(outcome, RemoveOutcome::NotRemovable);
}

#[rstest]
fn non_owner_cannot_remove(mut panel: MembersPanel) {
	panel.set_actor_is_owner(false);
	let outcome = panel.remove_member(&id("u2"), &mut |_: ConfirmAction, _: &str| true);
	assert_eq!(outcome, RemoveOutcome::NotRemovable);
}

#[rstest]
fn unknown_member_remove_is_not_found(mut panel: MembersPanel) {
	let outcome = panel.remove_member(&id("ghost"), &mut |_: ConfirmAction, _: &str| true);
	assert_eq!(outcome, RemoveOutcome::NotFound);
}
