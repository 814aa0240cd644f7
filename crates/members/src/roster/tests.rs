use hitch_primitives::{Member, MemberId};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use super::MembershipRoster;
use crate::error::RosterError;

#[fixture]
fn members() -> Vec<Member> {
	vec![
		Member::new("u1", "owner@example.com", "Owner").owner().with_mapping("map1", "10.0.0.1"),
		Member::new("u2", "bob@example.com", "Bob"),
		Member::new("u3", "cy@example.com", "Cy").with_mapping("map3", "10.0.0.3"),
	]
}

#[rstest]
fn find_by_email_ignores_case_and_padding(members: Vec<Member>) {
	let roster = MembershipRoster::new(&members);
	let found = roster.find_by_email("  BOB@example.com ").map(|m| m.id.as_str());
	assert_eq!(found, Some("u2"));
	assert!(roster.find_by_email("nobody@example.com").is_none());
}

#[rstest]
fn find_by_id(members: Vec<Member>) {
	let roster = MembershipRoster::new(&members);
	assert_eq!(roster.find_by_id(&MemberId::new("u3")).map(|m| m.name.as_str()), Some("Cy"));
	assert!(roster.find_by_id(&MemberId::new("u9")).is_none());
}

#[rstest]
#[case("u1", true, false)]
#[case("u1", false, false)]
#[case("u2", true, true)]
#[case("u2", false, false)]
fn removability(members: Vec<Member>, #[case] id: &str, #[case] actor_is_owner: bool, #[case] expected: bool) {
	let roster = MembershipRoster::new(&members);
	let member = roster.find_by_id(&MemberId::new(id)).unwrap();
	assert_eq!(roster.is_removable(member, actor_is_owner), expected);
}

#[rstest]
fn removable_rows_skip_owner(members: Vec<Member>) {
	let roster = MembershipRoster::new(&members);
	let ids: Vec<_> = roster.removable(true).map(|m| m.id.as_str()).collect();
	assert_eq!(ids, vec!["u2", "u3"]);
	assert_eq!(roster.removable(false).count(), 0);
}

#[rstest]
fn well_formed_snapshot(members: Vec<Member>) {
	let roster = MembershipRoster::new(&members);
	assert_eq!(roster.owner_count(), 1);
	assert_eq!(roster.owner().map(|m| m.id.as_str()), Some("u1"));
	assert_eq!(roster.check(), Ok(()));
	assert_eq!(roster.len(), 3);
}

#[test]
fn empty_snapshot_reports_missing_owner() {
	let roster = MembershipRoster::new(&[]);
	assert!(roster.is_empty());
	assert_eq!(roster.check(), Err(RosterError::OwnerCount { count: 0 }));
}

#[rstest]
fn duplicate_rows_are_reported(mut members: Vec<Member>) {
	members.push(Member::new("u2", "other@example.com", "Other"));
	members.push(Member::new("u4", "Cy@Example.com", "Cy again").owner());
	let problems = MembershipRoster::new(&members).problems();
	assert_eq!(
		problems,
		vec![
			RosterError::OwnerCount { count: 2 },
			RosterError::DuplicateId(MemberId::new("u2")),
			RosterError::DuplicateEmail("Cy@Example.com".into()),
		]
	);
}
