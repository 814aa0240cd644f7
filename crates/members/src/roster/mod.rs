//! Read-only queries over a roster snapshot.

use std::collections::HashSet;

use hitch_primitives::{Member, MemberId};

use crate::error::RosterError;

#[cfg(test)]
mod tests;

/// Borrowed view of the members the backend last reported.
///
/// There are no mutation methods; changes go out as requests and come back
/// as a fresh snapshot.
#[derive(Debug, Clone, Copy)]
pub struct MembershipRoster<'a> {
	members: &'a [Member],
}

impl<'a> MembershipRoster<'a> {
	pub fn new(members: &'a [Member]) -> Self {
		Self { members }
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Members in snapshot order.
	pub fn iter(&self) -> std::slice::Iter<'a, Member> {
		self.members.iter()
	}

	/// Looks a member up by email, ignoring surrounding whitespace and ASCII case.
	pub fn find_by_email(&self, email: &str) -> Option<&'a Member> {
		let email = email.trim();
		self.members
			.iter()
			.find(|m| m.email.trim().eq_ignore_ascii_case(email))
	}

	pub fn find_by_id(&self, id: &MemberId) -> Option<&'a Member> {
		self.members.iter().find(|m| &m.id == id)
	}

	pub fn contains_email(&self, email: &str) -> bool {
		self.find_by_email(email).is_some()
	}

	/// Whether the acting actor may remove `member`.
	///
	/// Only owners remove, and the owner row itself is never removable.
	pub fn is_removable(&self, member: &Member, acting_actor_is_owner: bool) -> bool {
		acting_actor_is_owner && !member.is_owner
	}

	/// Rows that get a remove action for this actor.
	pub fn removable(&self, acting_actor_is_owner: bool) -> impl Iterator<Item = &'a Member> + use<'a> {
		let roster = *self;
		self.members
			.iter()
			.filter(move |m| roster.is_removable(m, acting_actor_is_owner))
	}

	pub fn owner(&self) -> Option<&'a Member> {
		self.members.iter().find(|m| m.is_owner)
	}

	/// Number of owner rows; exactly one in a well-formed snapshot.
	pub fn owner_count(&self) -> usize {
		self.members.iter().filter(|m| m.is_owner).count()
	}

	/// Every well-formedness problem in the snapshot, in discovery order.
	pub fn problems(&self) -> Vec<RosterError> {
		let mut problems = Vec::new();

		let owners = self.owner_count();
		if owners != 1 {
			problems.push(RosterError::OwnerCount { count: owners });
		}

		let mut ids = HashSet::new();
		let mut emails = HashSet::new();
		for member in self.members {
			if !ids.insert(&member.id) {
				problems.push(RosterError::DuplicateId(member.id.clone()));
			}
			if !emails.insert(member.email.trim().to_ascii_lowercase()) {
				problems.push(RosterError::DuplicateEmail(member.email.clone()));
			}
		}

		problems
	}

	/// Returns the first well-formedness problem, if any.
	pub fn check(&self) -> Result<(), RosterError> {
		match self.problems().into_iter().next() {
			Some(problem) => Err(problem),
			None => Ok(()),
		}
	}
}

impl<'a> IntoIterator for MembershipRoster<'a> {
	type Item = &'a Member;
	type IntoIter = std::slice::Iter<'a, Member>;

	fn into_iter(self) -> Self::IntoIter {
		self.members.iter()
	}
}
