use serde::{Deserialize, Serialize};

use crate::ids::{MappingId, MemberId, ProjectId};

/// Request to remove a member from a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
	pub project_id: ProjectId,
	pub member_id: MemberId,
}

/// Request to invite a batch of email addresses into a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCommand {
	pub project_id: ProjectId,
	pub emails: Vec<String>,
}

/// Request to change a member's localhost mapping.
///
/// `mapping_id` is only `None` when the host opted into forwarding edits on
/// members that have no mapping record yet; the backend then decides whether
/// to create one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
	pub mapping_id: Option<MappingId>,
	pub project_id: ProjectId,
	pub member_id: MemberId,
	pub new_value: String,
}

/// Any request the membership core hands to the dispatch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MemberCommand {
	Remove(RemoveRequest),
	Invite(InviteCommand),
	ChangeLocalhost(ChangeRequest),
}

impl MemberCommand {
	/// Stable name of the command kind, used in logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Remove(_) => "remove",
			Self::Invite(_) => "invite",
			Self::ChangeLocalhost(_) => "changeLocalhost",
		}
	}

	pub fn project_id(&self) -> &ProjectId {
		match self {
			Self::Remove(req) => &req.project_id,
			Self::Invite(cmd) => &cmd.project_id,
			Self::ChangeLocalhost(req) => &req.project_id,
		}
	}
}

impl From<RemoveRequest> for MemberCommand {
	fn from(req: RemoveRequest) -> Self {
		Self::Remove(req)
	}
}

impl From<InviteCommand> for MemberCommand {
	fn from(cmd: InviteCommand) -> Self {
		Self::Invite(cmd)
	}
}

impl From<ChangeRequest> for MemberCommand {
	fn from(req: ChangeRequest) -> Self {
		Self::ChangeLocalhost(req)
	}
}
