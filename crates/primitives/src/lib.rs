#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Plain data shared between the membership core and its hosts.
//!
//! Nothing here makes decisions. Members are snapshots handed in by the
//! backend, commands are requests handed back out.

/// Outbound requests produced by the membership core.
pub mod command;
/// String-backed identifier newtypes.
pub mod ids;
/// Member records as supplied in roster snapshots.
pub mod member;

pub use command::{ChangeRequest, InviteCommand, MemberCommand, RemoveRequest};
pub use ids::{MappingId, MemberId, ProjectId};
pub use member::Member;
