use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ids::{MappingId, MemberId};

/// One row of a project roster.
///
/// Members are created and destroyed by the backend. The core only reads
/// snapshots and answers with requests; it never edits a `Member` in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
	pub id: MemberId,
	pub email: String,
	pub name: String,
	/// Mapping record backing [`Self::localhost`]. `None` until the backend
	/// has created one; an empty string on the wire means the same thing.
	#[serde(
		default,
		deserialize_with = "empty_as_none",
		serialize_with = "none_as_empty"
	)]
	pub localhost_mapping_id: Option<MappingId>,
	#[serde(default)]
	pub localhost: String,
	#[serde(default)]
	pub is_owner: bool,
}

impl Member {
	/// Creates a non-owner member with no localhost mapping.
	pub fn new(id: impl Into<MemberId>, email: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			email: email.into(),
			name: name.into(),
			localhost_mapping_id: None,
			localhost: String::new(),
			is_owner: false,
		}
	}

	/// Marks this member as the roster owner.
	pub fn owner(mut self) -> Self {
		self.is_owner = true;
		self
	}

	/// Attaches an existing mapping record and its current value.
	pub fn with_mapping(mut self, mapping_id: impl Into<MappingId>, localhost: impl Into<String>) -> Self {
		let mapping_id = mapping_id.into();
		self.localhost_mapping_id = (!mapping_id.is_empty()).then_some(mapping_id);
		self.localhost = localhost.into();
		self
	}
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<MappingId>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;
	Ok(raw.filter(|id| !id.trim().is_empty()).map(MappingId::new))
}

fn none_as_empty<S>(id: &Option<MappingId>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(id.as_ref().map(MappingId::as_str).unwrap_or_default())
}
