use serde::{Deserialize, Serialize};

pub type ItemId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
	pub id: ItemId,
	pub text: String,
	#[serde(default)]
	pub completed: bool,
}

impl TodoItem {
	#[must_use]
	pub fn new(id: ItemId, text: impl Into<String>) -> Self {
		Self {
			id,
			text: text.into(),
			completed: false,
		}
	}
}
