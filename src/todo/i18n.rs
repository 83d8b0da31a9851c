//! User-facing labels.

use hashbrown::HashMap;

/// Static labels of the to-do application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
	Todos,
	NewTodo,
	CompleteAll,
	FilterAll,
	FilterActive,
	FilterCompleted,
	ClearCompleted,
}

impl Constant {
	#[must_use]
	pub fn english(self) -> &'static str {
		match self {
			Constant::Todos => "todos",
			Constant::NewTodo => "What needs to be done?",
			Constant::CompleteAll => "Mark all as complete",
			Constant::FilterAll => "All",
			Constant::FilterActive => "Active",
			Constant::FilterCompleted => "Completed",
			Constant::ClearCompleted => "Clear completed",
		}
	}
}

pub trait I18n {
	fn constant(&self, constant: Constant) -> &str;

	/// The remaining-items message, as HTML.
	fn items_left(&self, count: usize) -> String;
}

/// An [`I18n`] implementation with English defaults that can be overridden per label.
///
/// Message templates substitute `{0}` with the count.
#[derive(Debug, Clone)]
pub struct Catalog {
	constants: HashMap<Constant, String>,
	item_left: String,
	items_left: String,
}

impl Default for Catalog {
	fn default() -> Self {
		Self::english()
	}
}

impl Catalog {
	#[must_use]
	pub fn english() -> Self {
		Self {
			constants: HashMap::new(),
			item_left: "<strong>{0}</strong> item left".to_owned(),
			items_left: "<strong>{0}</strong> items left".to_owned(),
		}
	}

	#[must_use]
	pub fn with_constant(mut self, constant: Constant, text: impl Into<String>) -> Self {
		self.constants.insert(constant, text.into());
		self
	}

	/// Replaces the singular (exactly one) and plural (any other count) templates.
	#[must_use]
	pub fn with_items_left(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
		self.item_left = singular.into();
		self.items_left = plural.into();
		self
	}
}

impl I18n for Catalog {
	fn constant(&self, constant: Constant) -> &str {
		self.constants.get(&constant).map_or_else(|| constant.english(), String::as_str)
	}

	fn items_left(&self, count: usize) -> String {
		let template = if count == 1 { &self.item_left } else { &self.items_left };
		template.replace("{0}", &count.to_string())
	}
}
