use super::{
	application::ApplicationElement,
	item::{ItemId, TodoItem},
	repository::TodoRepository,
};
use crate::{
	builder::{button, div, input, label, li, InputType},
	event::{bind, EventRegistration, BLUR, CHANGE, CLICK, DBLCLICK, KEYDOWN},
	IsElement,
};
use core::{cell::Cell, fmt};
use std::rc::{Rc, Weak};
use tracing::{debug, instrument};
use wasm_bindgen::UnwrapThrowExt;
use web_sys::{HtmlElement, HtmlInputElement};

/// One `<li>` of the to-do list.
///
/// Its event listeners are removed when this is dropped.
pub struct TodoItemElement {
	id: ItemId,
	root: HtmlElement,
	toggle: HtmlInputElement,
	_listeners: Vec<EventRegistration>,
}

impl fmt::Debug for TodoItemElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TodoItemElement").field("id", &self.id).field("root", &self.root).finish()
	}
}

/// What the row's listeners operate on. Each listener holds its own clone.
#[derive(Clone)]
struct Row {
	id: ItemId,
	root: HtmlElement,
	toggle: HtmlInputElement,
	label: HtmlElement,
	edit: HtmlInputElement,
	editing: Rc<Cell<bool>>,
	application: Weak<ApplicationElement>,
	repository: Rc<dyn TodoRepository>,
}

impl TodoItemElement {
	/// Creates a detached row for `item`.
	///
	/// The row's changes go to `repository` and, while it's alive, refresh `application`.
	#[must_use]
	pub fn new(application: Weak<ApplicationElement>, repository: Rc<dyn TodoRepository>, item: &TodoItem) -> Self {
		let toggle = input(InputType::Checkbox).css("toggle").apply(|toggle| toggle.set_checked(item.completed)).into_element();
		let label = label().text_content(&item.text).into_element();
		let destroy = button().css("destroy").into_element();
		let edit = input(InputType::Text).css("edit").into_element();

		let root = li()
			.data("item", &item.id.to_string())
			.add(div().css("view").add(&toggle).add(&label).add(&destroy))
			.add(&edit)
			.into_element();
		root.class_list().toggle_with_force("completed", item.completed).unwrap_throw();

		let row = Row {
			id: item.id,
			root: root.clone(),
			toggle: toggle.clone(),
			label: label.clone(),
			edit: edit.clone(),
			editing: Rc::new(Cell::new(false)),
			application,
			repository,
		};

		let listeners = vec![
			bind(&toggle, CHANGE, {
				let row = row.clone();
				move |_| row.toggled()
			}),
			bind(&label, DBLCLICK, {
				let row = row.clone();
				move |_| row.start_editing()
			}),
			bind(&destroy, CLICK, {
				let row = row.clone();
				move |_| row.destroy()
			}),
			bind(&edit, KEYDOWN, {
				let row = row.clone();
				move |event| match event.key().as_str() {
					"Enter" => row.commit(),
					"Escape" => row.cancel(),
					_ => (),
				}
			}),
			bind(&edit, BLUR, move |_| row.commit()),
		];

		Self {
			id: item.id,
			root,
			toggle,
			_listeners: listeners,
		}
	}

	#[must_use]
	pub fn id(&self) -> ItemId {
		self.id
	}

	#[must_use]
	pub fn is_completed(&self) -> bool {
		self.root.class_list().contains("completed")
	}

	/// Updates only the row's display. The repository is left alone.
	pub fn set_completed(&self, completed: bool) {
		self.root.class_list().toggle_with_force("completed", completed).unwrap_throw();
		self.toggle.set_checked(completed);
	}
}

impl IsElement for TodoItemElement {
	fn element(&self) -> HtmlElement {
		self.root.clone()
	}
}

impl Row {
	#[instrument(skip(self), fields(id = self.id))]
	fn toggled(&self) {
		let completed = self.toggle.checked();
		self.repository.complete(self.id, completed);
		self.root.class_list().toggle_with_force("completed", completed).unwrap_throw();
		if let Some(application) = self.application.upgrade() {
			application.update();
		}
	}

	fn start_editing(&self) {
		self.editing.set(true);
		self.root.class_list().add_1("editing").unwrap_throw();
		self.edit.set_value(&self.label.text_content().unwrap_or_default());
		if let Err(error) = self.edit.focus() {
			debug!("Failed to focus the edit field: {:?}", error);
		}
	}

	/// Leaves editing mode, renaming the item or destroying it if the new text is blank.
	#[instrument(skip(self), fields(id = self.id))]
	fn commit(&self) {
		if !self.editing.replace(false) {
			return;
		}
		self.root.class_list().remove_1("editing").unwrap_throw();

		let text = self.edit.value();
		let text = text.trim();
		if text.is_empty() {
			self.destroy();
		} else {
			self.repository.rename(self.id, text);
			self.label.set_text_content(Some(text));
		}
	}

	fn cancel(&self) {
		if self.editing.replace(false) {
			self.root.class_list().remove_1("editing").unwrap_throw();
			self.edit.set_value(&self.label.text_content().unwrap_or_default());
		}
	}

	fn destroy(&self) {
		match self.application.upgrade() {
			Some(application) => application.destroy_row(self.id),
			None => {
				self.repository.remove(self.id);
				self.root.remove();
			}
		}
	}
}
