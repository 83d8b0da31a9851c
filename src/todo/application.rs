use super::{
	filter::Filter,
	i18n::{Constant, I18n},
	item::{ItemId, TodoItem},
	repository::{Subscription, TodoRepository},
	row::TodoItemElement,
};
use crate::{
	builder::{a, button, footer, h, header, input, label, li, section, span, ul, InputType},
	dom::{self, remove_children_from, set_visible},
	event::{bind, EventRegistration, CHANGE, CLICK, KEYDOWN},
	IsElement,
};
use core::{
	cell::{Cell, RefCell},
	fmt, mem,
};
use hashbrown::HashSet;
use std::rc::Rc;
use tracing::{debug, instrument, trace};
use wasm_bindgen::UnwrapThrowExt;
use web_sys::{HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlInputElement, KeyboardEvent};

/// The to-do application's view: a `section.todoapp` with header, item list and footer.
///
/// Create it with [`ApplicationElement::new`], which wires up all event listeners
/// and subscribes to [external modifications](`TodoRepository::on_external_modification`) of the repository.
/// Listeners hold only weak references to the view, so dropping the last [`Rc`] deactivates it.
pub struct ApplicationElement {
	repository: Rc<dyn TodoRepository>,
	i18n: Rc<dyn I18n>,
	filter: Cell<Filter>,

	root: HtmlElement,
	new_todo: HtmlInputElement,
	main: HtmlElement,
	toggle_all: HtmlInputElement,
	list: HtmlElement,
	footer: HtmlElement,
	count: HtmlElement,
	filter_all: HtmlAnchorElement,
	filter_active: HtmlAnchorElement,
	filter_completed: HtmlAnchorElement,
	clear_completed: HtmlButtonElement,

	rows: RefCell<Vec<TodoItemElement>>,
	/// Rows that were removed by their own listeners.
	/// They are dropped on the next list mutation from outside, since a closure mustn't be freed while it runs.
	retired_rows: RefCell<Vec<TodoItemElement>>,
	listeners: RefCell<Vec<EventRegistration>>,
	subscription: RefCell<Option<Subscription>>,
}

impl fmt::Debug for ApplicationElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ApplicationElement")
			.field("filter", &self.filter.get())
			.field("root", &self.root)
			.field("rows", &self.rows.borrow().len())
			.finish()
	}
}

fn filter_link(filter: Filter, text: &str) -> HtmlAnchorElement {
	a().attr("href", filter.fragment()).text_content(text).into_element()
}

impl ApplicationElement {
	#[must_use]
	#[instrument(skip(repository, i18n))]
	pub fn new(repository: Rc<dyn TodoRepository>, i18n: Rc<dyn I18n>) -> Rc<Self> {
		let new_todo = input(InputType::Text)
			.css("new-todo")
			.apply(|input| {
				input.set_placeholder(i18n.constant(Constant::NewTodo));
				input.set_autofocus(true);
			})
			.into_element();
		let toggle_all = input(InputType::Checkbox).css("toggle-all").id("toggle-all").into_element();
		let list = ul().css("todo-list").into_element();
		let main = section()
			.css("main")
			.add(&toggle_all)
			.add(label().attr("for", "toggle-all").text_content(i18n.constant(Constant::CompleteAll)))
			.add(&list)
			.into_element();

		let count = span().css("todo-count").inner_html(&i18n.items_left(0)).into_element();
		let filter_all = filter_link(Filter::All, i18n.constant(Constant::FilterAll));
		let filter_active = filter_link(Filter::Active, i18n.constant(Constant::FilterActive));
		let filter_completed = filter_link(Filter::Completed, i18n.constant(Constant::FilterCompleted));
		let clear_completed = button().css("clear-completed").text_content(i18n.constant(Constant::ClearCompleted)).into_element();
		let footer = footer()
			.css("footer")
			.add(&count)
			.add(ul().css("filters").add(li().add(&filter_all)).add(li().add(&filter_active)).add(li().add(&filter_completed)))
			.add(&clear_completed)
			.into_element();

		let root = section()
			.css("todoapp")
			.add(header().css("header").add(h(1).text_content(i18n.constant(Constant::Todos))).add(&new_todo))
			.add(&main)
			.add(&footer)
			.into_element();

		let application = Rc::new(Self {
			repository,
			i18n,
			filter: Cell::new(Filter::All),
			root,
			new_todo,
			main,
			toggle_all,
			list,
			footer,
			count,
			filter_all,
			filter_active,
			filter_completed,
			clear_completed,
			rows: RefCell::new(Vec::new()),
			retired_rows: RefCell::new(Vec::new()),
			listeners: RefCell::new(Vec::new()),
			subscription: RefCell::new(None),
		});

		let weak = Rc::downgrade(&application);
		*application.listeners.borrow_mut() = vec![
			bind(&application.new_todo, KEYDOWN, {
				let weak = weak.clone();
				move |event| {
					if let Some(application) = weak.upgrade() {
						application.new_todo(&event);
					}
				}
			}),
			bind(&application.toggle_all, CHANGE, {
				let weak = weak.clone();
				move |_| {
					if let Some(application) = weak.upgrade() {
						application.toggle_all();
					}
				}
			}),
			bind(&application.clear_completed, CLICK, {
				let weak = weak.clone();
				move |_| {
					if let Some(application) = weak.upgrade() {
						application.clear_completed();
					}
				}
			}),
		];

		application.filter_links(Filter::All);
		application.reset();
		*application.subscription.borrow_mut() = Some(application.repository.on_external_modification(Box::new(move || {
			if let Some(application) = weak.upgrade() {
				application.reset();
			}
		})));

		application
	}

	#[must_use]
	pub fn current_filter(&self) -> Filter {
		self.filter.get()
	}

	/// Rebuilds all rows from the repository.
	#[instrument(skip(self))]
	pub fn reset(self: &Rc<Self>) {
		let old_rows = mem::take(&mut *self.rows.borrow_mut());
		remove_children_from(&self.list);
		drop(old_rows);
		self.retired_rows.borrow_mut().clear();

		for item in self.repository.items() {
			self.append_row(&item);
		}
		debug!("Rebuilt {} row(s).", self.rows.borrow().len());
		self.update();
	}

	fn append_row(self: &Rc<Self>, item: &TodoItem) {
		let row = TodoItemElement::new(Rc::downgrade(self), Rc::clone(&self.repository), item);
		self.list.append_child(&row.element()).unwrap_throw();
		self.rows.borrow_mut().push(row);
	}

	/// Removes the row of `id` and the item itself, from within that row's listener.
	pub(crate) fn destroy_row(&self, id: ItemId) {
		self.repository.remove(id);
		let row = {
			let mut rows = self.rows.borrow_mut();
			rows.iter().position(|row| row.id() == id).map(|i| rows.remove(i))
		};
		if let Some(row) = row {
			// May blur a focused edit field, which re-enters the row's listeners.
			row.element().remove();
			self.retired_rows.borrow_mut().push(row);
		}
		self.update();
	}

	/// Selects the filter that `token` (a URL fragment) names.
	#[instrument(skip(self))]
	pub fn filter(&self, token: &str) {
		let filter = Filter::parse_token(token);
		self.filter.set(filter);
		self.filter_links(filter);
		self.update();
	}

	fn filter_links(&self, filter: Filter) {
		for (link, link_filter) in &[
			(&self.filter_all, Filter::All),
			(&self.filter_active, Filter::Active),
			(&self.filter_completed, Filter::Completed),
		] {
			link.class_list().toggle_with_force("selected", *link_filter == filter).unwrap_throw();
		}
	}

	/// Recomputes everything derived from the rows: visibility, the item count, and the toggle-all state.
	pub fn update(&self) {
		let filter = self.filter.get();
		let mut total = 0_usize;
		let mut completed = 0_usize;
		for row in dom::children(&self.list) {
			let row_completed = row.class_list().contains("completed");
			total += 1;
			if row_completed {
				completed += 1;
			}
			set_visible(&row, filter.shows(row_completed));
		}
		trace!(total, completed, "Updating.");

		set_visible(&self.main, total > 0);
		set_visible(&self.footer, total > 0);
		self.toggle_all.set_checked(total > 0 && completed == total);
		self.count.set_inner_html(&self.i18n.items_left(total - completed));
		set_visible(&self.clear_completed, completed > 0);
	}

	fn new_todo(self: &Rc<Self>, event: &KeyboardEvent) {
		if event.key() != "Enter" {
			return;
		}

		let text = self.new_todo.value();
		let text = text.trim();
		if text.is_empty() {
			return;
		}

		self.retired_rows.borrow_mut().clear();
		let item = self.repository.add(text);
		self.append_row(&item);
		self.new_todo.set_value("");
		self.update();
	}

	#[instrument(skip(self))]
	fn toggle_all(&self) {
		let completed = self.toggle_all.checked();
		for row in self.rows.borrow().iter() {
			row.set_completed(completed);
		}
		self.repository.complete_all(completed);
		self.update();
	}

	#[instrument(skip(self))]
	fn clear_completed(&self) {
		self.retired_rows.borrow_mut().clear();
		let removed: Vec<TodoItemElement> = {
			let mut rows = self.rows.borrow_mut();
			let (removed, kept): (Vec<_>, Vec<_>) = mem::take(&mut *rows).into_iter().partition(TodoItemElement::is_completed);
			*rows = kept;
			removed
		};

		let ids: HashSet<ItemId> = removed.iter().map(TodoItemElement::id).collect();
		self.repository.remove_all(&ids);
		for row in &removed {
			row.element().remove();
		}
		drop(removed);
		self.update();
	}
}

impl IsElement for ApplicationElement {
	fn element(&self) -> HtmlElement {
		self.root.clone()
	}
}
