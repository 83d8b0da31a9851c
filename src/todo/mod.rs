//! A [TodoMVC](https://todomvc.com/) application built with this crate's builders.
//!
//! The generated markup uses the standard TodoMVC class names, so the stock TodoMVC stylesheet applies.
//!
//! ```no_run
//! use std::rc::Rc;
//! use twig_dom::todo::{self, Catalog, TodoItemRepository, DEFAULT_STORAGE_KEY};
//!
//! todo::start(
//! 	Rc::new(TodoItemRepository::local_storage(DEFAULT_STORAGE_KEY)),
//! 	Rc::new(Catalog::english()),
//! )
//! .forget();
//! ```

mod application;
mod filter;
mod i18n;
mod item;
mod repository;
mod row;

pub use application::ApplicationElement;
pub use filter::Filter;
pub use i18n::{Catalog, Constant, I18n};
pub use item::{ItemId, TodoItem};
pub use repository::{Observers, Subscription, TodoItemRepository, TodoRepository, DEFAULT_STORAGE_KEY};
pub use row::TodoItemElement;

use crate::{
	dom::{document, window},
	event::{bind, EventRegistration, HASHCHANGE},
	IsElement,
};
use core::mem;
use std::rc::Rc;
use tracing::{info, instrument};
use wasm_bindgen::UnwrapThrowExt;

/// A running application, mounted into `document.body`.
///
/// Dropping this unmounts the application and stops following the URL fragment.
#[derive(Debug)]
pub struct TodoApp {
	application: Rc<ApplicationElement>,
	_hashchange: EventRegistration,
}

/// Mounts a new [`ApplicationElement`] into `document.body` and keeps its filter in sync with `location.hash`.
#[must_use = "The application is unmounted when the returned `TodoApp` is dropped. Call `.forget()` to keep it running."]
#[instrument(skip(repository, i18n))]
pub fn start(repository: Rc<dyn TodoRepository>, i18n: Rc<dyn I18n>) -> TodoApp {
	let application = ApplicationElement::new(repository, i18n);
	document()
		.body()
		.expect_throw("twig-dom: No `document.body` to mount into.")
		.append_child(&application.element())
		.unwrap_throw();

	application.filter(&current_hash());
	let weak = Rc::downgrade(&application);
	let hashchange = bind(&window(), HASHCHANGE, move |_| {
		if let Some(application) = weak.upgrade() {
			application.filter(&current_hash());
		}
	});

	info!("Started.");
	TodoApp {
		application,
		_hashchange: hashchange,
	}
}

fn current_hash() -> String {
	window().location().hash().unwrap_or_default()
}

impl TodoApp {
	#[must_use]
	pub fn application(&self) -> &Rc<ApplicationElement> {
		&self.application
	}

	/// Keeps the application mounted and running for the rest of the page's lifetime.
	///
	/// This leaks the application and its `hashchange` listener.
	pub fn forget(self) {
		mem::forget(self);
	}
}

impl Drop for TodoApp {
	fn drop(&mut self) {
		self.application.element().remove();
	}
}
