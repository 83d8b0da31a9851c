//! Typed DOM event listeners.

use core::{any::type_name, fmt, marker::PhantomData};
use tracing::{error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast, UnwrapThrowExt};
use web_sys::{EventTarget, FocusEvent, HashChangeEvent, KeyboardEvent, MouseEvent, StorageEvent};

/// A DOM event name, together with the [`web_sys`] type of the events dispatched under it.
pub struct EventType<T> {
	name: &'static str,
	_event: PhantomData<fn(T)>,
}
impl<T> EventType<T> {
	#[must_use]
	pub const fn new(name: &'static str) -> Self {
		Self { name, _event: PhantomData }
	}

	#[must_use]
	pub const fn name(&self) -> &'static str {
		self.name
	}
}
impl<T> Clone for EventType<T> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for EventType<T> {}
impl<T> fmt::Debug for EventType<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("EventType").field(&self.name).field(&type_name::<T>()).finish()
	}
}

pub const BLUR: EventType<FocusEvent> = EventType::new("blur");
pub const CHANGE: EventType<web_sys::Event> = EventType::new("change");
pub const CLICK: EventType<MouseEvent> = EventType::new("click");
pub const DBLCLICK: EventType<MouseEvent> = EventType::new("dblclick");
pub const HASHCHANGE: EventType<HashChangeEvent> = EventType::new("hashchange");
pub const KEYDOWN: EventType<KeyboardEvent> = EventType::new("keydown");
pub const STORAGE: EventType<StorageEvent> = EventType::new("storage");

/// An active event listener.
///
/// The listener is removed from its target when this is dropped, unless [`.forget()`](`EventRegistration::forget`) was called.
#[must_use = "The event listener is removed again when this is dropped."]
pub struct EventRegistration {
	target: EventTarget,
	name: &'static str,
	closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}
impl fmt::Debug for EventRegistration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventRegistration")
			.field("target", &self.target)
			.field("name", &self.name)
			.field("active", &self.closure.is_some())
			.finish()
	}
}

/// Adds `handler` as listener for `event_type` on `target`.
///
/// Events are passed on as `T` without a runtime type check,
/// so [`EventType`]s should only be paired with the events the browser actually dispatches for that name.
#[instrument(skip(target, handler))]
pub fn bind<T>(target: &impl AsRef<EventTarget>, event_type: EventType<T>, mut handler: impl 'static + FnMut(T)) -> EventRegistration
where
	T: 'static + JsCast,
{
	let target: EventTarget = target.as_ref().clone();
	let closure = Closure::wrap(Box::new(move |event: web_sys::Event| handler(event.unchecked_into::<T>())) as Box<dyn FnMut(web_sys::Event)>);
	target
		.add_event_listener_with_callback(event_type.name, closure.as_ref().unchecked_ref())
		.expect_throw("twig-dom: Failed to add event listener.");
	trace!("Added {:?} listener.", event_type.name);
	EventRegistration {
		target,
		name: event_type.name,
		closure: Some(closure),
	}
}

impl EventRegistration {
	#[must_use]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Keeps the listener attached for the rest of the page's lifetime.
	///
	/// The handler closure is leaked into the JavaScript heap.
	pub fn forget(mut self) {
		if let Some(closure) = self.closure.take() {
			closure.forget();
		}
	}
}
impl Drop for EventRegistration {
	fn drop(&mut self) {
		if let Some(closure) = self.closure.take() {
			match self.target.remove_event_listener_with_callback(self.name, closure.as_ref().unchecked_ref()) {
				Ok(()) => trace!("Removed {:?} listener.", self.name),
				Err(error) => error!("Failed to remove {:?} listener: {:?}", self.name, error),
			}
		}
	}
}
