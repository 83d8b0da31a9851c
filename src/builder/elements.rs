use super::HtmlContentBuilder;
use crate::{
	todo::{ApplicationElement, TodoItemElement},
	IsElement,
};
use core::{
	any::{Any, TypeId},
	cell::RefCell,
	iter::FromIterator,
};
use std::rc::Rc;
use tracing::{instrument, trace, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlInputElement};

type Backing = Rc<RefCell<Vec<HtmlElement>>>;

type Resolver = fn(&dyn Any) -> Option<HtmlElement>;

thread_local! {
	/// Element-like types registered through [`ElementsBuilder::recognize`].
	static RESOLVERS: RefCell<Vec<(TypeId, Resolver)>> = RefCell::new(Vec::new());
}

/// Collects [***HTMLElement***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement)s in insertion order.
///
/// The collection can only grow. [`.elements()`](`ElementsBuilder::elements`) is a live view:
/// Elements added after it was obtained still show up when it's iterated (again).
///
/// # Threading
///
/// This type is `!Send` and `!Sync`, like the DOM handles it holds.
#[derive(Debug, Default)]
pub struct ElementsBuilder {
	elements: Backing,
}

impl ElementsBuilder {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// A read-only view of the collected elements that shares storage with this builder.
	#[must_use]
	pub fn elements(&self) -> Elements {
		Elements(Rc::clone(&self.elements))
	}

	/// Appends one element, or the element that `element` resolves to.
	pub fn add(&mut self, element: impl IsElement) -> &mut Self {
		self.elements.borrow_mut().push(element.element());
		self
	}

	/// Appends each item of `elements`, in order.
	pub fn add_all<I>(&mut self, elements: I) -> &mut Self
	where
		I: IntoIterator,
		I::Item: IsElement,
	{
		// Resolve first, since `elements` may be a view of this very builder.
		let resolved: Vec<_> = elements.into_iter().map(|element| element.element()).collect();
		self.elements.borrow_mut().extend(resolved);
		self
	}

	/// Makes [`.add_all_any(…)`](`ElementsBuilder::add_all_any`) recognise `T` on this thread.
	///
	/// `&dyn Any` hides whether an item implements [`IsElement`],
	/// so element-like types defined outside this crate have to be registered before they are passed there.
	/// Registering a type more than once has no further effect.
	pub fn recognize<T: 'static + IsElement>() {
		RESOLVERS.with(|resolvers| {
			let mut resolvers = resolvers.borrow_mut();
			let type_id = TypeId::of::<T>();
			if resolvers.iter().all(|(known, _)| *known != type_id) {
				let resolve: Resolver = downcast::<T>;
				resolvers.push((type_id, resolve));
			}
		});
	}

	/// Appends each item of `items` that resolves to an element, in order, and skips all others.
	///
	/// Recognised are [`HtmlElement`]s (also behind [`web_sys::Element`] and [`JsValue`]),
	/// the typed `web_sys` elements and [`HtmlContentBuilder`]s this crate creates,
	/// the to-do application's [`ApplicationElement`] and [`TodoItemElement`],
	/// `Box<dyn IsElement>` and `Rc<dyn IsElement>`,
	/// and any type registered with [`ElementsBuilder::recognize`].
	#[instrument(skip(self, items))]
	pub fn add_all_any<'a, I>(&mut self, items: I) -> &mut Self
	where
		I: IntoIterator<Item = &'a dyn Any>,
	{
		let mut resolved = Vec::new();
		let mut skipped = 0_usize;
		for item in items {
			match resolve_any(item) {
				Some(element) => resolved.push(element),
				None => skipped += 1,
			}
		}
		if skipped > 0 {
			trace!("Skipped {} item(s) that don't resolve to an `HtmlElement`.", skipped);
		}
		self.elements.borrow_mut().extend(resolved);
		self
	}

	/// Appends each [***HTMLElement***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement)
	/// yielded by the JavaScript iterable `iterable`, in order, and skips all other values.
	///
	/// Values that aren't iterable add nothing.
	#[instrument(skip(self, iterable))]
	pub fn add_all_js(&mut self, iterable: &JsValue) -> &mut Self {
		let iter = match js_sys::try_iter(iterable) {
			Ok(Some(iter)) => iter,
			Ok(None) => {
				trace!("Not iterable: {:?}", iterable);
				return self;
			}
			Err(error) => {
				warn!("Failed to iterate: {:?}", error);
				return self;
			}
		};

		// JavaScript iteration may read this builder's views, so nothing is borrowed until it's done.
		let mut resolved = Vec::new();
		let mut skipped = 0_usize;
		for item in iter {
			match item {
				Ok(item) => match item.dyn_into::<HtmlElement>() {
					Ok(element) => resolved.push(element),
					Err(_) => skipped += 1,
				},
				Err(error) => {
					warn!("JavaScript iteration failed: {:?}", error);
					break;
				}
			}
		}
		if skipped > 0 {
			trace!("Skipped {} JavaScript value(s) that aren't `HTMLElement`s.", skipped);
		}
		self.elements.borrow_mut().extend(resolved);
		self
	}
}

impl<T: IsElement> Extend<T> for ElementsBuilder {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.add_all(iter);
	}
}

impl<T: IsElement> FromIterator<T> for ElementsBuilder {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut builder = Self::new();
		builder.add_all(iter);
		builder
	}
}

fn downcast<T: 'static + IsElement>(item: &dyn Any) -> Option<HtmlElement> {
	item.downcast_ref::<T>().map(T::element)
}

fn resolve_any(item: &dyn Any) -> Option<HtmlElement> {
	downcast::<HtmlElement>(item)
		.or_else(|| downcast::<HtmlInputElement>(item))
		.or_else(|| downcast::<HtmlButtonElement>(item))
		.or_else(|| downcast::<HtmlAnchorElement>(item))
		.or_else(|| downcast::<HtmlContentBuilder<HtmlElement>>(item))
		.or_else(|| downcast::<HtmlContentBuilder<HtmlInputElement>>(item))
		.or_else(|| downcast::<HtmlContentBuilder<HtmlButtonElement>>(item))
		.or_else(|| downcast::<HtmlContentBuilder<HtmlAnchorElement>>(item))
		.or_else(|| item.downcast_ref::<web_sys::Element>().and_then(|element| element.dyn_ref::<HtmlElement>().cloned()))
		.or_else(|| item.downcast_ref::<JsValue>().and_then(|value| value.dyn_ref::<HtmlElement>().cloned()))
		.or_else(|| item.downcast_ref::<Box<dyn IsElement>>().map(|element| element.element()))
		.or_else(|| item.downcast_ref::<Rc<dyn IsElement>>().map(|element| element.element()))
		.or_else(|| downcast::<ApplicationElement>(item))
		.or_else(|| item.downcast_ref::<Rc<ApplicationElement>>().map(|application| application.element()))
		.or_else(|| downcast::<TodoItemElement>(item))
		.or_else(|| {
			// Copied out, since resolving runs foreign code that may register more types.
			let resolvers: Vec<Resolver> = RESOLVERS.with(|resolvers| resolvers.borrow().iter().map(|(_, resolve)| *resolve).collect());
			resolvers.into_iter().find_map(|resolve| resolve(item))
		})
}

/// A live, read-only view of an [`ElementsBuilder`]'s elements.
///
/// Cloning this is cheap and yields another view of the same elements.
#[derive(Debug, Clone)]
pub struct Elements(Backing);

impl Elements {
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.borrow().is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<HtmlElement> {
		self.0.borrow().get(index).cloned()
	}

	/// Iterates the elements by position.
	///
	/// Each step reads the current backing sequence,
	/// so elements appended during iteration are visited too.
	#[must_use]
	pub fn iter(&self) -> Iter {
		Iter {
			elements: Rc::clone(&self.0),
			next: 0,
		}
	}
}

impl IntoIterator for Elements {
	type Item = HtmlElement;
	type IntoIter = Iter;

	fn into_iter(self) -> Self::IntoIter {
		Iter { elements: self.0, next: 0 }
	}
}

impl IntoIterator for &Elements {
	type Item = HtmlElement;
	type IntoIter = Iter;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// See [`Elements::iter`].
#[derive(Debug)]
pub struct Iter {
	elements: Backing,
	next: usize,
}

impl Iterator for Iter {
	type Item = HtmlElement;

	fn next(&mut self) -> Option<Self::Item> {
		let element = self.elements.borrow().get(self.next).cloned();
		if element.is_some() {
			self.next += 1;
		}
		element
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.elements.borrow().len().saturating_sub(self.next), None)
	}
}
