//! Small helpers over the host DOM.
//!
//! These assume a well-formed page: Failures to reach the `window` or `document`
//! are thrown into JavaScript via [`UnwrapThrowExt`].

use tracing::trace;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Document, Element, HtmlElement, Node, Window};

#[must_use]
pub fn window() -> Window {
	web_sys::window().expect_throw("twig-dom: No global `window` found.")
}

#[must_use]
pub fn document() -> Document {
	window().document().expect_throw("twig-dom: No `document` found on `window`.")
}

/// Removes all child nodes (not only elements) from `parent`.
pub fn remove_children_from(parent: &Node) {
	let mut removed = 0_usize;
	while let Some(child) = parent.first_child() {
		parent.remove_child(&child).unwrap_throw();
		removed += 1;
	}
	trace!("Removed {} child node(s).", removed);
}

/// Shows or hides `element` through its inline `display` style.
///
/// Showing an element clears the inline style again, so the stylesheet value applies.
pub fn set_visible(element: &HtmlElement, visible: bool) {
	let style = element.style();
	if visible {
		style.remove_property("display").unwrap_throw();
	} else {
		style.set_property("display", "none").unwrap_throw();
	}
}

#[must_use]
pub fn is_visible(element: &HtmlElement) -> bool {
	element.style().get_property_value("display").unwrap_throw() != "none"
}

/// Iterates the current element children of `parent` that are [***HTMLElement***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement)s.
///
/// The [***HTMLCollection***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLCollection) is live,
/// so don't add or remove children of `parent` while iterating.
pub fn children(parent: &Element) -> impl Iterator<Item = HtmlElement> {
	let children = parent.children();
	(0..children.length()).filter_map(move |i| children.item(i)).filter_map(|child| child.dyn_into::<HtmlElement>().ok())
}
