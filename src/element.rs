use web_sys::HtmlElement;

/// Anything that can resolve to an [***HTMLElement***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement).
///
/// All [`web_sys`] HTML element types implement this through their [`AsRef<HtmlElement>`] conversions,
/// as do [`HtmlContentBuilder`](`crate::HtmlContentBuilder`)s and application components like
/// [`ApplicationElement`](`crate::todo::ApplicationElement`).
pub trait IsElement {
	/// Resolves to the (shared) element handle.
	///
	/// Handles are reference-counted on the JavaScript side, so this doesn't copy any DOM nodes.
	fn element(&self) -> HtmlElement;
}

impl<T: AsRef<HtmlElement>> IsElement for T {
	fn element(&self) -> HtmlElement {
		self.as_ref().clone()
	}
}
