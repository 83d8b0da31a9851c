use crate::{
	dom::document,
	event::{bind, EventType},
	IsElement,
};
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlInputElement};

/// Configures a single element of type `E` and its children.
///
/// Every setter consumes and returns the builder, so configuration reads as one expression:
///
/// ```no_run
/// use twig_dom::builder::{li, ul};
///
/// let list = ul()
/// 	.css("todo-list")
/// 	.add(li().text_content("first"))
/// 	.add(li().text_content("second"))
/// 	.into_element();
/// ```
#[derive(Debug)]
pub struct HtmlContentBuilder<E> {
	element: E,
}

impl<E> HtmlContentBuilder<E>
where
	E: AsRef<HtmlElement>,
{
	#[must_use]
	pub fn new(element: E) -> Self {
		Self { element }
	}

	fn html(&self) -> &HtmlElement {
		self.element.as_ref()
	}

	/// Adds each whitespace-separated class in `classes` to the element's ***classList***.
	#[must_use]
	pub fn css(self, classes: &str) -> Self {
		let class_list = self.html().class_list();
		for class in classes.split_whitespace() {
			class_list.add_1(class).unwrap_throw();
		}
		self
	}

	#[must_use]
	pub fn id(self, id: &str) -> Self {
		self.html().set_id(id);
		self
	}

	#[must_use]
	pub fn attr(self, name: &str, value: &str) -> Self {
		self.html().set_attribute(name, value).unwrap_throw();
		self
	}

	/// Sets a `data-*` attribute. `key` is in camelCase, as with ***dataset***.
	#[must_use]
	pub fn data(self, key: &str, value: &str) -> Self {
		self.html().dataset().set(key, value).unwrap_throw();
		self
	}

	#[must_use]
	pub fn text_content(self, text: &str) -> Self {
		self.html().set_text_content(Some(text));
		self
	}

	/// Replaces the element's content with parsed HTML. Don't pass untrusted input here.
	#[must_use]
	pub fn inner_html(self, html: &str) -> Self {
		self.html().set_inner_html(html);
		self
	}

	#[must_use]
	pub fn add(self, child: impl IsElement) -> Self {
		self.html().append_child(&child.element()).unwrap_throw();
		self
	}

	#[must_use]
	pub fn add_all<I>(self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: IsElement,
	{
		let html = self.html();
		for child in children {
			html.append_child(&child.element()).unwrap_throw();
		}
		self
	}

	/// Runs `f` with the typed element, for properties that have no dedicated setter here.
	#[must_use]
	pub fn apply(self, f: impl FnOnce(&E)) -> Self {
		f(&self.element);
		self
	}

	/// Binds `handler` for the element's lifetime.
	///
	/// The listener can't be removed again. Use [`bind`] directly where that's necessary.
	#[must_use]
	pub fn on<T>(self, event_type: EventType<T>, handler: impl 'static + FnMut(T)) -> Self
	where
		T: 'static + JsCast,
	{
		bind(self.html(), event_type, handler).forget();
		self
	}

	#[must_use]
	pub fn into_element(self) -> E {
		self.element
	}
}

impl<E: AsRef<HtmlElement>> IsElement for HtmlContentBuilder<E> {
	fn element(&self) -> HtmlElement {
		self.html().clone()
	}
}

/// Creates a detached element named `tag`, typed as `E` without a runtime check.
#[must_use]
pub fn html_element<E>(tag: &str) -> HtmlContentBuilder<E>
where
	E: AsRef<HtmlElement> + JsCast,
{
	let element = document().create_element(tag).expect_throw("twig-dom: Failed to create element.");
	HtmlContentBuilder::new(element.unchecked_into())
}

#[must_use]
pub fn a() -> HtmlContentBuilder<HtmlAnchorElement> {
	html_element("a")
}

#[must_use]
pub fn button() -> HtmlContentBuilder<HtmlButtonElement> {
	html_element("button")
}

#[must_use]
pub fn div() -> HtmlContentBuilder<HtmlElement> {
	html_element("div")
}

#[must_use]
pub fn footer() -> HtmlContentBuilder<HtmlElement> {
	html_element("footer")
}

/// Creates a heading. `level` is clamped to `1..=6`.
#[must_use]
pub fn h(level: u8) -> HtmlContentBuilder<HtmlElement> {
	html_element(&format!("h{}", level.max(1).min(6)))
}

#[must_use]
pub fn header() -> HtmlContentBuilder<HtmlElement> {
	html_element("header")
}

#[must_use]
pub fn input(input_type: InputType) -> HtmlContentBuilder<HtmlInputElement> {
	let builder = html_element::<HtmlInputElement>("input");
	builder.element.set_type(input_type.as_str());
	builder
}

#[must_use]
pub fn label() -> HtmlContentBuilder<HtmlElement> {
	html_element("label")
}

#[must_use]
pub fn li() -> HtmlContentBuilder<HtmlElement> {
	html_element("li")
}

#[must_use]
pub fn section() -> HtmlContentBuilder<HtmlElement> {
	html_element("section")
}

#[must_use]
pub fn span() -> HtmlContentBuilder<HtmlElement> {
	html_element("span")
}

#[must_use]
pub fn ul() -> HtmlContentBuilder<HtmlElement> {
	html_element("ul")
}

/// Values of the [***type***](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/input#input_types) attribute of `<input>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
	Button,
	Checkbox,
	Color,
	Date,
	Email,
	File,
	Hidden,
	Number,
	Password,
	Radio,
	Range,
	Search,
	Submit,
	Text,
	Url,
}
impl InputType {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			InputType::Button => "button",
			InputType::Checkbox => "checkbox",
			InputType::Color => "color",
			InputType::Date => "date",
			InputType::Email => "email",
			InputType::File => "file",
			InputType::Hidden => "hidden",
			InputType::Number => "number",
			InputType::Password => "password",
			InputType::Radio => "radio",
			InputType::Range => "range",
			InputType::Search => "search",
			InputType::Submit => "submit",
			InputType::Text => "text",
			InputType::Url => "url",
		}
	}
}
