#![cfg(target_arch = "wasm32")]

use std::{
	any::Any,
	cell::Cell,
	rc::{Rc, Weak},
};
use twig_dom::{
	builder::{div, input, span, InputType},
	todo::{ApplicationElement, Catalog, TodoItem, TodoItemElement, TodoItemRepository, TodoRepository},
	ElementsBuilder, IsElement,
};
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::HtmlElement;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);


fn ids(builder: &ElementsBuilder) -> Vec<String> {
	builder.elements().iter().map(|element| element.id()).collect()
}

#[wasm_bindgen_test]
fn insertion_order() {
	web_logging_::init();

	let mut builder = ElementsBuilder::new();
	builder
		.add(div().id("a"))
		.add(span().id("b").into_element())
		.add_all(vec![div().id("c"), div().id("d")])
		.add(input(InputType::Text).id("e").into_element())
		.add_all(Vec::<web_sys::HtmlElement>::new())
		.add(div().id("f"));

	assert_eq!(ids(&builder), ["a", "b", "c", "d", "e", "f"]);
}

#[wasm_bindgen_test]
fn mixed_items_skip_unknown_types() {
	web_logging_::init();

	let element = div().id("a").into_element();
	let number = 42_u32;
	let input_builder = input(InputType::Checkbox).id("b");
	let text = "not an element";
	let js_element: JsValue = span().id("c").into_element().into();
	let js_number = JsValue::from_f64(1.0);
	let boxed: Box<dyn IsElement> = Box::new(div().id("d"));
	let js_object: JsValue = js_sys::Object::new().into();
	let shared: Rc<dyn IsElement> = Rc::new(span().id("e").into_element());

	let items: Vec<&dyn Any> = vec![&element, &number, &input_builder, &text, &js_element, &js_number, &boxed, &js_object, &shared];

	let mut builder = ElementsBuilder::new();
	builder.add_all_any(items);

	assert_eq!(ids(&builder), ["a", "b", "c", "d", "e"]);
}

#[wasm_bindgen_test]
fn mixed_items_include_todo_components() {
	web_logging_::init();

	let repository: Rc<dyn TodoRepository> = Rc::new(TodoItemRepository::in_memory());
	let row = TodoItemElement::new(Weak::new(), Rc::clone(&repository), &TodoItem::new(1, "row"));
	let application = ApplicationElement::new(repository, Rc::new(Catalog::english()));
	let number = 7_i64;

	let items: Vec<&dyn Any> = vec![&row, &number, &application, &*application];

	let mut builder = ElementsBuilder::new();
	builder.add_all_any(items);

	let elements: Vec<HtmlElement> = builder.elements().iter().collect();
	assert_eq!(elements, [row.element(), application.element(), application.element()]);
}

struct Card {
	root: HtmlElement,
}

impl IsElement for Card {
	fn element(&self) -> HtmlElement {
		self.root.clone()
	}
}

#[wasm_bindgen_test]
fn registered_element_likes() {
	web_logging_::init();

	let card = Card { root: div().id("card").into_element() };

	let mut builder = ElementsBuilder::new();
	builder.add(div().id("a"));
	builder.add_all_any(vec![&card as &dyn Any]);
	assert_eq!(ids(&builder), ["a"]);

	ElementsBuilder::recognize::<Card>();
	ElementsBuilder::recognize::<Card>();
	builder.add_all_any(vec![&card as &dyn Any]);
	assert_eq!(ids(&builder), ["a", "card"]);
}

#[wasm_bindgen_test]
fn javascript_iteration_may_read_the_view() {
	web_logging_::init();

	let mut builder = ElementsBuilder::new();
	builder.add(div().id("a"));

	// A JavaScript iterator whose `next` reads the builder's view, then yields one element.
	let elements = builder.elements();
	let steps = Rc::new(Cell::new(0));
	let seen_len = Rc::new(Cell::new(None));
	let next = Closure::wrap(Box::new({
		let steps = Rc::clone(&steps);
		let seen_len = Rc::clone(&seen_len);
		move || -> JsValue {
			seen_len.set(Some(elements.len()));
			let step = steps.get();
			steps.set(step + 1);

			let result = js_sys::Object::new();
			js_sys::Reflect::set(&result, &"done".into(), &(step > 0).into()).unwrap();
			if step == 0 {
				js_sys::Reflect::set(&result, &"value".into(), &span().id("b").into_element()).unwrap();
			}
			result.into()
		}
	}) as Box<dyn FnMut() -> JsValue>);

	let iterator = js_sys::Object::new();
	js_sys::Reflect::set(&iterator, &"next".into(), next.as_ref()).unwrap();
	let iterable = js_sys::Object::new();
	js_sys::Reflect::set(&iterable, &"iterator".into(), &iterator).unwrap();
	let get_iterator = js_sys::Function::new_no_args("return this.iterator;");
	js_sys::Reflect::set(&iterable, &js_sys::Symbol::iterator(), &get_iterator).unwrap();

	builder.add_all_js(&iterable);
	drop(next);

	assert_eq!(steps.get(), 2);
	assert_eq!(seen_len.get(), Some(1));
	assert_eq!(ids(&builder), ["a", "b"]);
}

#[wasm_bindgen_test]
fn javascript_iterables() {
	web_logging_::init();

	let array = js_sys::Array::new();
	array.push(&div().id("a").into_element());
	array.push(&JsValue::from_str("b"));
	array.push(&JsValue::NULL);
	array.push(&span().id("c").into_element());

	let mut builder = ElementsBuilder::new();
	builder.add_all_js(&array).add_all_js(&JsValue::from_f64(3.0)).add_all_js(&JsValue::UNDEFINED);

	assert_eq!(ids(&builder), ["a", "c"]);
}

#[wasm_bindgen_test]
fn live_view() {
	web_logging_::init();

	let mut builder = ElementsBuilder::new();
	let elements = builder.elements();
	assert!(elements.is_empty());

	builder.add(div().id("a"));
	let mut iter = elements.iter();
	assert_eq!(iter.next().map(|element| element.id()).as_deref(), Some("a"));
	assert!(iter.next().is_none());

	builder.add(div().id("b"));
	assert_eq!(iter.next().map(|element| element.id()).as_deref(), Some("b"));
	assert_eq!(elements.len(), 2);
	assert_eq!(elements.get(1).map(|element| element.id()).as_deref(), Some("b"));

	let again: Vec<String> = (&elements).into_iter().map(|element| element.id()).collect();
	assert_eq!(again, ["a", "b"]);
}

#[wasm_bindgen_test]
fn adding_its_own_view() {
	web_logging_::init();

	let mut builder = ElementsBuilder::new();
	builder.add(div().id("a")).add(div().id("b"));
	builder.add_all(builder.elements());

	assert_eq!(ids(&builder), ["a", "b", "a", "b"]);
}

#[wasm_bindgen_test]
fn collect_and_extend() {
	web_logging_::init();

	let mut builder: ElementsBuilder = vec![div().id("a"), div().id("b")].into_iter().collect();
	builder.extend(vec![span().id("c").into_element()]);

	assert_eq!(ids(&builder), ["a", "b", "c"]);
}

#[wasm_bindgen_test]
fn elements_feed_a_parent() {
	web_logging_::init();

	let mut builder = ElementsBuilder::new();
	builder.add(span().text_content("1")).add(span().text_content("2"));

	let parent = div().add_all(builder.elements()).into_element();
	assert_eq!(parent.inner_html(), "<span>1</span><span>2</span>");
}
