#![cfg(target_arch = "wasm32")]

use std::{cell::Cell, rc::Rc};
use twig_dom::{
	bind,
	builder::{button, div},
	dom::document,
	event::{CLICK, KEYDOWN},
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);


fn counter() -> (Rc<Cell<usize>>, impl 'static + FnMut(web_sys::MouseEvent)) {
	let count = Rc::new(Cell::new(0));
	let handler = {
		let count = Rc::clone(&count);
		move |_: web_sys::MouseEvent| count.set(count.get() + 1)
	};
	(count, handler)
}

#[wasm_bindgen_test]
fn click() {
	web_logging_::init();

	let (click_count, handler) = counter();
	let button = button().id("test-button").on(CLICK, handler).into_element();
	document().body().unwrap().append_child(&button).unwrap();

	assert_eq!(click_count.get(), 0);
	let found: HtmlElement = document().get_element_by_id("test-button").unwrap().dyn_into().unwrap();
	found.click();
	assert_eq!(click_count.get(), 1);

	button.remove();
}

#[wasm_bindgen_test]
fn dropping_the_registration_removes_the_listener() {
	web_logging_::init();

	let (click_count, handler) = counter();
	let target = div().into_element();
	let registration = bind(&target, CLICK, handler);
	assert_eq!(registration.name(), "click");

	target.click();
	target.click();
	assert_eq!(click_count.get(), 2);

	drop(registration);
	target.click();
	assert_eq!(click_count.get(), 2);
}

#[wasm_bindgen_test]
fn forgotten_registrations_stay_active() {
	web_logging_::init();

	let (click_count, handler) = counter();
	let target = div().into_element();
	bind(&target, CLICK, handler).forget();

	target.click();
	assert_eq!(click_count.get(), 1);
}

#[wasm_bindgen_test]
fn handlers_receive_typed_events() {
	web_logging_::init();

	let key = Rc::new(Cell::new(None));
	let target = div().into_element();
	let _registration = bind(&target, KEYDOWN, {
		let key = Rc::clone(&key);
		move |event: KeyboardEvent| key.set(Some(event.key()))
	});

	let mut init = KeyboardEventInit::new();
	init.key("Escape");
	let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
	target.dispatch_event(&event).unwrap();

	assert_eq!(key.take().as_deref(), Some("Escape"));
}
