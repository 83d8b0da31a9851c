#![doc(html_root_url = "https://docs.rs/twig-dom/0.0.1")]
#![warn(clippy::pedantic)]
//! Fluent builders for [`web_sys`] DOM element trees.
//!
//! [`HtmlContentBuilder`] creates and configures a single element,
//! [`ElementsBuilder`] collects any number of them in order,
//! and [`todo`] is a complete TodoMVC application built with both.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod builder;
pub mod dom;
mod element;
pub mod event;
pub mod todo;

pub use builder::{ElementsBuilder, HtmlContentBuilder};
pub use element::IsElement;
pub use event::{bind, EventRegistration, EventType};
