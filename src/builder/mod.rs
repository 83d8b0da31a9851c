//! Fluent element construction.
//!
//! The free functions here each create a new, detached element and wrap it in a [`HtmlContentBuilder`].

mod content;
mod elements;

pub use content::{a, button, div, footer, h, header, html_element, input, label, li, section, span, ul, HtmlContentBuilder, InputType};
pub use elements::{Elements, ElementsBuilder, Iter};
