//! Class-name data binding for the DOM.
//!
//! Keys of a JSON object are matched against the class names (see [`Config::class_attr`]) of a markup tree:
//!
//! - A scalar is written into the element's text, or into the targets its `data-map` attribute names for that key
//!   (`text`, `html`, `none` or any attribute, optionally as `target[pattern]` substitution).
//! - An object rescopes its element: its nested scalars can be mapped onto the element itself as `key.nested`,
//!   and descendants see the object's entries in place of `key`.
//! - An array replaces its element with one clone per item. With `data-member`, the array is rebound under another name
//!   so that a descendant is repeated instead; `data-index` exposes the item position.
//!
//! ```html
//! <ul>
//!   <li class="users" data-index="i" data-map="users.name:none">
//!     <span class="i"></span>: <b class="name"></b>
//!   </li>
//! </ul>
//! ```

#![doc(html_root_url = "https://docs.rs/classy-dom/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod dom;
pub mod mapping;
pub mod value;
pub mod web;

mod binder;
mod error;
#[cfg(test)]
mod mock;

pub use config::Config;
pub use error::Error;
pub use serde_json;
pub use web::render;

use binder::Binder;
use context::Context;
use dom::Element;
use serde_json::Value;
use tracing::instrument;

/// Binds `data` to each of `templates` and their descendants, in place.
///
/// Never fails: unbound class names are ignored and malformed `data-map` entries fall back to the default targets.
///
/// Returns the elements now standing where the templates stood.
/// A template bound directly to an array is reported as (and, if it has a parent, replaced by) its clones.
#[instrument(skip(templates, data), fields(templates.len = templates.len()))]
pub fn apply<E: Element>(templates: &[E], data: &Value) -> Vec<E> {
	Binder::new(config::get()).apply(templates, &Context::from_value(data))
}

/// Sets `markup` as the content of `wrapper`, binds `data` to it and returns the resulting markup.
///
/// Any existing content of `wrapper` is replaced. See [`render`] for the browser convenience.
pub fn render_into<E: Element>(wrapper: &E, markup: &str, data: &Value) -> String {
	wrapper.set_inner_html(markup);
	apply(std::slice::from_ref(wrapper), data);
	wrapper.inner_html()
}
