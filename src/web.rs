//! Binding against the browser DOM.

use crate::{config, dom, Error};
use serde_json::Value;
use tracing::{instrument, warn};
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};

impl dom::Element for web_sys::Element {
	fn attribute(&self, name: &str) -> Option<String> {
		self.get_attribute(name)
	}

	fn set_attribute(&self, name: &str, value: &str) {
		if let Err(error) = web_sys::Element::set_attribute(self, name, value) {
			warn!("Could not set attribute {:?}={:?}: {:?}", name, value, error)
		}
	}

	fn remove_attribute(&self, name: &str) {
		if let Err(error) = web_sys::Element::remove_attribute(self, name) {
			warn!("Could not remove attribute {:?}: {:?}", name, error)
		}
	}

	fn text(&self) -> String {
		self.text_content().unwrap_or_default()
	}

	fn set_text(&self, text: &str) {
		self.set_text_content(Some(text))
	}

	fn inner_html(&self) -> String {
		web_sys::Element::inner_html(self)
	}

	fn set_inner_html(&self, html: &str) {
		web_sys::Element::set_inner_html(self, html)
	}

	fn children(&self) -> Vec<Self> {
		let children = web_sys::Element::children(self);
		(0..children.length()).filter_map(|i| children.item(i)).collect()
	}

	fn deep_clone(&self) -> Self {
		match self.clone_node_with_deep(true).map(|node| node.dyn_into::<web_sys::Element>()) {
			Ok(Ok(clone)) => clone,
			Ok(Err(node)) => wasm_bindgen::throw_str(&format!("classy-dom: clone of <{}> is not an element: {:?}", self.tag_name(), node)),
			Err(error) => wasm_bindgen::throw_val(error),
		}
	}

	fn insert_before(&self, node: &Self) {
		if let Err(error) = self.before_with_node_1(node) {
			warn!("Could not insert <{}> before <{}>: {:?}", node.tag_name(), self.tag_name(), error)
		}
	}

	fn remove(&self) {
		web_sys::Element::remove(self)
	}
}

/// Wraps `markup` in a [`template_wrapper_tag`](`config::Config::template_wrapper_tag`) element of the current document,
/// binds `data` to it and returns the resulting markup.
///
/// # Errors
///
/// Iff there is no `window.document` or the wrapper element can't be created.
#[instrument(skip(markup, data))]
pub fn render(markup: &str, data: &Value) -> Result<String, Error> {
	let document = web_sys::window().and_then(|window| window.document()).ok_or(Error::NoDocument)?;
	let wrapper = document.create_element(&config::get().template_wrapper_tag)?;
	Ok(crate::render_into(&wrapper, markup, data))
}

fn data_from_js(data: &JsValue) -> Result<Value, Error> {
	if data.is_undefined() {
		return Ok(Value::Null);
	}
	let json = js_sys::JSON::stringify(data)?;
	Ok(serde_json::from_str(&String::from(json))?)
}

/// `render(markup: string, data: any): string` for JavaScript callers.
///
/// # Errors
///
/// Iff `data` can't be serialised as JSON, or see [`render`].
#[wasm_bindgen(js_name = render)]
pub fn render_js(markup: &str, data: &JsValue) -> Result<String, JsValue> {
	Ok(render(markup, &data_from_js(data)?)?)
}

/// `apply(template: Element, data: any): Element[]` for JavaScript callers.
///
/// # Errors
///
/// Iff `data` can't be serialised as JSON.
#[wasm_bindgen(js_name = apply)]
pub fn apply_js(template: &web_sys::Element, data: &JsValue) -> Result<js_sys::Array, JsValue> {
	let data = data_from_js(data)?;
	Ok(crate::apply(&[template.clone()], &data).into_iter().map(JsValue::from).collect())
}
