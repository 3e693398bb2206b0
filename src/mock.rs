//! A minimal in-memory tree for exercising the binder without a browser.
//!
//! Markup assigned through [`Element::set_inner_html`] is kept verbatim and not parsed.

use crate::dom::Element;
use std::{
	cell::RefCell,
	fmt::Write as _,
	rc::{Rc, Weak},
};

#[derive(Debug, Clone)]
pub struct MockElement(Rc<RefCell<Inner>>);

#[derive(Debug)]
struct Inner {
	tag: String,
	attributes: Vec<(String, String)>,
	children: Vec<Child>,
	parent: Weak<RefCell<Inner>>,
}

#[derive(Debug)]
enum Child {
	Element(MockElement),
	Text(String),
	Raw(String),
}

impl MockElement {
	pub fn new(tag: &str) -> Self {
		Self(Rc::new(RefCell::new(Inner {
			tag: tag.to_owned(),
			attributes: Vec::new(),
			children: Vec::new(),
			parent: Weak::new(),
		})))
	}

	pub fn attr(self, name: &str, value: &str) -> Self {
		self.set_attribute(name, value);
		self
	}

	pub fn class(self, classes: &str) -> Self {
		self.attr("class", classes)
	}

	pub fn child(self, child: Self) -> Self {
		child.0.borrow_mut().parent = Rc::downgrade(&self.0);
		self.0.borrow_mut().children.push(Child::Element(child));
		self
	}

	pub fn text_child(self, text: &str) -> Self {
		self.0.borrow_mut().children.push(Child::Text(text.to_owned()));
		self
	}

	fn replace_children(&self, content: Child) {
		let previous = std::mem::replace(&mut self.0.borrow_mut().children, vec![content]);
		for child in previous {
			if let Child::Element(element) = child {
				element.0.borrow_mut().parent = Weak::new();
			}
		}
	}

	pub fn has_parent(&self) -> bool {
		self.0.borrow().parent.upgrade().is_some()
	}

	pub fn outer_html(&self) -> String {
		let inner = self.0.borrow();
		let mut html = format!("<{}", inner.tag);
		for (name, value) in &inner.attributes {
			write!(html, " {}=\"{}\"", name, escape(value).replace('"', "&quot;")).unwrap();
		}
		html.push('>');
		drop(inner);
		html.push_str(&self.inner_html());
		write!(html, "</{}>", self.0.borrow().tag).unwrap();
		html
	}
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

impl Element for MockElement {
	fn attribute(&self, name: &str) -> Option<String> {
		self.0.borrow().attributes.iter().find(|(n, _)| n == name).map(|(_, value)| value.clone())
	}

	fn set_attribute(&self, name: &str, value: &str) {
		let mut inner = self.0.borrow_mut();
		match inner.attributes.iter_mut().find(|(n, _)| n == name) {
			Some((_, existing)) => *existing = value.to_owned(),
			None => inner.attributes.push((name.to_owned(), value.to_owned())),
		}
	}

	fn remove_attribute(&self, name: &str) {
		self.0.borrow_mut().attributes.retain(|(n, _)| n != name);
	}

	fn text(&self) -> String {
		self.0
			.borrow()
			.children
			.iter()
			.map(|child| match child {
				Child::Element(element) => element.text(),
				Child::Text(text) | Child::Raw(text) => text.clone(),
			})
			.collect()
	}

	fn set_text(&self, text: &str) {
		self.replace_children(Child::Text(text.to_owned()));
	}

	fn inner_html(&self) -> String {
		self.0
			.borrow()
			.children
			.iter()
			.map(|child| match child {
				Child::Element(element) => element.outer_html(),
				Child::Text(text) => escape(text),
				Child::Raw(html) => html.clone(),
			})
			.collect()
	}

	fn set_inner_html(&self, html: &str) {
		self.replace_children(Child::Raw(html.to_owned()));
	}

	fn children(&self) -> Vec<Self> {
		self.0
			.borrow()
			.children
			.iter()
			.filter_map(|child| match child {
				Child::Element(element) => Some(element.clone()),
				Child::Text(_) | Child::Raw(_) => None,
			})
			.collect()
	}

	fn deep_clone(&self) -> Self {
		let inner = self.0.borrow();
		let clone = Self::new(&inner.tag);
		clone.0.borrow_mut().attributes = inner.attributes.clone();
		for child in &inner.children {
			match child {
				Child::Element(element) => {
					let element = element.deep_clone();
					element.0.borrow_mut().parent = Rc::downgrade(&clone.0);
					clone.0.borrow_mut().children.push(Child::Element(element));
				}
				Child::Text(text) => clone.0.borrow_mut().children.push(Child::Text(text.clone())),
				Child::Raw(html) => clone.0.borrow_mut().children.push(Child::Raw(html.clone())),
			}
		}
		clone
	}

	fn insert_before(&self, node: &Self) {
		let parent = match self.0.borrow().parent.upgrade() {
			Some(parent) => parent,
			None => return,
		};
		node.remove();
		let mut parent_inner = parent.borrow_mut();
		let position = parent_inner
			.children
			.iter()
			.position(|child| matches!(child, Child::Element(element) if Rc::ptr_eq(&element.0, &self.0)))
			.expect("mock tree out of sync with parent pointer");
		parent_inner.children.insert(position, Child::Element(node.clone()));
		node.0.borrow_mut().parent = Rc::downgrade(&parent);
	}

	fn remove(&self) {
		let parent = self.0.borrow().parent.upgrade();
		if let Some(parent) = parent {
			parent
				.borrow_mut()
				.children
				.retain(|child| !matches!(child, Child::Element(element) if Rc::ptr_eq(&element.0, &self.0)));
			self.0.borrow_mut().parent = Weak::new();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splicing() {
		let item = MockElement::new("li").text_child("a");
		let list = MockElement::new("ul").child(item.clone());
		let first = item.deep_clone();
		first.set_text("1");
		let second = item.deep_clone();
		second.set_text("2");

		crate::dom::splice(&item, &[first.clone(), second]);

		assert_eq!(list.outer_html(), "<ul><li>1</li><li>2</li></ul>");
		assert!(!item.has_parent());
		assert!(first.has_parent());
	}

	#[test]
	fn detached_insertion_is_ignored() {
		let detached = MockElement::new("p");
		detached.insert_before(&MockElement::new("b"));
		detached.remove();
		assert_eq!(detached.outer_html(), "<p></p>");
	}
}
