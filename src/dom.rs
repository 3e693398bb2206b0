//! The operations the binder needs from a markup tree.
//!
//! Implementations are handles: cloning one with [`Clone`] must refer to the same node,
//! while [`Element::deep_clone`] creates an independent copy.

pub trait Element: Clone {
	fn attribute(&self, name: &str) -> Option<String>;
	fn set_attribute(&self, name: &str, value: &str);
	fn remove_attribute(&self, name: &str);

	/// The concatenated text of all descendants.
	fn text(&self) -> String;
	/// Replaces all children with a single text node.
	fn set_text(&self, text: &str);

	fn inner_html(&self) -> String;
	fn set_inner_html(&self, html: &str);

	/// A snapshot of the direct element children, in tree order.
	fn children(&self) -> Vec<Self>;

	/// A detached copy of this element and its whole subtree.
	#[must_use]
	fn deep_clone(&self) -> Self;

	/// Inserts `node` as the previous sibling of `self`. Does nothing if `self` has no parent.
	fn insert_before(&self, node: &Self);

	/// Detaches `self` from its parent, if any.
	fn remove(&self);
}

/// Puts `replacements` where `original` stands and detaches `original`.
pub fn splice<E: Element>(original: &E, replacements: &[E]) {
	for replacement in replacements {
		original.insert_before(replacement);
	}
	original.remove();
}
