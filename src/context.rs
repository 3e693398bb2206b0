//! Variable scopes for template subtrees.
//!
//! A [`Context`] is never changed once a binding pass starts using it.
//! Rescoping consumes a (cheap, shallow) copy and returns the new scope, so sibling branches can't observe each other.

use crate::value::{classify, Kind, Scalar};
use hashbrown::HashMap;
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::trace;

/// A single entry of a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound<'a> {
	/// Borrowed from the caller's data.
	Data(&'a Value),
	/// The position of the current item, injected by a sequence binding with an index attribute.
	Index(usize),
}

impl<'a> Bound<'a> {
	#[must_use]
	pub fn kind(self) -> Kind<'a> {
		match self {
			Self::Data(value) => classify(value),
			Self::Index(i) => Kind::Scalar(Scalar::Index(i)),
		}
	}
}

/// The current variable-resolution scope.
#[derive(Debug, Clone, Default)]
pub struct Context<'a> {
	entries: HashMap<Cow<'a, str>, Bound<'a>>,
}

impl<'a> Context<'a> {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The top-level keys of `data`. Anything but an object gives an empty scope.
	#[must_use]
	pub fn from_value(data: &'a Value) -> Self {
		match data {
			Value::Object(map) => Self::new().merge(map),
			other => {
				trace!("Binding non-object data {:?} as an empty context.", other);
				Self::new()
			}
		}
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<Bound<'a>> {
		self.entries.get(key).copied()
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drops `key`, typically the binding name that was just consumed.
	#[must_use]
	pub fn without(mut self, key: &str) -> Self {
		self.entries.remove(key);
		self
	}

	/// Shallow overlay: entries of `map` replace existing ones with the same key.
	#[must_use]
	pub fn merge(mut self, map: &'a Map<String, Value>) -> Self {
		self.entries.extend(map.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), Bound::Data(value))));
		self
	}

	#[must_use]
	pub fn with(mut self, key: impl Into<Cow<'a, str>>, value: Bound<'a>) -> Self {
		self.entries.insert(key.into(), value);
		self
	}
}
