//! Classification of bound data into the three shapes the binder distinguishes.

use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// The shape of a bound value, which decides how it is applied to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind<'a> {
	/// Written to targets.
	Scalar(Scalar<'a>),
	/// Rescopes the context for the element and its descendants.
	Map(&'a Map<String, Value>),
	/// Repeats the element once per item.
	Sequence(&'a [Value]),
}

/// Anything that is neither a [`Map`] nor a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
	Null,
	Bool(bool),
	Number(&'a Number),
	Text(&'a str),
	/// A sequence position injected through the index attribute.
	Index(usize),
}

/// Classifies `value`. Only objects are maps and only arrays are sequences.
#[must_use]
pub fn classify(value: &Value) -> Kind<'_> {
	match value {
		Value::Object(map) => Kind::Map(map),
		Value::Array(items) => Kind::Sequence(items),
		Value::Null => Kind::Scalar(Scalar::Null),
		Value::Bool(b) => Kind::Scalar(Scalar::Bool(*b)),
		Value::Number(n) => Kind::Scalar(Scalar::Number(n)),
		Value::String(s) => Kind::Scalar(Scalar::Text(s)),
	}
}

impl<'a> Scalar<'a> {
	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// The text written into a target.
	///
	/// Numbers are formatted the way a browser would stringify them, so `1.0` becomes `"1"`.
	/// `null` becomes the empty string.
	#[must_use]
	pub fn to_text(&self) -> Cow<'a, str> {
		match *self {
			Self::Null => Cow::Borrowed(""),
			Self::Bool(true) => Cow::Borrowed("true"),
			Self::Bool(false) => Cow::Borrowed("false"),
			Self::Number(n) => Cow::Owned(number_text(n)),
			Self::Text(s) => Cow::Borrowed(s),
			Self::Index(i) => Cow::Owned(i.to_string()),
		}
	}
}

#[allow(clippy::float_cmp)]
fn number_text(n: &Number) -> String {
	match n.as_f64() {
		Some(f) if n.is_f64() && f.is_finite() && f.trunc() == f && f.abs() < 1e21 => {
			if f == 0.0 {
				"0".to_owned()
			} else {
				format!("{:.0}", f)
			}
		}
		_ => n.to_string(),
	}
}

/// Number of entries in a map or sequence, or of characters in a string. Other scalars count as `0`.
#[must_use]
pub fn size_of(value: &Value) -> usize {
	match value {
		Value::Object(map) => map.len(),
		Value::Array(items) => items.len(),
		Value::String(s) => s.chars().count(),
		Value::Null | Value::Bool(_) | Value::Number(_) => 0,
	}
}

/// `null`, `""`, or an empty map or sequence.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
	match classify(value) {
		Kind::Scalar(Scalar::Null) | Kind::Scalar(Scalar::Text("")) => true,
		Kind::Scalar(_) => false,
		Kind::Map(_) | Kind::Sequence(_) => size_of(value) == 0,
	}
}

#[must_use]
pub fn is_present(value: &Value) -> bool {
	!is_blank(value)
}
