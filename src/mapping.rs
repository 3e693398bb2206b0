//! The attribute mini-languages: class lists, `data-map` tables and `target[pattern]` substitutions.

use crate::dom::Element;
use tracing::warn;

/// The binding names on `element`, in attribute order. Empty if the attribute is missing or blank.
pub fn classes_of<E: Element>(element: &E, class_attr: &str) -> Vec<String> {
	element
		.attribute(class_attr)
		.map(|classes| classes.split_whitespace().map(str::to_owned).collect())
		.unwrap_or_default()
}

/// Where a scalar is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
	/// The element's text content.
	Text,
	/// The element's inner markup.
	Html,
	/// Nowhere.
	Discard,
	Attribute(String),
}

/// A parsed target, optionally with a substitution pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
	pub kind: TargetKind,
	/// If set, only the first occurrence of this text within the target's current content is replaced.
	/// `$$`, `$&`, `` $` `` and `$'` in the written value are expanded, and `null` is written as `"null"`.
	pub pattern: Option<String>,
}

impl Target {
	/// Parses `name` or `name[pattern]`.
	///
	/// Anything that doesn't have exactly that shape (non-empty name without `[`, non-empty pattern without `]`)
	/// is taken as a plain target name in its entirety.
	#[must_use]
	pub fn parse(target: &str) -> Self {
		let substitution = target.strip_suffix(']').and_then(|rest| rest.split_once('[')).filter(|(name, pattern)| {
			!name.is_empty() && !pattern.is_empty() && !pattern.contains(']')
		});
		match substitution {
			Some((name, pattern)) => Self {
				kind: TargetKind::from_name(name),
				pattern: Some(pattern.to_owned()),
			},
			None => Self {
				kind: TargetKind::from_name(target),
				pattern: None,
			},
		}
	}
}

impl TargetKind {
	fn from_name(name: &str) -> Self {
		match name {
			"text" => Self::Text,
			"html" => Self::Html,
			"none" => Self::Discard,
			attribute => Self::Attribute(attribute.to_owned()),
		}
	}
}

/// A parsed `data-map` attribute: binding name (or dotted chain) to its ordered targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMap {
	entries: Vec<(String, Vec<Target>)>,
}

impl DataMap {
	/// Parses `name:target,target;name2:target`.
	///
	/// Only the attribute as a whole is trimmed. Malformed entries are logged and left out,
	/// so lookups for them fall back to the default targets.
	#[must_use]
	pub fn parse(map: &str) -> Self {
		let mut entries: Vec<(String, Vec<Target>)> = Vec::new();
		for entry in map.trim().split(';') {
			let (name, targets) = match entry.split_once(':') {
				Some(split) => split,
				None => {
					if !entry.is_empty() {
						warn!("Ignoring malformed map entry {:?} (expected `name:target,…`)", entry);
					}
					continue;
				}
			};
			let targets: Vec<Target> = targets
				.split(',')
				.filter(|target| {
					if target.is_empty() {
						warn!("Ignoring empty target in map entry {:?}", entry);
					}
					!target.is_empty()
				})
				.map(Target::parse)
				.collect();
			if targets.is_empty() {
				warn!("Ignoring map entry {:?} without targets", entry);
				continue;
			}
			entries.push((name.to_owned(), targets));
		}
		Self { entries }
	}

	/// The targets of the first entry named exactly `name`.
	#[must_use]
	pub fn targets(&self, name: &str) -> Option<&[Target]> {
		self.entries.iter().find(|(entry, _)| entry == name).map(|(_, targets)| targets.as_slice())
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
