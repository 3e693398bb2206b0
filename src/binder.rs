//! The recursive binding walk.
//!
//! Each element's binding names are looked up in the current [`Context`] and dispatched by the [`Kind`] of the bound value:
//!
//! - scalars are written to the element's targets,
//! - maps rescope the context and re-apply it to the element,
//! - sequences either rebind under the element's member name or fan the element out into one clone per item.
//!
//! Fan-outs are reported as lists of replacement nodes. Whoever walks the parent splices them in.

use crate::{
	config::Config,
	context::{Bound, Context},
	dom::{splice, Element},
	mapping::{classes_of, DataMap, Target, TargetKind},
	value::{classify, Kind, Scalar},
};
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::{instrument, trace, trace_span};

/// What stands where a template stood after binding, if not the template itself.
type Replacement<E> = Option<Vec<E>>;

#[derive(Debug)]
pub(crate) struct Binder<'c> {
	config: &'c Config,
	default_targets: Vec<Target>,
}

impl<'c> Binder<'c> {
	pub(crate) fn new(config: &'c Config) -> Self {
		Self {
			config,
			default_targets: config.default_map_target.iter().map(|target| Target::parse(target)).collect(),
		}
	}

	/// Binds `data` to each of `templates`, splicing fan-outs into the tree where there is one.
	///
	/// Returns the elements standing in place of the templates, in order.
	pub(crate) fn apply<'a, E: Element>(&self, templates: &[E], data: &Context<'a>) -> Vec<E> {
		let mut applied = Vec::with_capacity(templates.len());
		for template in templates {
			match self.apply_element(template, data) {
				Some(replacements) => {
					splice(template, &replacements);
					applied.extend(replacements);
				}
				None => applied.push(template.clone()),
			}
		}
		applied
	}

	#[instrument(level = "trace", skip(self, template, data))]
	fn apply_element<'a, E: Element>(&self, template: &E, data: &Context<'a>) -> Replacement<E> {
		let mut structural = false;
		let mut replacement = None;
		for class_name in classes_of(template, &self.config.class_attr) {
			let bound = match data.get(&class_name) {
				Some(bound) => bound,
				None => {
					trace!("{:?} is unbound here.", class_name);
					continue;
				}
			};
			let outcome = match bound.kind() {
				Kind::Map(map) => {
					structural = true;
					self.bind_map(template, &class_name, map, data)
				}
				Kind::Sequence(items) => {
					structural = true;
					self.bind_sequence(template, &class_name, bound, items, data)
				}
				Kind::Scalar(scalar) => {
					self.bind_scalar(template, &class_name, scalar);
					None
				}
			};
			// Once replaced, the template is out of the tree and later fan-outs of it have nowhere to go.
			if replacement.is_none() {
				replacement = outcome;
			}
		}

		if !structural {
			self.apply_children(template, data);
		}
		replacement
	}

	fn apply_children<'a, E: Element>(&self, template: &E, data: &Context<'a>) {
		for child in template.children() {
			if let Some(replacements) = self.apply_element(&child, data) {
				splice(&child, &replacements);
			}
		}
	}

	/// Writes the map's nested scalars to the template's own targets, then re-applies the template
	/// with `class_name` replaced by the map's entries.
	#[instrument(level = "trace", skip(self, template, map, data))]
	fn bind_map<'a, E: Element>(&self, template: &E, class_name: &str, map: &'a Map<String, Value>, data: &Context<'a>) -> Replacement<E> {
		let data_map = self.data_map(template);
		self.map_hash_values(template, &data_map, class_name, map);

		let scoped = data.clone().without(class_name).merge(map);

		// Not just the children: the template's own class list is scanned again under `scoped`.
		// Other names on it that are still (or newly) bound apply a second time.
		self.apply_element(template, &scoped)
	}

	fn map_hash_values<E: Element>(&self, template: &E, data_map: &Option<DataMap>, chain: &str, map: &Map<String, Value>) {
		for (key, value) in map {
			let chain = format!("{}.{}", chain, key);
			match classify(value) {
				Kind::Map(nested) => self.map_hash_values(template, data_map, &chain, nested),
				Kind::Sequence(_) => trace!("Sequences can't be mapped to targets; skipping {:?}.", chain),
				Kind::Scalar(scalar) => {
					for target in self.targets(data_map, &chain) {
						write_target(template, target, scalar);
					}
				}
			}
		}
	}

	#[instrument(level = "trace", skip(self, template, bound, items, data), fields(items.len = items.len()))]
	fn bind_sequence<'a, E: Element>(&self, template: &E, class_name: &str, bound: Bound<'a>, items: &'a [Value], data: &Context<'a>) -> Replacement<E> {
		match template.attribute(&self.config.member_attr).filter(|member| !member.is_empty()) {
			Some(member) => {
				trace!("Rebinding as {:?}.", member);
				let scoped = data.clone().without(class_name).with(member, bound);
				self.apply_element(template, &scoped)
			}
			None => Some(self.expand_sequence(template, class_name, items, data)),
		}
	}

	/// Exactly one bound clone of `template` per item, in order. The template itself is left alone.
	fn expand_sequence<'a, E: Element>(&self, template: &E, class_name: &str, items: &'a [Value], data: &Context<'a>) -> Vec<E> {
		let index_name = template.attribute(&self.config.index_attr).filter(|index| !index.is_empty());
		let mut clones = Vec::with_capacity(items.len());
		for (i, item) in items.iter().enumerate() {
			let span = trace_span!("Binding sequence item", i);
			let _enter = span.enter();

			let scoped = match &index_name {
				Some(index_name) => data.clone().with(index_name.clone(), Bound::Index(i)),
				None => data.clone(),
			};

			let clone = template.deep_clone();
			// The clone is detached while it is bound, so fan-outs of the clone itself have nowhere to go.
			let _ = match classify(item) {
				Kind::Map(map) => self.bind_map(&clone, class_name, map, &scoped),
				Kind::Sequence(nested) => self.bind_sequence(&clone, class_name, Bound::Data(item), nested, &scoped),
				Kind::Scalar(scalar) => {
					self.bind_scalar(&clone, class_name, scalar);
					None
				}
			};
			clones.push(clone);
		}
		clones
	}

	#[instrument(level = "trace", skip(self, template))]
	fn bind_scalar<E: Element>(&self, template: &E, class_name: &str, scalar: Scalar<'_>) {
		let data_map = self.data_map(template);
		for target in self.targets(&data_map, class_name) {
			write_target(template, target, scalar);
		}
	}

	fn data_map<E: Element>(&self, template: &E) -> Option<DataMap> {
		template.attribute(&self.config.map_attr).map(|map| DataMap::parse(&map))
	}

	/// The explicitly mapped targets for `name`, or the configured defaults.
	fn targets<'t>(&'t self, data_map: &'t Option<DataMap>, name: &str) -> &'t [Target] {
		data_map.as_ref().and_then(|data_map| data_map.targets(name)).unwrap_or(&self.default_targets)
	}
}

fn write_target<E: Element>(template: &E, target: &Target, scalar: Scalar<'_>) {
	let content = match &target.pattern {
		Some(pattern) => {
			let replacement = if scalar.is_null() { Cow::Borrowed("null") } else { scalar.to_text() };
			Cow::Owned(substitute(&read_target(template, &target.kind), pattern, &replacement))
		}
		None => scalar.to_text(),
	};
	match &target.kind {
		TargetKind::Text => template.set_text(&content),
		TargetKind::Html => template.set_inner_html(&content),
		TargetKind::Discard => (),
		TargetKind::Attribute(name) if scalar.is_null() && target.pattern.is_none() => template.remove_attribute(name),
		TargetKind::Attribute(name) => template.set_attribute(name, &content),
	}
}

/// Replaces the first occurrence of `pattern` in `base`.
///
/// `$$`, `$&`, `` $` `` and `$'` in `replacement` expand to `$`, the match, the text before it and the text after it.
fn substitute(base: &str, pattern: &str, replacement: &str) -> String {
	let start = match base.find(pattern) {
		Some(start) => start,
		None => return base.to_owned(),
	};
	let end = start + pattern.len();

	let mut substituted = String::with_capacity(base.len() + replacement.len());
	substituted.push_str(&base[..start]);
	let mut chars = replacement.chars().peekable();
	while let Some(c) = chars.next() {
		let expansion = match (c, chars.peek()) {
			('$', Some('$')) => "$",
			('$', Some('&')) => pattern,
			('$', Some('`')) => &base[..start],
			('$', Some('\'')) => &base[end..],
			_ => {
				substituted.push(c);
				continue;
			}
		};
		chars.next();
		substituted.push_str(expansion);
	}
	substituted.push_str(&base[end..]);
	substituted
}

fn read_target<E: Element>(template: &E, kind: &TargetKind) -> String {
	match kind {
		TargetKind::Text => template.text(),
		TargetKind::Html => template.inner_html(),
		TargetKind::Discard => String::new(),
		TargetKind::Attribute(name) => template.attribute(name).unwrap_or_default(),
	}
}
