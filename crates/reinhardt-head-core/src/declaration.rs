//! Fragment declarations.
//!
//! A [`FragmentDeclaration`] is one source's desired head content. Every
//! field is optional; the reducer decides what the merged result looks like.
//! Declarations are either built in code or parsed from the JSON document
//! produced by a rendering layer.
//!
//! ## Example
//!
//! ```
//! use reinhardt_head_core::declaration::FragmentDeclaration;
//! use reinhardt_head_core::tag::Tag;
//!
//! let page = FragmentDeclaration::new()
//!     .title("About")
//!     .title_template("%s | Example")
//!     .html_attribute("lang", "en")
//!     .meta(Tag::meta("description", "About us"))
//!     .link(Tag::stylesheet("/static/site.css"));
//!
//! assert_eq!(page.title.as_deref(), Some("About"));
//! assert_eq!(page.meta.len(), 1);
//! ```
//!
//! ## JSON form
//!
//! Keys are camelCase (`titleTemplate`, `htmlAttributes`, ...). Parsing is
//! lenient: a field with the wrong shape is reported through `tracing` and
//! treated as absent, so one malformed field never discards the rest of the
//! declaration.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::HeadResult;
use crate::state::{ClientStateCallback, HeadState, TagChanges};
use crate::tag::{Attributes, Tag, TagKind};

/// Key under which a rendering layer reports nested declarations.
const CHILDREN_KEY: &str = "children";

/// One fragment's desired head content.
#[derive(Clone, Default)]
pub struct FragmentDeclaration {
	/// Page title.
	pub title: Option<String>,
	/// Title template; every `%s` is replaced with the resolved title.
	pub title_template: Option<String>,
	/// Title used when no declaration sets `title`.
	pub default_title: Option<String>,
	/// Attributes of the `<title>` element.
	pub title_attributes: Option<Attributes>,
	/// Attributes of the root `<html>` element.
	pub html_attributes: Option<Attributes>,
	/// `<base>` tag.
	pub base: Option<Tag>,
	/// `<meta>` tags.
	pub meta: Vec<Tag>,
	/// `<link>` tags.
	pub link: Vec<Tag>,
	/// `<script>` tags.
	pub script: Vec<Tag>,
	/// `<noscript>` tags.
	pub noscript: Vec<Tag>,
	/// `<style>` tags.
	pub style: Vec<Tag>,
	/// Escaping override. `None` falls back to the configuration.
	pub encode_special_characters: Option<bool>,
	/// Batching override. `None` falls back to the configuration.
	pub defer: Option<bool>,
	/// Change callback.
	pub on_change_client_state: Option<ClientStateCallback>,
}

impl FragmentDeclaration {
	/// Creates an empty declaration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Sets the title template.
	pub fn title_template(mut self, template: impl Into<String>) -> Self {
		self.title_template = Some(template.into());
		self
	}

	/// Sets the default title.
	pub fn default_title(mut self, title: impl Into<String>) -> Self {
		self.default_title = Some(title.into());
		self
	}

	/// Adds an attribute to the `<title>` element.
	pub fn title_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.title_attributes
			.get_or_insert_with(Attributes::new)
			.insert(name.into(), Some(value.into()));
		self
	}

	/// Adds an attribute to the root element.
	pub fn html_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.html_attributes
			.get_or_insert_with(Attributes::new)
			.insert(name.into(), Some(value.into()));
		self
	}

	/// Adds a valueless attribute to the root element.
	pub fn html_flag(mut self, name: impl Into<String>) -> Self {
		self.html_attributes
			.get_or_insert_with(Attributes::new)
			.insert(name.into(), None);
		self
	}

	/// Replaces the root element attributes.
	pub fn html_attributes(mut self, attributes: Attributes) -> Self {
		self.html_attributes = Some(attributes);
		self
	}

	/// Sets the `<base>` tag.
	pub fn base(mut self, tag: Tag) -> Self {
		self.base = Some(tag);
		self
	}

	/// Adds a `<meta>` tag.
	pub fn meta(mut self, tag: Tag) -> Self {
		self.meta.push(tag);
		self
	}

	/// Adds a `<link>` tag.
	pub fn link(mut self, tag: Tag) -> Self {
		self.link.push(tag);
		self
	}

	/// Adds a `<script>` tag.
	pub fn script(mut self, tag: Tag) -> Self {
		self.script.push(tag);
		self
	}

	/// Adds a `<noscript>` tag.
	pub fn noscript(mut self, tag: Tag) -> Self {
		self.noscript.push(tag);
		self
	}

	/// Adds a `<style>` tag.
	pub fn style(mut self, tag: Tag) -> Self {
		self.style.push(tag);
		self
	}

	/// Adds a tag to the list matching its kind. A base tag replaces the
	/// current one.
	pub fn tag(self, tag: Tag) -> Self {
		match tag.kind {
			TagKind::Base => self.base(tag),
			TagKind::Link => self.link(tag),
			TagKind::Meta => self.meta(tag),
			TagKind::Noscript => self.noscript(tag),
			TagKind::Script => self.script(tag),
			TagKind::Style => self.style(tag),
		}
	}

	/// Sets the escaping override.
	pub fn encode_special_characters(mut self, encode: bool) -> Self {
		self.encode_special_characters = Some(encode);
		self
	}

	/// Sets the batching override.
	pub fn defer(mut self, defer: bool) -> Self {
		self.defer = Some(defer);
		self
	}

	/// Sets the change callback.
	pub fn on_change_client_state<F>(mut self, callback: F) -> Self
	where
		F: Fn(&HeadState, &TagChanges, &TagChanges) + 'static,
	{
		self.on_change_client_state = Some(Arc::new(callback));
		self
	}

	/// Returns the declared tags of one kind.
	pub fn tags(&self, kind: TagKind) -> &[Tag] {
		match kind {
			TagKind::Base => self.base.as_slice(),
			TagKind::Link => &self.link,
			TagKind::Meta => &self.meta,
			TagKind::Noscript => &self.noscript,
			TagKind::Script => &self.script,
			TagKind::Style => &self.style,
		}
	}

	/// Parses a JSON declaration document.
	///
	/// Only syntactically invalid JSON is an error; shape problems inside the
	/// document degrade as described in [`FragmentDeclaration::from_json_value`].
	pub fn from_json_str(source: &str) -> HeadResult<Self> {
		let value: Value = serde_json::from_str(source)?;
		Ok(Self::from_json_value(&value))
	}

	/// Builds a declaration from a JSON value.
	///
	/// Fields with an unexpected shape are logged and treated as absent.
	/// A `children` entry describes nested declarations, which are not
	/// supported; it is logged and ignored. Unknown keys are ignored.
	pub fn from_json_value(value: &Value) -> Self {
		let Some(object) = value.as_object() else {
			malformed("declaration", "an object", value);
			return Self::default();
		};

		let mut declaration = Self::default();
		for (key, value) in object {
			match key.as_str() {
				"title" => declaration.title = text_field(key, value),
				"titleTemplate" => declaration.title_template = text_field(key, value),
				"defaultTitle" => declaration.default_title = text_field(key, value),
				"titleAttributes" => declaration.title_attributes = attributes_field(key, value),
				"htmlAttributes" => declaration.html_attributes = attributes_field(key, value),
				"encodeSpecialCharacters" => {
					declaration.encode_special_characters = bool_field(key, value)
				}
				"defer" => declaration.defer = bool_field(key, value),
				"base" => declaration.base = base_field(value),
				CHILDREN_KEY => {
					tracing::warn!(
						"Nested head declarations are not supported; \
						 the nested content is ignored and the enclosing declaration wins"
					);
				}
				other => match TagKind::from_name(other) {
					Some(kind) if kind.as_str() == other => {
						let tags = list_field(kind, value);
						match kind {
							TagKind::Link => declaration.link = tags,
							TagKind::Meta => declaration.meta = tags,
							TagKind::Noscript => declaration.noscript = tags,
							TagKind::Script => declaration.script = tags,
							TagKind::Style => declaration.style = tags,
							TagKind::Base => {}
						}
					}
					_ => tracing::trace!(key = %other, "ignoring unknown declaration key"),
				},
			}
		}
		declaration
	}
}

impl fmt::Debug for FragmentDeclaration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FragmentDeclaration")
			.field("title", &self.title)
			.field("title_template", &self.title_template)
			.field("default_title", &self.default_title)
			.field("title_attributes", &self.title_attributes)
			.field("html_attributes", &self.html_attributes)
			.field("base", &self.base)
			.field("meta", &self.meta)
			.field("link", &self.link)
			.field("script", &self.script)
			.field("noscript", &self.noscript)
			.field("style", &self.style)
			.field("encode_special_characters", &self.encode_special_characters)
			.field("defer", &self.defer)
			.field(
				"on_change_client_state",
				&self.on_change_client_state.as_ref().map(|_| "<callback>"),
			)
			.finish()
	}
}

/// Reports a field whose shape does not match the schema.
fn malformed(field: &str, expected: &str, value: &Value) {
	tracing::warn!(
		field = %field,
		expected = %expected,
		found = %json_type(value),
		"Malformed head declaration field; it is treated as absent"
	);
	tracing::error!(field = %field, value = %value, "Invalid head declaration shape");
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn text_field(field: &str, value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		other => {
			malformed(field, "a string", other);
			None
		}
	}
}

fn bool_field(field: &str, value: &Value) -> Option<bool> {
	match value {
		Value::Null => None,
		Value::Bool(flag) => Some(*flag),
		other => {
			malformed(field, "a boolean", other);
			None
		}
	}
}

fn attributes_field(field: &str, value: &Value) -> Option<Attributes> {
	match value {
		Value::Null => None,
		Value::Object(object) => Some(parse_attributes(field, object)),
		other => {
			malformed(field, "an object", other);
			None
		}
	}
}

fn base_field(value: &Value) -> Option<Tag> {
	match value {
		Value::Null => None,
		Value::Object(object) => Some(parse_tag(TagKind::Base, object)),
		other => {
			malformed("base", "an object", other);
			None
		}
	}
}

fn list_field(kind: TagKind, value: &Value) -> Vec<Tag> {
	match value {
		Value::Null => Vec::new(),
		Value::Array(items) => items
			.iter()
			.filter_map(|item| match item {
				Value::Object(object) => Some(parse_tag(kind, object)),
				other => {
					malformed(kind.as_str(), "a list of objects", other);
					None
				}
			})
			.collect(),
		other => {
			malformed(kind.as_str(), "a list", other);
			Vec::new()
		}
	}
}

fn parse_tag(kind: TagKind, object: &Map<String, Value>) -> Tag {
	let mut tag = Tag::new(kind);
	for (name, value) in object {
		if kind.content_key() == Some(name.as_str()) {
			tag.inner_html = text_field(name, value);
		} else if let Some(value) = attribute_value(kind.as_str(), name, value) {
			tag.attributes.insert(name.clone(), value);
		}
	}
	tag
}

fn parse_attributes(field: &str, object: &Map<String, Value>) -> Attributes {
	object
		.iter()
		.filter_map(|(name, value)| {
			attribute_value(field, name, value).map(|value| (name.clone(), value))
		})
		.collect()
}

/// Converts a JSON attribute value. The outer `None` means "skip".
fn attribute_value(field: &str, name: &str, value: &Value) -> Option<Option<String>> {
	match value {
		Value::Null => Some(None),
		Value::String(text) => Some(Some(text.clone())),
		Value::Number(number) => Some(Some(number.to_string())),
		Value::Bool(flag) => Some(Some(flag.to_string())),
		other => {
			tracing::warn!(
				field = %field,
				attribute = %name,
				found = %json_type(other),
				"Skipping attribute with a non-scalar value"
			);
			None
		}
	}
}
