//! Static serialization of a head state.
//!
//! [`serialize`] renders a [`HeadState`] without any rendering surface. Each
//! part of the result has two forms:
//!
//! - its [`Display`](std::fmt::Display) implementation, the text spliced into
//!   a server-rendered page;
//! - `to_component()`, neutral [`TagDescriptor`]s for a rendering layer.
//!
//! Every managed element carries the marker attribute so that a live surface
//! can take the nodes over after hydration. The root element is not marked.
//!
//! The text format is deterministic and stable, so it is safe to snapshot.

use std::fmt;

use crate::config::HeadConfig;
use crate::descriptor::TagDescriptor;
use crate::state::HeadState;
use crate::tag::{Attributes, Tag, TagKind};
use crate::util::encode_special_characters;

/// The serialized `<title>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePart {
	title: String,
	attributes: Attributes,
	marker: String,
	encode: bool,
}

impl TitlePart {
	/// Returns the `<title>` descriptor. The title text is left unescaped.
	pub fn to_component(&self) -> Vec<TagDescriptor> {
		let mut descriptor = TagDescriptor::new("title");
		descriptor
			.attributes
			.insert(self.marker.clone(), Some("true".to_string()));
		for (name, value) in &self.attributes {
			descriptor.attributes.insert(name.clone(), value.clone());
		}
		descriptor.inner_html = Some(self.title.clone());
		vec![descriptor]
	}
}

impl fmt::Display for TitlePart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("<title")?;
		if !self.attributes.is_empty() {
			write!(f, " {}", attribute_string(&self.attributes, self.encode))?;
		}
		write!(
			f,
			" {}=\"true\">{}</title>",
			self.marker,
			encode_special_characters(&self.title, self.encode)
		)
	}
}

/// The serialized root element attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributesPart {
	attributes: Attributes,
	encode: bool,
}

impl AttributesPart {
	/// Returns the attribute map for a rendering layer.
	pub fn to_component(&self) -> Attributes {
		self.attributes.clone()
	}
}

impl fmt::Display for AttributesPart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&attribute_string(&self.attributes, self.encode))
	}
}

/// The serialized tags of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagListPart {
	kind: TagKind,
	tags: Vec<Tag>,
	marker: String,
	encode: bool,
}

impl TagListPart {
	/// The kind of tags in this part.
	pub fn kind(&self) -> TagKind {
		self.kind
	}

	/// Returns `true` if the part holds no tags.
	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	/// Returns one marker-tagged descriptor per tag.
	pub fn to_component(&self) -> Vec<TagDescriptor> {
		self.tags
			.iter()
			.map(|tag| TagDescriptor::managed(tag, &self.marker))
			.collect()
	}
}

impl fmt::Display for TagListPart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = self.kind.as_str();
		for tag in &self.tags {
			write!(
				f,
				"<{} {}=\"true\" {}",
				name,
				self.marker,
				attribute_string(&tag.attributes, self.encode)
			)?;
			if self.kind.is_self_closing() {
				f.write_str("/>")?;
			} else {
				write!(f, ">{}</{}>", tag.inner_html.as_deref().unwrap_or(""), name)?;
			}
		}
		Ok(())
	}
}

/// Serialized output for every part of a head state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedHead {
	/// `<title>` element.
	pub title: TitlePart,
	/// Root element attributes.
	pub html_attributes: AttributesPart,
	/// `<base>` tags.
	pub base: TagListPart,
	/// `<link>` tags.
	pub link: TagListPart,
	/// `<meta>` tags.
	pub meta: TagListPart,
	/// `<noscript>` tags.
	pub noscript: TagListPart,
	/// `<script>` tags.
	pub script: TagListPart,
	/// `<style>` tags.
	pub style: TagListPart,
}

impl SerializedHead {
	/// Returns the part for one tag kind.
	pub fn part(&self, kind: TagKind) -> &TagListPart {
		match kind {
			TagKind::Base => &self.base,
			TagKind::Link => &self.link,
			TagKind::Meta => &self.meta,
			TagKind::Noscript => &self.noscript,
			TagKind::Script => &self.script,
			TagKind::Style => &self.style,
		}
	}

	/// Concatenates the title and every non-empty tag part, one per line, in
	/// reconciliation order.
	pub fn to_head_html(&self) -> String {
		let mut html = self.title.to_string();
		for kind in TagKind::ALL {
			let part = self.part(kind);
			if !part.is_empty() {
				html.push('\n');
				html.push_str(&part.to_string());
			}
		}
		html
	}
}

/// Serializes a head state.
///
/// # Example
///
/// ```
/// use reinhardt_head_core::config::HeadConfig;
/// use reinhardt_head_core::declaration::FragmentDeclaration;
/// use reinhardt_head_core::reducer::reduce;
/// use reinhardt_head_core::serializer::serialize;
/// use reinhardt_head_core::tag::Tag;
///
/// let config = HeadConfig::default().marker_attribute("data-head");
/// let page = FragmentDeclaration::new()
///     .title("Home")
///     .meta(Tag::meta("description", "Welcome"));
///
/// let head = serialize(&reduce([&page], &config), &config);
/// assert_eq!(head.title.to_string(), "<title data-head=\"true\">Home</title>");
/// assert_eq!(
///     head.meta.to_string(),
///     "<meta data-head=\"true\" name=\"description\" content=\"Welcome\"/>"
/// );
/// ```
pub fn serialize(state: &HeadState, config: &HeadConfig) -> SerializedHead {
	let marker = &config.marker_attribute;
	let encode = state.encode_special_characters;
	let list = |kind: TagKind| TagListPart {
		kind,
		tags: state.tags(kind).to_vec(),
		marker: marker.clone(),
		encode,
	};

	SerializedHead {
		title: TitlePart {
			title: state.title.clone(),
			attributes: state.title_attributes.clone(),
			marker: marker.clone(),
			encode,
		},
		html_attributes: AttributesPart {
			attributes: state.html_attributes.clone(),
			encode,
		},
		base: list(TagKind::Base),
		link: list(TagKind::Link),
		meta: list(TagKind::Meta),
		noscript: list(TagKind::Noscript),
		script: list(TagKind::Script),
		style: list(TagKind::Style),
	}
}

/// Renders `name="value"` pairs separated by spaces; valueless attributes
/// render as the bare name.
fn attribute_string(attributes: &Attributes, encode: bool) -> String {
	let mut rendered = String::new();
	for (name, value) in attributes {
		if !rendered.is_empty() {
			rendered.push(' ');
		}
		rendered.push_str(name);
		if let Some(value) = value {
			rendered.push_str("=\"");
			rendered.push_str(&encode_special_characters(value, encode));
			rendered.push('"');
		}
	}
	rendered
}
