//! Tag model for head fragments.
//!
//! A [`Tag`] is one `<base>`, `<link>`, `<meta>`, `<noscript>`, `<script>` or
//! `<style>` element requested by a fragment declaration. Attribute maps keep
//! declaration order because the serialized output reproduces it.
//!
//! ## Example
//!
//! ```
//! use reinhardt_head_core::tag::{Tag, TagKind};
//!
//! let description = Tag::meta("description", "A test page");
//! assert_eq!(description.kind, TagKind::Meta);
//! assert_eq!(description.get("content"), Some("A test page"));
//!
//! let script = Tag::script_src("/static/app.js").flag("defer");
//! assert_eq!(script.attributes.len(), 2);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered attribute map. A `None` value is a valueless attribute (`<script defer>`).
pub type Attributes = IndexMap<String, Option<String>>;

/// Declaration key holding the inner markup of `script` and `noscript` tags.
pub const INNER_HTML: &str = "innerHTML";

/// Declaration key holding the stylesheet text of `style` tags.
pub const CSS_TEXT: &str = "cssText";

/// The kinds of head tags managed as lists.
///
/// The variant order is the order in which kinds are reconciled and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
	/// `<base>`
	Base,
	/// `<link>`
	Link,
	/// `<meta>`
	Meta,
	/// `<noscript>`
	Noscript,
	/// `<script>`
	Script,
	/// `<style>`
	Style,
}

impl TagKind {
	/// All kinds, in reconciliation order.
	pub const ALL: [TagKind; 6] = [
		TagKind::Base,
		TagKind::Link,
		TagKind::Meta,
		TagKind::Noscript,
		TagKind::Script,
		TagKind::Style,
	];

	/// Returns the element name, which is also the declaration key.
	pub fn as_str(&self) -> &'static str {
		match self {
			TagKind::Base => "base",
			TagKind::Link => "link",
			TagKind::Meta => "meta",
			TagKind::Noscript => "noscript",
			TagKind::Script => "script",
			TagKind::Style => "style",
		}
	}

	/// Returns `true` for kinds serialized as `<kind .../>`.
	pub fn is_self_closing(&self) -> bool {
		matches!(self, TagKind::Base | TagKind::Link | TagKind::Meta)
	}

	/// Returns the declaration key whose value becomes the tag content, if any.
	pub fn content_key(&self) -> Option<&'static str> {
		match self {
			TagKind::Noscript | TagKind::Script => Some(INNER_HTML),
			TagKind::Style => Some(CSS_TEXT),
			TagKind::Base | TagKind::Link | TagKind::Meta => None,
		}
	}

	/// Parses an element name (case-insensitive).
	pub fn from_name(name: &str) -> Option<Self> {
		TagKind::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(name))
	}
}

impl fmt::Display for TagKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single head tag requested by a fragment declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	/// The element kind.
	pub kind: TagKind,
	/// Attributes in declaration order.
	pub attributes: Attributes,
	/// Raw inner markup (`innerHTML` / `cssText`). Never escaped.
	pub inner_html: Option<String>,
}

impl Tag {
	/// Creates an empty tag of the given kind.
	pub fn new(kind: TagKind) -> Self {
		Self {
			kind,
			attributes: Attributes::new(),
			inner_html: None,
		}
	}

	/// Adds an attribute with a value.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), Some(value.into()));
		self
	}

	/// Adds a valueless attribute.
	pub fn flag(mut self, name: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), None);
		self
	}

	/// Sets the inner markup.
	pub fn inner_html(mut self, content: impl Into<String>) -> Self {
		self.inner_html = Some(content.into());
		self
	}

	/// `<meta name="..." content="...">`
	pub fn meta(name: impl Into<String>, content: impl Into<String>) -> Self {
		Self::new(TagKind::Meta)
			.attr("name", name)
			.attr("content", content)
	}

	/// `<meta property="..." content="...">` (Open Graph style).
	pub fn meta_property(property: impl Into<String>, content: impl Into<String>) -> Self {
		Self::new(TagKind::Meta)
			.attr("property", property)
			.attr("content", content)
	}

	/// `<meta charset="...">`
	pub fn charset(charset: impl Into<String>) -> Self {
		Self::new(TagKind::Meta).attr("charset", charset)
	}

	/// `<link rel="..." href="...">`
	pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
		Self::new(TagKind::Link).attr("rel", rel).attr("href", href)
	}

	/// `<link rel="stylesheet" href="...">`
	pub fn stylesheet(href: impl Into<String>) -> Self {
		Self::link("stylesheet", href)
	}

	/// `<script src="...">`
	pub fn script_src(src: impl Into<String>) -> Self {
		Self::new(TagKind::Script).attr("src", src)
	}

	/// `<script>code</script>`
	pub fn inline_script(code: impl Into<String>) -> Self {
		Self::new(TagKind::Script).inner_html(code)
	}

	/// `<style>css</style>`
	pub fn style(css: impl Into<String>) -> Self {
		Self::new(TagKind::Style).inner_html(css)
	}

	/// `<noscript>markup</noscript>`
	pub fn noscript(markup: impl Into<String>) -> Self {
		Self::new(TagKind::Noscript).inner_html(markup)
	}

	/// `<base href="...">`
	pub fn base(href: impl Into<String>) -> Self {
		Self::new(TagKind::Base).attr("href", href)
	}

	/// Returns an attribute value by exact name. Valueless attributes yield `None`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).and_then(|value| value.as_deref())
	}

	/// Looks up an attribute with an ASCII case-insensitive name match.
	///
	/// The outer `Option` reports presence, the inner one the value.
	pub fn get_ignore_case(&self, name: &str) -> Option<Option<&str>> {
		self.attributes
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_deref())
	}
}
