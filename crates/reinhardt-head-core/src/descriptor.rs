//! Neutral tag descriptors.
//!
//! A [`TagDescriptor`] is a framework-independent description of one element:
//! the serializer hands them to rendering layers, rendering surfaces store
//! them, and change reports list them.

use serde::{Deserialize, Serialize};

use crate::tag::{Attributes, Tag};

/// A neutral element description: `{tag, attributes, inner_html}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
	/// Element name.
	pub tag: String,
	/// Attributes in order, including the marker attribute when managed.
	pub attributes: Attributes,
	/// Raw inner markup.
	pub inner_html: Option<String>,
}

impl TagDescriptor {
	/// Creates an empty descriptor.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: Attributes::new(),
			inner_html: None,
		}
	}

	/// Builds the managed form of a tag: marker attribute first, then the
	/// tag's own attributes.
	pub fn managed(tag: &Tag, marker: &str) -> Self {
		let mut attributes = Attributes::with_capacity(tag.attributes.len() + 1);
		attributes.insert(marker.to_string(), Some("true".to_string()));
		for (name, value) in &tag.attributes {
			attributes.insert(name.clone(), value.clone());
		}
		Self {
			tag: tag.kind.as_str().to_string(),
			attributes,
			inner_html: tag.inner_html.clone(),
		}
	}

	/// Returns an attribute value; valueless attributes read as `""`.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.get(name)
			.map(|value| value.as_deref().unwrap_or(""))
	}

	/// Returns `true` if the descriptor carries the attribute.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attributes.contains_key(name)
	}

	/// Structural node equality, as a live document compares nodes.
	///
	/// Tag names compare case-insensitively, attributes as an unordered set
	/// with valueless attributes equal to empty ones, and absent content
	/// equal to empty content.
	pub fn is_equal_node(&self, other: &TagDescriptor) -> bool {
		if !self.tag.eq_ignore_ascii_case(&other.tag) {
			return false;
		}
		if self.attributes.len() != other.attributes.len() {
			return false;
		}
		let attributes_match = self
			.attributes
			.keys()
			.all(|name| other.attribute(name) == self.attribute(name));
		attributes_match
			&& self.inner_html.as_deref().unwrap_or("") == other.inner_html.as_deref().unwrap_or("")
	}
}
