//! The canonical head state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::TagDescriptor;
use crate::tag::{Attributes, Tag, TagKind};

/// Tags added or removed by one reconciliation, keyed by kind.
///
/// Kinds without changes are absent from the map.
pub type TagChanges = BTreeMap<TagKind, Vec<TagDescriptor>>;

/// Callback invoked after a reconciliation changed the live surface.
///
/// Arguments are the applied state, the added tags and the removed tags.
pub type ClientStateCallback = Arc<dyn Fn(&HeadState, &TagChanges, &TagChanges) + 'static>;

/// The merged, deduplicated result of reducing every registered declaration.
///
/// A `HeadState` is derived data: it is recomputed from the registry on every
/// change and never edited in place.
#[derive(Clone)]
pub struct HeadState {
	/// Resolved title. Empty means "leave the existing title alone".
	pub title: String,
	/// Attributes of the `<title>` element.
	pub title_attributes: Attributes,
	/// Attributes of the root `<html>` element.
	pub html_attributes: Attributes,
	/// Zero or one `<base>` tag.
	pub base: Vec<Tag>,
	/// `<link>` tags.
	pub link: Vec<Tag>,
	/// `<meta>` tags.
	pub meta: Vec<Tag>,
	/// `<noscript>` tags.
	pub noscript: Vec<Tag>,
	/// `<script>` tags.
	pub script: Vec<Tag>,
	/// `<style>` tags.
	pub style: Vec<Tag>,
	/// Whether text output escapes special characters.
	pub encode_special_characters: bool,
	/// Whether reconciliation waits for the next tick.
	pub defer: bool,
	/// Change callback of the innermost declaration that set one.
	pub on_change_client_state: Option<ClientStateCallback>,
}

impl HeadState {
	/// The state of an empty registry.
	pub fn empty() -> Self {
		Self {
			title: String::new(),
			title_attributes: Attributes::new(),
			html_attributes: Attributes::new(),
			base: Vec::new(),
			link: Vec::new(),
			meta: Vec::new(),
			noscript: Vec::new(),
			script: Vec::new(),
			style: Vec::new(),
			encode_special_characters: true,
			defer: true,
			on_change_client_state: None,
		}
	}

	/// Returns the tags of one kind.
	pub fn tags(&self, kind: TagKind) -> &[Tag] {
		match kind {
			TagKind::Base => &self.base,
			TagKind::Link => &self.link,
			TagKind::Meta => &self.meta,
			TagKind::Noscript => &self.noscript,
			TagKind::Script => &self.script,
			TagKind::Style => &self.style,
		}
	}

	pub(crate) fn tags_mut(&mut self, kind: TagKind) -> &mut Vec<Tag> {
		match kind {
			TagKind::Base => &mut self.base,
			TagKind::Link => &mut self.link,
			TagKind::Meta => &mut self.meta,
			TagKind::Noscript => &mut self.noscript,
			TagKind::Script => &mut self.script,
			TagKind::Style => &mut self.style,
		}
	}

	/// Returns `true` if the state requests nothing.
	pub fn is_empty(&self) -> bool {
		self.title.is_empty()
			&& self.title_attributes.is_empty()
			&& self.html_attributes.is_empty()
			&& TagKind::ALL.iter().all(|kind| self.tags(*kind).is_empty())
	}
}

impl Default for HeadState {
	fn default() -> Self {
		Self::empty()
	}
}

// The callback has no meaningful identity, so equality covers the data only.
impl PartialEq for HeadState {
	fn eq(&self, other: &Self) -> bool {
		self.title == other.title
			&& self.title_attributes == other.title_attributes
			&& self.html_attributes == other.html_attributes
			&& self.base == other.base
			&& self.link == other.link
			&& self.meta == other.meta
			&& self.noscript == other.noscript
			&& self.script == other.script
			&& self.style == other.style
			&& self.encode_special_characters == other.encode_special_characters
			&& self.defer == other.defer
	}
}

impl fmt::Debug for HeadState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HeadState")
			.field("title", &self.title)
			.field("title_attributes", &self.title_attributes)
			.field("html_attributes", &self.html_attributes)
			.field("base", &self.base)
			.field("link", &self.link)
			.field("meta", &self.meta)
			.field("noscript", &self.noscript)
			.field("script", &self.script)
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
