//! In-memory rendering surface.
//!
//! [`MemoryDocument`] holds a title, root and title element attributes, and an
//! ordered head region. It counts every mutation, which makes it the surface
//! of choice for asserting minimal-mutation behaviour and for headless use.
//!
//! ```
//! use reinhardt_head_core::{Tag, TagDescriptor};
//! use reinhardt_head_dom::{HeadSurface, MemoryDocument};
//!
//! let mut document = MemoryDocument::new()
//!     .with_title("Untitled")
//!     .with_head_node(TagDescriptor::managed(&Tag::charset("utf-8"), "data-static"));
//!
//! document.set_title("Home").unwrap();
//! assert_eq!(document.title(), "Home");
//! assert_eq!(document.mutation_count(), 1);
//! ```

use indexmap::IndexMap;
use reinhardt_head_core::{HeadError, HeadResult, TagDescriptor, TagKind};

use crate::surface::{ElementTarget, HeadSurface, NodeId};

/// An in-memory document.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
	title: String,
	root_attributes: IndexMap<String, String>,
	title_attributes: IndexMap<String, String>,
	head: Vec<(NodeId, TagDescriptor)>,
	next_id: u64,
	mutations: usize,
}

impl MemoryDocument {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds the title without counting a mutation.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Seeds a root element attribute without counting a mutation.
	pub fn with_root_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.root_attributes.insert(name.into(), value.into());
		self
	}

	/// Seeds a head node without counting a mutation.
	pub fn with_head_node(mut self, node: TagDescriptor) -> Self {
		self.push_node(node);
		self
	}

	/// Number of mutations performed through [`HeadSurface`].
	pub fn mutation_count(&self) -> usize {
		self.mutations
	}

	/// Resets the mutation counter.
	pub fn reset_mutation_count(&mut self) {
		self.mutations = 0;
	}

	/// Attributes of a target element, in insertion order.
	pub fn attributes(&self, target: ElementTarget) -> &IndexMap<String, String> {
		match target {
			ElementTarget::Root => &self.root_attributes,
			ElementTarget::Title => &self.title_attributes,
		}
	}

	/// Every node in the head region, managed or not, in document order.
	pub fn head_nodes(&self) -> impl Iterator<Item = &TagDescriptor> {
		self.head.iter().map(|(_, node)| node)
	}

	fn attributes_mut(&mut self, target: ElementTarget) -> &mut IndexMap<String, String> {
		match target {
			ElementTarget::Root => &mut self.root_attributes,
			ElementTarget::Title => &mut self.title_attributes,
		}
	}

	fn push_node(&mut self, node: TagDescriptor) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		self.head.push((id, node));
		id
	}
}

impl HeadSurface for MemoryDocument {
	fn title(&self) -> String {
		self.title.clone()
	}

	fn set_title(&mut self, title: &str) -> HeadResult<()> {
		self.title = title.to_string();
		self.mutations += 1;
		Ok(())
	}

	fn attribute(&self, target: ElementTarget, name: &str) -> Option<String> {
		self.attributes(target).get(name).cloned()
	}

	fn attribute_names(&self, target: ElementTarget) -> Vec<String> {
		self.attributes(target).keys().cloned().collect()
	}

	fn set_attribute(&mut self, target: ElementTarget, name: &str, value: &str) -> HeadResult<()> {
		self.attributes_mut(target)
			.insert(name.to_string(), value.to_string());
		self.mutations += 1;
		Ok(())
	}

	fn remove_attribute(&mut self, target: ElementTarget, name: &str) -> HeadResult<()> {
		self.attributes_mut(target).shift_remove(name);
		self.mutations += 1;
		Ok(())
	}

	fn managed_nodes(&self, kind: TagKind, marker: &str) -> Vec<(NodeId, TagDescriptor)> {
		self.head
			.iter()
			.filter(|(_, node)| node.tag.eq_ignore_ascii_case(kind.as_str()) && node.has_attribute(marker))
			.cloned()
			.collect()
	}

	fn append_head_node(&mut self, node: TagDescriptor) -> HeadResult<NodeId> {
		let id = self.push_node(node);
		self.mutations += 1;
		Ok(id)
	}

	fn remove_head_node(&mut self, id: NodeId) -> HeadResult<()> {
		let Some(position) = self.head.iter().position(|(node_id, _)| *node_id == id) else {
			return Err(HeadError::surface(
				"remove_head_node",
				format!("node {} is not in the head region", id),
			));
		};
		self.head.remove(position);
		self.mutations += 1;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_head_core::Tag;
	use rstest::rstest;

	#[rstest]
	fn test_seeding_is_not_a_mutation() {
		let document = MemoryDocument::new()
			.with_title("Seed")
			.with_root_attribute("lang", "en")
			.with_head_node(TagDescriptor::managed(&Tag::charset("utf-8"), "data-m"));
		assert_eq!(document.mutation_count(), 0);
		assert_eq!(document.head_nodes().count(), 1);
		assert_eq!(document.attribute(ElementTarget::Root, "lang").as_deref(), Some("en"));
	}

	#[rstest]
	fn test_managed_nodes_filters_by_kind_and_marker() {
		let document = MemoryDocument::new()
			.with_head_node(TagDescriptor::managed(&Tag::meta("a", "1"), "data-m"))
			.with_head_node(TagDescriptor::managed(&Tag::meta("b", "2"), "data-other"))
			.with_head_node(TagDescriptor::managed(&Tag::stylesheet("/x.css"), "data-m"));

		let metas = document.managed_nodes(TagKind::Meta, "data-m");
		assert_eq!(metas.len(), 1);
		assert_eq!(metas[0].1.attribute("name"), Some("a"));
		assert_eq!(document.managed_nodes(TagKind::Link, "data-m").len(), 1);
		assert!(document.managed_nodes(TagKind::Script, "data-m").is_empty());
	}

	#[rstest]
	fn test_node_ids_are_not_reused() {
		let mut document = MemoryDocument::new();
		let first = document
			.append_head_node(TagDescriptor::new("meta"))
			.unwrap();
		document.remove_head_node(first).unwrap();
		let second = document
			.append_head_node(TagDescriptor::new("meta"))
			.unwrap();
		assert_ne!(first, second);
		assert_eq!(document.mutation_count(), 3);
	}

	#[rstest]
	fn test_remove_unknown_node_fails() {
		let mut document = MemoryDocument::new();
		let result = document.remove_head_node(NodeId(42));
		assert!(matches!(result, Err(HeadError::Surface { operation: "remove_head_node", .. })));
	}

	#[rstest]
	fn test_remove_attribute_keeps_order() {
		let mut document = MemoryDocument::new()
			.with_root_attribute("a", "1")
			.with_root_attribute("b", "2")
			.with_root_attribute("c", "3");
		document.remove_attribute(ElementTarget::Root, "b").unwrap();
		assert_eq!(document.attribute_names(ElementTarget::Root), vec!["a", "c"]);
	}
}
