//! Rendering surface abstraction.
//!
//! The reconciler never touches a document directly. It goes through a
//! [`HeadSurface`], which exposes the title, the attributes of the root and
//! `<title>` elements, and the nodes in the head region. Browsers, headless
//! documents and tests each provide their own implementation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use reinhardt_head_core::{HeadResult, TagDescriptor, TagKind};

/// Opaque handle of a node in the head region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Element whose attributes the engine manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTarget {
	/// The root `<html>` element.
	Root,
	/// The `<title>` element.
	Title,
}

impl ElementTarget {
	/// Element name of the target.
	pub fn as_str(&self) -> &'static str {
		match self {
			ElementTarget::Root => "html",
			ElementTarget::Title => "title",
		}
	}
}

impl fmt::Display for ElementTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A live document the reconciler can read and mutate.
///
/// Attribute values are plain strings; a valueless attribute reads as `""`.
pub trait HeadSurface {
	/// Current document title.
	fn title(&self) -> String;

	/// Replaces the document title.
	fn set_title(&mut self, title: &str) -> HeadResult<()>;

	/// Reads one attribute of a target element.
	fn attribute(&self, target: ElementTarget, name: &str) -> Option<String>;

	/// Lists the attribute names currently set on a target element.
	fn attribute_names(&self, target: ElementTarget) -> Vec<String>;

	/// Sets one attribute of a target element.
	fn set_attribute(&mut self, target: ElementTarget, name: &str, value: &str) -> HeadResult<()>;

	/// Removes one attribute of a target element.
	fn remove_attribute(&mut self, target: ElementTarget, name: &str) -> HeadResult<()>;

	/// Returns the head nodes of `kind` that carry the `marker` attribute, in
	/// document order.
	fn managed_nodes(&self, kind: TagKind, marker: &str) -> Vec<(NodeId, TagDescriptor)>;

	/// Appends a node to the end of the head region.
	fn append_head_node(&mut self, node: TagDescriptor) -> HeadResult<NodeId>;

	/// Removes a node from the head region.
	fn remove_head_node(&mut self, id: NodeId) -> HeadResult<()>;
}

/// A shared surface, so the host keeps a handle while a manager owns another.
impl<S: HeadSurface> HeadSurface for Rc<RefCell<S>> {
	fn title(&self) -> String {
		self.borrow().title()
	}

	fn set_title(&mut self, title: &str) -> HeadResult<()> {
		self.borrow_mut().set_title(title)
	}

	fn attribute(&self, target: ElementTarget, name: &str) -> Option<String> {
		self.borrow().attribute(target, name)
	}

	fn attribute_names(&self, target: ElementTarget) -> Vec<String> {
		self.borrow().attribute_names(target)
	}

	fn set_attribute(&mut self, target: ElementTarget, name: &str, value: &str) -> HeadResult<()> {
		self.borrow_mut().set_attribute(target, name, value)
	}

	fn remove_attribute(&mut self, target: ElementTarget, name: &str) -> HeadResult<()> {
		self.borrow_mut().remove_attribute(target, name)
	}

	fn managed_nodes(&self, kind: TagKind, marker: &str) -> Vec<(NodeId, TagDescriptor)> {
		self.borrow().managed_nodes(kind, marker)
	}

	fn append_head_node(&mut self, node: TagDescriptor) -> HeadResult<NodeId> {
		self.borrow_mut().append_head_node(node)
	}

	fn remove_head_node(&mut self, id: NodeId) -> HeadResult<()> {
		self.borrow_mut().remove_head_node(id)
	}
}
