//! Minimal-mutation head reconciler.
//!
//! [`Reconciler::apply`] makes a [`HeadSurface`] match a [`HeadState`]:
//!
//! - the title is written when it is non-empty and differs;
//! - the root and `<title>` elements end up carrying exactly the resolved
//!   attributes, and the marker attribute lists their names comma-joined;
//! - for every tag kind, marker-tagged nodes that structurally equal a wanted
//!   tag are kept, the remaining old nodes are removed and the missing tags
//!   are appended.
//!
//! Nothing is written where the surface already matches, so applying the same
//! state twice performs no mutation the second time. Nodes without the marker
//! attribute are never touched.

use reinhardt_head_core::{
	Attributes, HeadConfig, HeadResult, HeadState, TagChanges, TagDescriptor, TagKind,
};

use crate::surface::{ElementTarget, HeadSurface};

/// What one reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
	/// Appended nodes by kind. Kinds without additions are absent.
	pub added: TagChanges,
	/// Removed nodes by kind. Kinds without removals are absent.
	pub removed: TagChanges,
	/// Whether the title was written.
	pub title_changed: bool,
	/// Whether any root or `<title>` attribute was written or removed.
	pub attributes_changed: bool,
}

impl ReconcileReport {
	/// Returns `true` if the reconciliation did not touch the surface.
	pub fn is_empty(&self) -> bool {
		self.added.is_empty()
			&& self.removed.is_empty()
			&& !self.title_changed
			&& !self.attributes_changed
	}
}

/// Applies head states to a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciler {
	marker: String,
}

impl Reconciler {
	/// Creates a reconciler stamping `marker` on managed nodes.
	pub fn new(marker: impl Into<String>) -> Self {
		Self {
			marker: marker.into(),
		}
	}

	/// Creates a reconciler using the configured marker attribute.
	pub fn from_config(config: &HeadConfig) -> Self {
		Self::new(config.marker_attribute.clone())
	}

	/// The marker attribute name.
	pub fn marker(&self) -> &str {
		&self.marker
	}

	/// Makes `surface` match `state` and reports what changed.
	pub fn apply(&self, surface: &mut dyn HeadSurface, state: &HeadState) -> HeadResult<ReconcileReport> {
		let mut report = ReconcileReport::default();

		if !state.title.is_empty() && surface.title() != state.title {
			surface.set_title(&state.title)?;
			report.title_changed = true;
		}

		report.attributes_changed |=
			self.update_attributes(surface, ElementTarget::Title, &state.title_attributes)?;
		report.attributes_changed |=
			self.update_attributes(surface, ElementTarget::Root, &state.html_attributes)?;

		for kind in TagKind::ALL {
			let (added, removed) = self.update_tags(surface, kind, state)?;
			if !added.is_empty() {
				report.added.insert(kind, added);
			}
			if !removed.is_empty() {
				report.removed.insert(kind, removed);
			}
		}

		tracing::debug!(
			added = report.added.values().map(Vec::len).sum::<usize>(),
			removed = report.removed.values().map(Vec::len).sum::<usize>(),
			title_changed = report.title_changed,
			attributes_changed = report.attributes_changed,
			"Reconciled head"
		);
		Ok(report)
	}

	/// Leaves `target` with exactly `attributes`. Returns whether anything was
	/// written.
	fn update_attributes(
		&self,
		surface: &mut dyn HeadSurface,
		target: ElementTarget,
		attributes: &Attributes,
	) -> HeadResult<bool> {
		let mut changed = false;

		for name in surface.attribute_names(target) {
			if name != self.marker && !attributes.contains_key(&name) {
				surface.remove_attribute(target, &name)?;
				changed = true;
			}
		}

		for (name, value) in attributes {
			let value = value.as_deref().unwrap_or("");
			if surface.attribute(target, name).as_deref() != Some(value) {
				surface.set_attribute(target, name, value)?;
				changed = true;
			}
		}

		let current_marker = surface.attribute(target, &self.marker);
		if attributes.is_empty() {
			if current_marker.is_some() {
				surface.remove_attribute(target, &self.marker)?;
				changed = true;
			}
		} else {
			let applied = attributes
				.keys()
				.map(String::as_str)
				.collect::<Vec<_>>()
				.join(",");
			if current_marker.as_deref() != Some(applied.as_str()) {
				surface.set_attribute(target, &self.marker, &applied)?;
				changed = true;
			}
		}

		if changed {
			tracing::trace!(element = %target, count = attributes.len(), "Updated element attributes");
		}
		Ok(changed)
	}

	/// Diffs one kind. Returns the added and removed descriptors.
	fn update_tags(
		&self,
		surface: &mut dyn HeadSurface,
		kind: TagKind,
		state: &HeadState,
	) -> HeadResult<(Vec<TagDescriptor>, Vec<TagDescriptor>)> {
		let mut old_nodes = surface.managed_nodes(kind, &self.marker);
		let mut staged = Vec::new();

		for tag in state.tags(kind) {
			let wanted = TagDescriptor::managed(tag, &self.marker);
			match old_nodes
				.iter()
				.position(|(_, existing)| existing.is_equal_node(&wanted))
			{
				Some(index) => {
					old_nodes.remove(index);
				}
				None => staged.push(wanted),
			}
		}

		let mut removed = Vec::with_capacity(old_nodes.len());
		for (id, node) in old_nodes {
			surface.remove_head_node(id)?;
			removed.push(node);
		}
		for node in &staged {
			surface.append_head_node(node.clone())?;
		}

		if !staged.is_empty() || !removed.is_empty() {
			tracing::trace!(kind = %kind, added = staged.len(), removed = removed.len(), "Updated head tags");
		}
		Ok((staged, removed))
	}
}
