//! Instance registry.
//!
//! The registry holds one [`FragmentDeclaration`] per mounted instance, in
//! mount order. Parents mount before their children, so the order is also
//! nesting order: outermost first, innermost last.

use std::fmt;

use reinhardt_head_core::{FragmentDeclaration, HeadError, HeadResult};

/// Identifier of a registered instance. Identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
	/// The raw identifier.
	pub fn get(&self) -> u64 {
		self.0
	}
}

impl fmt::Display for InstanceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Ordered set of registered declarations.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
	entries: Vec<(InstanceId, FragmentDeclaration)>,
	next_id: u64,
}

impl InstanceRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a declaration as the innermost instance.
	pub fn register(&mut self, declaration: FragmentDeclaration) -> InstanceId {
		let id = InstanceId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, declaration));
		id
	}

	/// Replaces the declaration of an instance, keeping its position.
	pub fn update(&mut self, id: InstanceId, declaration: FragmentDeclaration) -> HeadResult<()> {
		let entry = self
			.entries
			.iter_mut()
			.find(|(entry_id, _)| *entry_id == id)
			.ok_or(HeadError::UnknownInstance(id.get()))?;
		entry.1 = declaration;
		Ok(())
	}

	/// Removes an instance and returns its declaration.
	pub fn unregister(&mut self, id: InstanceId) -> HeadResult<FragmentDeclaration> {
		let position = self
			.entries
			.iter()
			.position(|(entry_id, _)| *entry_id == id)
			.ok_or(HeadError::UnknownInstance(id.get()))?;
		Ok(self.entries.remove(position).1)
	}

	/// Returns the declaration of an instance.
	pub fn get(&self, id: InstanceId) -> Option<&FragmentDeclaration> {
		self.entries
			.iter()
			.find(|(entry_id, _)| *entry_id == id)
			.map(|(_, declaration)| declaration)
	}

	/// Returns `true` if the instance is registered.
	pub fn contains(&self, id: InstanceId) -> bool {
		self.get(id).is_some()
	}

	/// Declarations, outermost first.
	pub fn declarations(&self) -> impl Iterator<Item = &FragmentDeclaration> {
		self.entries.iter().map(|(_, declaration)| declaration)
	}

	/// Registered identifiers, outermost first.
	pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
		self.entries.iter().map(|(id, _)| *id)
	}

	/// Number of registered instances.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes every instance. Identifiers keep increasing afterwards.
	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
