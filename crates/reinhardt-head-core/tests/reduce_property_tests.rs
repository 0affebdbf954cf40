//! Reducer property-based tests
//!
//! Property-based tests for title precedence and tag deduplication.

use proptest::prelude::*;
use reinhardt_head_core::prelude::*;

fn declarations_with_titles(titles: &[Option<String>]) -> Vec<FragmentDeclaration> {
	titles
		.iter()
		.map(|title| match title {
			Some(title) => FragmentDeclaration::new().title(title.clone()),
			None => FragmentDeclaration::new(),
		})
		.collect()
}

/// Builds one declaration per instance, each holding `description`-style meta
/// tags named after the given keys. Content records `instance:position`.
fn declarations_with_metas(instances: &[Vec<u8>]) -> Vec<FragmentDeclaration> {
	instances
		.iter()
		.enumerate()
		.map(|(instance, keys)| {
			keys.iter()
				.enumerate()
				.fold(FragmentDeclaration::new(), |declaration, (position, key)| {
					declaration.meta(Tag::meta(
						format!("key-{}", key),
						format!("{}:{}", instance, position),
					))
				})
		})
		.collect()
}

fn owner(tag: &Tag) -> usize {
	tag.get("content")
		.and_then(|content| content.split(':').next())
		.and_then(|instance| instance.parse().ok())
		.unwrap_or(usize::MAX)
}

// ============================================================================
// Property-Based Tests: Title
// ============================================================================

proptest! {
	/// Test: Innermost non-empty title wins
	///
	/// Category: Property
	/// Verifies that the resolved title comes from the deepest declaration
	/// that defines one.
	#[test]
	fn prop_innermost_title_wins(
		titles in prop::collection::vec(prop::option::of("[a-zA-Z ]{1,16}"), 0..8)
	) {
		let declarations = declarations_with_titles(&titles);
		let state = reduce(&declarations, &HeadConfig::default());

		let expected = titles.iter().rev().flatten().next().cloned().unwrap_or_default();
		prop_assert_eq!(state.title, expected);
	}

	/// Test: Reduction is deterministic
	///
	/// Category: Property
	/// Verifies that reducing the same registry twice yields equal states.
	#[test]
	fn prop_reduce_is_deterministic(
		instances in prop::collection::vec(prop::collection::vec(0u8..6, 0..5), 0..6)
	) {
		let declarations = declarations_with_metas(&instances);
		let config = HeadConfig::default();
		prop_assert_eq!(reduce(&declarations, &config), reduce(&declarations, &config));
	}
}

// ============================================================================
// Property-Based Tests: Deduplication
// ============================================================================

proptest! {
	/// Test: Each identity is owned by the deepest declaring instance
	///
	/// Category: Property
	/// Verifies that every surviving tag of an identity comes from the deepest
	/// instance declaring it, and that all of that instance's copies survive.
	#[test]
	fn prop_deepest_instance_owns_identity(
		instances in prop::collection::vec(prop::collection::vec(0u8..6, 0..5), 0..6)
	) {
		let declarations = declarations_with_metas(&instances);
		let state = reduce(&declarations, &HeadConfig::default());

		for key in 0u8..6 {
			let deepest = instances.iter().rposition(|keys| keys.contains(&key));
			let name = format!("key-{}", key);
			let survivors: Vec<&Tag> = state
				.meta
				.iter()
				.filter(|tag| tag.get("name") == Some(name.as_str()))
				.collect();

			match deepest {
				Some(instance) => {
					let declared = instances[instance].iter().filter(|k| **k == key).count();
					prop_assert_eq!(survivors.len(), declared);
					prop_assert!(survivors.iter().all(|tag| owner(tag) == instance));
				}
				None => prop_assert!(survivors.is_empty()),
			}
		}
	}

	/// Test: Output keeps declaration order
	///
	/// Category: Property
	/// Verifies that surviving tags appear outermost instance first, each
	/// instance in its own order.
	#[test]
	fn prop_output_in_declaration_order(
		instances in prop::collection::vec(prop::collection::vec(0u8..6, 0..5), 0..6)
	) {
		let declarations = declarations_with_metas(&instances);
		let state = reduce(&declarations, &HeadConfig::default());

		let positions: Vec<(usize, usize)> = state
			.meta
			.iter()
			.filter_map(|tag| {
				let content = tag.get("content")?;
				let (instance, position) = content.split_once(':')?;
				Some((instance.parse().ok()?, position.parse().ok()?))
			})
			.collect();
		let mut sorted = positions.clone();
		sorted.sort();
		prop_assert_eq!(positions, sorted);
	}
}
