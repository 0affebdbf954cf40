//! State reducer.
//!
//! [`reduce`] folds the registered declarations, outermost first, into one
//! [`HeadState`]. The function is pure: it is recomputed from scratch on every
//! registry change and never looks at a rendering surface.
//!
//! Precedence always favours the innermost (deepest) declaration:
//!
//! - scalars (`title`, `title_template`, `default_title`, the escaping and
//!   batching flags, the callback) take the innermost explicit value;
//! - `title_attributes` and `html_attributes` merge key by key;
//! - list tags are deduplicated by primary identity, and a tag whose identity
//!   a deeper declaration already claimed is dropped. Duplicates inside one
//!   declaration survive.

use std::collections::{HashMap, HashSet};

use crate::config::HeadConfig;
use crate::declaration::FragmentDeclaration;
use crate::state::HeadState;
use crate::tag::{Attributes, Tag, TagKind};
use crate::validator::{Identity, resolve_identity};

/// Placeholder replaced by the resolved title in a title template.
pub const TITLE_PLACEHOLDER: &str = "%s";

/// Reduces declarations, ordered outermost first, into a head state.
///
/// # Example
///
/// ```
/// use reinhardt_head_core::config::HeadConfig;
/// use reinhardt_head_core::declaration::FragmentDeclaration;
/// use reinhardt_head_core::reducer::reduce;
///
/// let outer = FragmentDeclaration::new().title("Test").title_template("Tmpl %s");
/// let inner = FragmentDeclaration::new().title("Second");
///
/// let state = reduce([&outer, &inner], &HeadConfig::default());
/// assert_eq!(state.title, "Tmpl Second");
/// ```
pub fn reduce<'a, I>(declarations: I, config: &HeadConfig) -> HeadState
where
	I: IntoIterator<Item = &'a FragmentDeclaration>,
{
	let declarations: Vec<&FragmentDeclaration> = declarations.into_iter().collect();

	let mut state = HeadState::empty();
	state.title = resolve_title(&declarations);
	state.title_attributes = merge_attributes(&declarations, |d| d.title_attributes.as_ref());
	state.html_attributes = merge_attributes(&declarations, |d| d.html_attributes.as_ref());
	state.base = resolve_base(&declarations).into_iter().collect();
	for kind in TagKind::ALL {
		if kind != TagKind::Base {
			*state.tags_mut(kind) = dedup_tags(&declarations, kind);
		}
	}
	state.encode_special_characters = innermost(&declarations, |d| d.encode_special_characters)
		.unwrap_or(config.encode_special_characters);
	state.defer = innermost(&declarations, |d| d.defer).unwrap_or(config.defer);
	state.on_change_client_state =
		innermost(&declarations, |d| d.on_change_client_state.clone());
	state
}

fn innermost<T>(
	declarations: &[&FragmentDeclaration],
	field: impl Fn(&FragmentDeclaration) -> Option<T>,
) -> Option<T> {
	declarations.iter().rev().find_map(|d| field(d))
}

fn innermost_text<'a>(
	declarations: &[&'a FragmentDeclaration],
	field: impl Fn(&'a FragmentDeclaration) -> Option<&'a String>,
) -> Option<&'a str> {
	declarations
		.iter()
		.rev()
		.find_map(|d| field(d).map(String::as_str).filter(|text| !text.is_empty()))
}

fn resolve_title(declarations: &[&FragmentDeclaration]) -> String {
	let title = innermost_text(declarations, |d| d.title.as_ref());
	let template = innermost_text(declarations, |d| d.title_template.as_ref());

	match (title, template) {
		(Some(title), Some(template)) => template.replace(TITLE_PLACEHOLDER, title),
		(Some(title), None) => title.to_string(),
		(None, _) => innermost_text(declarations, |d| d.default_title.as_ref())
			.unwrap_or_default()
			.to_string(),
	}
}

fn merge_attributes<'a>(
	declarations: &[&'a FragmentDeclaration],
	field: impl Fn(&'a FragmentDeclaration) -> Option<&'a Attributes>,
) -> Attributes {
	let mut merged = Attributes::new();
	for attributes in declarations.iter().filter_map(|d| field(d)) {
		for (name, value) in attributes {
			merged.insert(name.clone(), value.clone());
		}
	}
	merged
}

/// Innermost base with an `href`; a `target`-only base counts only when no
/// declaration supplies an `href`.
fn resolve_base(declarations: &[&FragmentDeclaration]) -> Option<Tag> {
	let with_key = |key: &str| {
		declarations.iter().rev().find_map(|d| {
			d.base
				.as_ref()
				.filter(|tag| resolve_identity(tag).is_some_and(|identity| identity.key == key))
		})
	};
	with_key("href").or_else(|| with_key("target")).cloned()
}

/// Accumulator of the deduplication fold.
#[derive(Default)]
struct DedupFold<'a> {
	/// Identities claimed by the instances processed so far, by key.
	approved: HashMap<&'static str, HashSet<String>>,
	/// Surviving tags, innermost instance first, each instance reversed.
	output: Vec<&'a Tag>,
}

impl<'a> DedupFold<'a> {
	fn is_approved(&self, identity: &Identity) -> bool {
		self.approved
			.get(identity.key)
			.is_some_and(|values| values.contains(&identity.value))
	}

	fn add_instance(mut self, tags: &'a [Tag]) -> Self {
		let mut local: HashMap<&'static str, HashSet<String>> = HashMap::new();
		let mut kept = Vec::with_capacity(tags.len());

		for tag in tags {
			let Some(identity) = resolve_identity(tag) else {
				continue;
			};
			if self.is_approved(&identity) {
				continue;
			}
			local.entry(identity.key).or_default().insert(identity.value);
			kept.push(tag);
		}

		self.output.extend(kept.into_iter().rev());
		for (key, values) in local {
			self.approved.entry(key).or_default().extend(values);
		}
		self
	}

	fn into_tags(self) -> Vec<Tag> {
		self.output.into_iter().rev().cloned().collect()
	}
}

fn dedup_tags(declarations: &[&FragmentDeclaration], kind: TagKind) -> Vec<Tag> {
	declarations
		.iter()
		.rev()
		.fold(DedupFold::default(), |fold, declaration| {
			fold.add_instance(declaration.tags(kind))
		})
		.into_tags()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[fixture]
	fn config() -> HeadConfig {
		HeadConfig::default()
	}

	fn contents(tags: &[Tag]) -> Vec<&str> {
		tags.iter().filter_map(|tag| tag.get("content")).collect()
	}

	// ========================================================================
	// Title
	// ========================================================================

	#[rstest]
	fn test_empty_registry(config: HeadConfig) {
		let state = reduce(&Vec::<FragmentDeclaration>::new(), &config);
		assert_eq!(state, HeadState::empty());
	}

	#[rstest]
	fn test_template_replaces_every_placeholder(config: HeadConfig) {
		let declaration = FragmentDeclaration::new()
			.title("Test")
			.title_template("This is a %s of X. Another %s.");
		let state = reduce([&declaration], &config);
		assert_eq!(state.title, "This is a Test of X. Another Test.");
	}

	#[rstest]
	fn test_inner_title_uses_outer_template(config: HeadConfig) {
		let outer = FragmentDeclaration::new()
			.title("Test")
			.title_template("Tmpl %s");
		let inner = FragmentDeclaration::new().title("Second");
		assert_eq!(reduce([&outer, &inner], &config).title, "Tmpl Second");
	}

	#[rstest]
	fn test_empty_title_does_not_override(config: HeadConfig) {
		let outer = FragmentDeclaration::new().title("Outer");
		let inner = FragmentDeclaration::new().title("");
		assert_eq!(reduce([&outer, &inner], &config).title, "Outer");
	}

	#[rstest]
	fn test_template_without_title_is_unused(config: HeadConfig) {
		let declaration = FragmentDeclaration::new()
			.title_template("%s | Site")
			.default_title("Fallback");
		assert_eq!(reduce([&declaration], &config).title, "Fallback");
	}

	#[rstest]
	fn test_default_title_innermost(config: HeadConfig) {
		let outer = FragmentDeclaration::new().default_title("Outer default");
		let inner = FragmentDeclaration::new().default_title("Inner default");
		assert_eq!(reduce([&outer, &inner], &config).title, "Inner default");
	}

	// ========================================================================
	// Attributes
	// ========================================================================

	#[rstest]
	fn test_html_attributes_innermost_wins_per_key(config: HeadConfig) {
		let outer = FragmentDeclaration::new()
			.html_attribute("lang", "en")
			.html_attribute("class", "outer");
		let inner = FragmentDeclaration::new()
			.html_attribute("lang", "ja")
			.html_flag("amp");
		let state = reduce([&outer, &inner], &config);

		let pairs: Vec<_> = state
			.html_attributes
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_deref()))
			.collect();
		assert_eq!(
			pairs,
			vec![("lang", Some("ja")), ("class", Some("outer")), ("amp", None)]
		);
	}

	#[rstest]
	fn test_title_attributes_merge(config: HeadConfig) {
		let outer = FragmentDeclaration::new().title_attribute("itemprop", "name");
		let inner = FragmentDeclaration::new().title_attribute("lang", "en");
		let state = reduce([&outer, &inner], &config);
		assert_eq!(state.title_attributes.len(), 2);
	}

	// ========================================================================
	// Base
	// ========================================================================

	#[rstest]
	fn test_base_innermost_href(config: HeadConfig) {
		let outer = FragmentDeclaration::new().base(Tag::base("/outer/"));
		let inner = FragmentDeclaration::new().base(Tag::base("/inner/"));
		let state = reduce([&outer, &inner], &config);
		assert_eq!(state.base.len(), 1);
		assert_eq!(state.base[0].get("href"), Some("/inner/"));
	}

	#[rstest]
	fn test_base_href_beats_deeper_target_only(config: HeadConfig) {
		let outer = FragmentDeclaration::new().base(Tag::base("/"));
		let inner =
			FragmentDeclaration::new().base(Tag::new(TagKind::Base).attr("target", "_blank"));
		let state = reduce([&outer, &inner], &config);
		assert_eq!(state.base[0].get("href"), Some("/"));
	}

	#[rstest]
	fn test_base_target_only_accepted(config: HeadConfig) {
		let declaration =
			FragmentDeclaration::new().base(Tag::new(TagKind::Base).attr("target", "_blank"));
		let state = reduce([&declaration], &config);
		assert_eq!(state.base[0].get("target"), Some("_blank"));
	}

	#[rstest]
	fn test_base_without_identity_is_dropped(config: HeadConfig) {
		let declaration =
			FragmentDeclaration::new().base(Tag::new(TagKind::Base).attr("id", "x"));
		assert!(reduce([&declaration], &config).base.is_empty());
	}

	// ========================================================================
	// Tag deduplication
	// ========================================================================

	#[rstest]
	fn test_deeper_declaration_wins(config: HeadConfig) {
		let outer = FragmentDeclaration::new().meta(Tag::meta("description", "outer"));
		let inner = FragmentDeclaration::new().meta(Tag::meta("description", "inner"));
		let state = reduce([&outer, &inner], &config);
		assert_eq!(contents(&state.meta), vec!["inner"]);
	}

	#[rstest]
	fn test_same_instance_duplicates_survive(config: HeadConfig) {
		let declaration = FragmentDeclaration::new()
			.meta(Tag::meta("description", "first"))
			.meta(Tag::meta("description", "second"));
		let state = reduce([&declaration], &config);
		assert_eq!(contents(&state.meta), vec!["first", "second"]);
	}

	#[rstest]
	fn test_output_keeps_declaration_order(config: HeadConfig) {
		let outer = FragmentDeclaration::new()
			.meta(Tag::meta("a", "outer-a"))
			.meta(Tag::meta("b", "outer-b"));
		let inner = FragmentDeclaration::new()
			.meta(Tag::meta("c", "inner-c"))
			.meta(Tag::meta("a", "inner-a"));
		let state = reduce([&outer, &inner], &config);
		assert_eq!(contents(&state.meta), vec!["outer-b", "inner-c", "inner-a"]);
	}

	#[rstest]
	fn test_identity_match_is_case_insensitive(config: HeadConfig) {
		let outer = FragmentDeclaration::new().meta(Tag::meta("Description", "outer"));
		let inner = FragmentDeclaration::new().meta(Tag::meta("description", "inner"));
		let state = reduce([&outer, &inner], &config);
		assert_eq!(contents(&state.meta), vec!["inner"]);
	}

	#[rstest]
	fn test_stylesheet_links_dedup_across_attribute_order(config: HeadConfig) {
		let outer = FragmentDeclaration::new().link(
			Tag::new(TagKind::Link)
				.attr("rel", "stylesheet")
				.attr("href", "a.css"),
		);
		let inner = FragmentDeclaration::new().link(
			Tag::new(TagKind::Link)
				.attr("href", "a.css")
				.attr("rel", "stylesheet")
				.attr("media", "print"),
		);
		let state = reduce([&outer, &inner], &config);
		assert_eq!(state.link.len(), 1);
		assert_eq!(state.link[0].get("media"), Some("print"));
	}

	#[rstest]
	fn test_distinct_stylesheets_coexist(config: HeadConfig) {
		let outer = FragmentDeclaration::new().link(Tag::stylesheet("a.css"));
		let inner = FragmentDeclaration::new().link(Tag::stylesheet("b.css"));
		assert_eq!(reduce([&outer, &inner], &config).link.len(), 2);
	}

	#[rstest]
	fn test_tags_without_identity_are_dropped(config: HeadConfig) {
		let declaration = FragmentDeclaration::new()
			.meta(Tag::new(TagKind::Meta).attr("content", "orphan"))
			.script(Tag::new(TagKind::Script).attr("type", "module"))
			.style(Tag::new(TagKind::Style).attr("media", "print"));
		let state = reduce([&declaration], &config);
		assert!(state.is_empty());
	}

	#[rstest]
	fn test_inline_scripts_dedup_by_content(config: HeadConfig) {
		let outer = FragmentDeclaration::new()
			.script(Tag::inline_script("init()"))
			.script(Tag::inline_script("track()"));
		let inner = FragmentDeclaration::new().script(Tag::inline_script("init()").attr("id", "x"));
		let state = reduce([&outer, &inner], &config);
		assert_eq!(state.script.len(), 2);
		assert_eq!(state.script[0].inner_html.as_deref(), Some("track()"));
		assert_eq!(state.script[1].get("id"), Some("x"));
	}

	// ========================================================================
	// Flags and callback
	// ========================================================================

	#[rstest]
	fn test_flags_fall_back_to_config() {
		let config = HeadConfig::new().encode_special_characters(false).defer(false);
		let declaration = FragmentDeclaration::new().title("x");
		let state = reduce([&declaration], &config);
		assert!(!state.encode_special_characters);
		assert!(!state.defer);
	}

	#[rstest]
	fn test_flags_innermost_explicit_value(config: HeadConfig) {
		let outer = FragmentDeclaration::new().defer(false);
		let middle = FragmentDeclaration::new().encode_special_characters(false);
		let inner = FragmentDeclaration::new().defer(true);
		let state = reduce([&outer, &middle, &inner], &config);
		assert!(state.defer);
		assert!(!state.encode_special_characters);
	}

	#[rstest]
	fn test_innermost_callback(config: HeadConfig) {
		let calls = Arc::new(AtomicUsize::new(0));
		let outer = FragmentDeclaration::new().on_change_client_state(|_, _, _| {});
		let counter = Arc::clone(&calls);
		let inner = FragmentDeclaration::new().on_change_client_state(move |_, _, _| {
			counter.fetch_add(1, Ordering::SeqCst);
		});
		let bare = FragmentDeclaration::new();

		let state = reduce([&outer, &inner, &bare], &config);
		let callback = state.on_change_client_state.clone().unwrap();
		callback(&state, &Default::default(), &Default::default());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
