//! Tag validation and primary identity resolution.
//!
//! Every list tag needs exactly one *primary identity*: the attribute whose
//! value decides whether two tags are the same tag for deduplication. Tags
//! without one never reach the head state. Dropping them is the expected,
//! common case, so it is logged at `trace` level only.

use crate::tag::{CSS_TEXT, INNER_HTML, Tag, TagKind};

const BASE_ATTRIBUTES: &[&str] = &["href", "target"];
const LINK_ATTRIBUTES: &[&str] = &["rel", "href"];
const META_ATTRIBUTES: &[&str] = &["name", "charset", "http-equiv", "property", "itemprop"];
const NOSCRIPT_ATTRIBUTES: &[&str] = &[INNER_HTML];
const SCRIPT_ATTRIBUTES: &[&str] = &["src", INNER_HTML, "name"];
const STYLE_ATTRIBUTES: &[&str] = &[CSS_TEXT];

/// Attributes that win over any other recognized attribute when present.
const DOMINANT_ATTRIBUTES: &[&str] = &[INNER_HTML, CSS_TEXT, "itemprop"];

/// The resolved primary identity of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
	/// Identity attribute (lower-cased, or the exact content key).
	pub key: &'static str,
	/// Identity value; lower-cased unless it is tag content.
	pub value: String,
}

/// Returns the attributes that can give a tag of `kind` its identity.
pub fn valid_identity_attributes(kind: TagKind) -> &'static [&'static str] {
	match kind {
		TagKind::Base => BASE_ATTRIBUTES,
		TagKind::Link => LINK_ATTRIBUTES,
		TagKind::Meta => META_ATTRIBUTES,
		TagKind::Noscript => NOSCRIPT_ATTRIBUTES,
		TagKind::Script => SCRIPT_ATTRIBUTES,
		TagKind::Style => STYLE_ATTRIBUTES,
	}
}

/// Returns `true` if the tag resolves to a primary identity.
pub fn is_valid(tag: &Tag) -> bool {
	resolve_identity(tag).is_some()
}

/// Resolves the primary identity of a tag.
///
/// - `link`: `rel` unless its value is `stylesheet`, in which case `href`.
///   The choice does not depend on attribute order.
/// - `base`: `href`, or `target` when no `href` is set.
/// - other kinds: the last recognized attribute in declaration order, except
///   that content keys and `itemprop` always win.
///
/// Returns `None` when no recognized attribute is present or when the chosen
/// attribute has no value.
pub fn resolve_identity(tag: &Tag) -> Option<Identity> {
	let identity = match tag.kind {
		TagKind::Link => link_identity(tag),
		TagKind::Base => base_identity(tag),
		_ => generic_identity(tag),
	};
	if identity.is_none() {
		tracing::trace!(kind = %tag.kind, attributes = ?tag.attributes, "dropping tag without identity");
	}
	identity
}

fn link_identity(tag: &Tag) -> Option<Identity> {
	let rel = non_empty(tag.get_ignore_case("rel"));
	let href = non_empty(tag.get_ignore_case("href"));

	match (rel, href) {
		(Some(rel), _) if !rel.eq_ignore_ascii_case("stylesheet") => Some(lowered("rel", rel)),
		(_, Some(href)) => Some(lowered("href", href)),
		_ => None,
	}
}

fn base_identity(tag: &Tag) -> Option<Identity> {
	if let Some(href) = non_empty(tag.get_ignore_case("href")) {
		return Some(lowered("href", href));
	}
	non_empty(tag.get_ignore_case("target")).map(|target| lowered("target", target))
}

fn generic_identity(tag: &Tag) -> Option<Identity> {
	let valid = valid_identity_attributes(tag.kind);

	// Content keys live in `inner_html`, not in the attribute map.
	if let Some(content_key) = tag.kind.content_key()
		&& valid.contains(&content_key)
		&& let Some(content) = tag.inner_html.as_deref().filter(|c| !c.is_empty())
	{
		return Some(Identity {
			key: content_key,
			value: content.to_string(),
		});
	}

	let mut chosen: Option<(&'static str, Option<&str>)> = None;
	for (name, value) in &tag.attributes {
		let lower = name.to_ascii_lowercase();
		let Some(key) = valid.iter().copied().find(|key| *key == lower) else {
			continue;
		};
		let dominant_chosen = chosen.is_some_and(|(key, _)| DOMINANT_ATTRIBUTES.contains(&key));
		if !dominant_chosen {
			chosen = Some((key, value.as_deref()));
		}
	}

	let (key, value) = chosen?;
	let value = value.filter(|value| !value.is_empty())?;
	Some(lowered(key, value))
}

fn non_empty(value: Option<Option<&str>>) -> Option<&str> {
	value.flatten().filter(|value| !value.is_empty())
}

fn lowered(key: &'static str, value: &str) -> Identity {
	Identity {
		key,
		value: value.to_lowercase(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn identity(key: &'static str, value: &str) -> Option<Identity> {
		Some(Identity {
			key,
			value: value.to_string(),
		})
	}

	#[rstest]
	fn test_meta_name_identity_is_lowercased() {
		let tag = Tag::meta("Description", "Some Text");
		assert_eq!(resolve_identity(&tag), identity("name", "description"));
	}

	#[rstest]
	fn test_meta_key_matches_case_insensitively() {
		let tag = Tag::new(TagKind::Meta)
			.attr("HTTP-EQUIV", "Content-Type")
			.attr("content", "text/html");
		assert_eq!(resolve_identity(&tag), identity("http-equiv", "content-type"));
	}

	#[rstest]
	fn test_meta_itemprop_wins_regardless_of_order() {
		let first = Tag::new(TagKind::Meta)
			.attr("itemprop", "name")
			.attr("name", "x");
		let last = Tag::new(TagKind::Meta)
			.attr("name", "x")
			.attr("itemprop", "name");
		assert_eq!(resolve_identity(&first), identity("itemprop", "name"));
		assert_eq!(resolve_identity(&last), identity("itemprop", "name"));
	}

	#[rstest]
	fn test_meta_without_identity_is_dropped() {
		let tag = Tag::new(TagKind::Meta).attr("content", "orphan");
		assert!(!is_valid(&tag));
	}

	#[rstest]
	fn test_meta_with_valueless_identity_is_dropped() {
		let tag = Tag::new(TagKind::Meta)
			.flag("name")
			.attr("content", "x");
		assert!(resolve_identity(&tag).is_none());
	}

	#[rstest]
	fn test_meta_with_empty_identity_is_dropped() {
		let tag = Tag::meta("", "x");
		assert!(resolve_identity(&tag).is_none());
	}

	#[rstest]
	#[case(Tag::new(TagKind::Link).attr("rel", "stylesheet").attr("href", "A.css"))]
	#[case(Tag::new(TagKind::Link).attr("href", "A.css").attr("rel", "stylesheet"))]
	fn test_stylesheet_links_are_href_keyed(#[case] tag: Tag) {
		assert_eq!(resolve_identity(&tag), identity("href", "a.css"));
	}

	#[rstest]
	#[case(Tag::new(TagKind::Link).attr("rel", "canonical").attr("href", "http://x"))]
	#[case(Tag::new(TagKind::Link).attr("href", "http://x").attr("rel", "canonical"))]
	fn test_canonical_links_are_rel_keyed(#[case] tag: Tag) {
		assert_eq!(resolve_identity(&tag), identity("rel", "canonical"));
	}

	#[rstest]
	fn test_link_href_only() {
		let tag = Tag::new(TagKind::Link).attr("href", "/feed.xml");
		assert_eq!(resolve_identity(&tag), identity("href", "/feed.xml"));
	}

	#[rstest]
	fn test_stylesheet_without_href_is_dropped() {
		let tag = Tag::new(TagKind::Link).attr("rel", "stylesheet");
		assert!(resolve_identity(&tag).is_none());
	}

	#[rstest]
	fn test_script_inner_html_preserves_case() {
		let tag = Tag::inline_script("window.Foo = 1;");
		assert_eq!(resolve_identity(&tag), identity(INNER_HTML, "window.Foo = 1;"));
	}

	#[rstest]
	fn test_script_src_and_name() {
		assert_eq!(
			resolve_identity(&Tag::script_src("/App.js")),
			identity("src", "/app.js")
		);
		let named = Tag::new(TagKind::Script).attr("name", "analytics");
		assert_eq!(resolve_identity(&named), identity("name", "analytics"));
	}

	#[rstest]
	fn test_style_identity_is_css_text() {
		let tag = Tag::style("body { Color: red }");
		assert_eq!(resolve_identity(&tag), identity(CSS_TEXT, "body { Color: red }"));
	}

	#[rstest]
	fn test_noscript_identity_is_inner_html() {
		let tag = Tag::noscript("<img src=\"pixel.gif\">");
		assert_eq!(resolve_identity(&tag), identity(INNER_HTML, "<img src=\"pixel.gif\">"));
		assert!(!is_valid(&Tag::new(TagKind::Noscript).attr("id", "x")));
	}

	#[rstest]
	fn test_base_href_dominates_target() {
		let tag = Tag::new(TagKind::Base)
			.attr("target", "_blank")
			.attr("href", "/");
		assert_eq!(resolve_identity(&tag), identity("href", "/"));
	}

	#[rstest]
	fn test_base_target_only_is_accepted() {
		let tag = Tag::new(TagKind::Base).attr("target", "_Blank");
		assert_eq!(resolve_identity(&tag), identity("target", "_blank"));
	}

	#[rstest]
	fn test_valid_identity_attributes() {
		assert_eq!(valid_identity_attributes(TagKind::Style), &[CSS_TEXT]);
		assert!(valid_identity_attributes(TagKind::Meta).contains(&"property"));
	}
}
