//! Escaping helpers shared by the serializer.

use std::borrow::Cow;

/// Escapes HTML special characters when `encode` is set.
///
/// This function replaces the following characters:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&#x27;`
///
/// With `encode == false` the input is returned untouched and escaping is the
/// caller's responsibility.
pub fn encode_special_characters(s: &str, encode: bool) -> Cow<'_, str> {
	if !encode || !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}

	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}
