//! Ordered sub-key/value map stored inside a single cookie value (`k1=v1&k2=v2`).

// std
use std::slice::Iter;
// crates.io
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Ordered sub-key → sub-value pairs serialized as `application/x-www-form-urlencoded`.
///
/// Parsing is lenient: unknown keys survive a read-modify-write cycle, and a repeated key
/// resolves to its last occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CookieDictionary {
	entries: Vec<(String, String)>,
}
impl CookieDictionary {
	/// Parses a raw cookie value.
	pub fn parse(raw: &str) -> Self {
		let mut dictionary = Self::default();

		for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
			dictionary.insert(key.into_owned(), value.into_owned());
		}

		dictionary
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Inserts or replaces `key`, keeping the position of an existing entry.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some((_, slot)) => *slot = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Removes `key`, returning its value.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		let index = self.entries.iter().position(|(k, _)| k == key)?;

		Some(self.entries.remove(index).1)
	}

	/// Number of sub-keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` when no sub-keys are present.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(key, value)` pairs in insertion order.
	pub fn iter(&self) -> Iter<'_, (String, String)> {
		self.entries.iter()
	}
}
impl Display for CookieDictionary {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let encoded = form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.entries.iter())
			.finish();

		f.write_str(&encoded)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parse_keeps_order_and_last_value_wins() {
		let dictionary = CookieDictionary::parse("b=1&a=2&b=3");

		assert_eq!(dictionary.len(), 2);
		assert_eq!(dictionary.get("b"), Some("3"));
		assert_eq!(dictionary.to_string(), "b=3&a=2");
	}

	#[test]
	fn reserved_characters_are_escaped() {
		let mut dictionary = CookieDictionary::default();

		dictionary.insert("key", "a&b=c d");

		let raw = dictionary.to_string();

		assert_eq!(raw, "key=a%26b%3Dc+d");
		assert_eq!(CookieDictionary::parse(&raw).get("key"), Some("a&b=c d"));
	}

	#[test]
	fn empty_values_and_removal() {
		let mut dictionary = CookieDictionary::parse("key=");

		assert_eq!(dictionary.get("key"), Some(""));
		assert_eq!(dictionary.remove("key"), Some(String::new()));
		assert!(dictionary.is_empty());
		assert_eq!(dictionary.to_string(), "");
	}
}
