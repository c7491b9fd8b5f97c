//! Base64 ↔ Base64Url text transform applied to values written into cookies and URLs.
//!
//! Cookie value grammars reject or mangle `+` and `/`, so stored values use the URL-safe
//! alphabet. The transform works on text, not bytes: it swaps `+`↔`-` and `/`↔`_` and leaves
//! everything else alone, padding included. The swap is its own inverse, so any text survives
//! an encode/decode round trip, and real Base64 input comes out in the URL-safe alphabet.

/// Maps standard Base64 text to the URL-safe alphabet.
pub fn base64_to_base64_url(value: &str) -> String {
	swap_alphabet(value)
}

/// Maps URL-safe Base64 text back to the standard alphabet.
pub fn base64_url_to_base64(value: &str) -> String {
	swap_alphabet(value)
}

fn swap_alphabet(value: &str) -> String {
	value
		.chars()
		.map(|c| match c {
			'+' => '-',
			'-' => '+',
			'/' => '_',
			'_' => '/',
			other => other,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::{
		Engine as _,
		engine::general_purpose::{STANDARD, URL_SAFE},
	};
	// self
	use super::*;

	#[test]
	fn standard_base64_maps_to_url_safe_base64() {
		for bytes in [&b"f"[..], b"fo", b"foo", b"\xfb\xff\xbf", b"\xff\xfe\xfd\xfc"] {
			let standard = STANDARD.encode(bytes);
			let url = base64_to_base64_url(&standard);

			assert_eq!(url, URL_SAFE.encode(bytes));
			assert_eq!(base64_url_to_base64(&url), standard);
		}
	}

	#[test]
	fn alphabet_is_remapped() {
		assert_eq!(base64_to_base64_url("+/+/ab=="), "-_-_ab==");
		assert_eq!(base64_url_to_base64("-_-_ab=="), "+/+/ab==");
	}

	#[test]
	fn arbitrary_text_round_trips() {
		let values =
			["124578895613", "s", "abc", "user42", "other-user", "a_b", "bob", "x+y/z=", ""];

		for raw in values {
			assert_eq!(base64_url_to_base64(&base64_to_base64_url(raw)), raw);
		}
	}
}
