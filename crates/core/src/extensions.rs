//! Extension API bootstrap scripts.
//!
//! Extensions that add frontend panels register a bootstrap script for
//! their origin. When a frame from that origin finishes navigating inside
//! the frontend, the session injects the script so the extension's API
//! surface exists before its page code runs.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Registered bootstrap scripts keyed by origin.
#[derive(Default)]
pub struct ExtensionScripts {
	scripts: Mutex<HashMap<String, String>>,
}

impl ExtensionScripts {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `script` for `origin`. Keys are normalized to end with a
	/// single slash so they compare equal to serialized frame origins.
	pub fn register(&self, origin: &str, script: &str) {
		let key = format!("{}/", origin.trim_end_matches('/'));
		self.scripts.lock().insert(key, script.to_owned());
	}

	/// Looks up the script for a serialized origin (`scheme://host/`).
	pub fn lookup(&self, origin: &str) -> Option<String> {
		self.scripts.lock().get(origin).cloned()
	}

	pub fn len(&self) -> usize {
		self.scripts.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.scripts.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_uses_the_slash_terminated_origin() {
		let scripts = ExtensionScripts::new();
		scripts.register("chrome-extension://abcdef", "initApi");
		assert_eq!(
			scripts.lookup("chrome-extension://abcdef/").as_deref(),
			Some("initApi")
		);
		assert_eq!(scripts.lookup("chrome-extension://abcdef"), None);
	}

	#[test]
	fn trailing_slashes_do_not_double_up() {
		let scripts = ExtensionScripts::new();
		scripts.register("chrome-extension://abcdef/", "initApi");
		assert_eq!(scripts.len(), 1);
		assert_eq!(
			scripts.lookup("chrome-extension://abcdef/").as_deref(),
			Some("initApi")
		);
	}

	#[test]
	fn unknown_origins_come_back_empty() {
		let scripts = ExtensionScripts::new();
		assert_eq!(scripts.lookup("chrome-extension://missing/"), None);
		assert!(scripts.is_empty());
	}
}
