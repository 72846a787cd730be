//! Frontend preference storage.
//!
//! The frontend persists its settings (dock side, panel layout, console
//! history) through the embedder. Values are opaque strings; the frontend
//! is the only party that interprets them.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::{Map, Value};

/// Key/value persistence for frontend preferences.
pub trait PreferenceStore: Send + Sync {
	/// Every stored preference as a JSON object of string values, the
	/// shape `getPreferences` replies with.
	fn get_all(&self) -> Map<String, Value>;

	fn get(&self, name: &str) -> Option<String>;

	fn set(&self, name: &str, value: &str);

	fn remove(&self, name: &str);

	fn clear(&self);
}

/// Process-lifetime store. Embedders that want preferences to survive a
/// restart implement [`PreferenceStore`] over their own settings backend.
#[derive(Default)]
pub struct MemoryPrefs {
	values: Mutex<HashMap<String, String>>,
}

impl MemoryPrefs {
	pub fn new() -> Self {
		Self::default()
	}
}

impl PreferenceStore for MemoryPrefs {
	fn get_all(&self) -> Map<String, Value> {
		self.values
			.lock()
			.iter()
			.map(|(name, value)| (name.clone(), Value::String(value.clone())))
			.collect()
	}

	fn get(&self, name: &str) -> Option<String> {
		self.values.lock().get(name).cloned()
	}

	fn set(&self, name: &str, value: &str) {
		self.values.lock().insert(name.to_owned(), value.to_owned());
	}

	fn remove(&self, name: &str) {
		self.values.lock().remove(name);
	}

	fn clear(&self) {
		self.values.lock().clear();
	}
}
