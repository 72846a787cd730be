//! Inbound frontend envelope parsing.
//!
//! The frontend sends commands to the embedder as JSON objects of the shape
//! `{ "id": 3, "method": "loadCompleted", "params": [] }`. Both `id` and
//! `params` are optional; `method` is mandatory. Parsing is strict so that a
//! malformed message is rejected before it can cause any side effect.

use serde::Serialize;
use serde_json::Value;

/// A parsed frontend-to-embedder message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
	/// Request id the embedder replies to, `0` when no reply is expected.
	pub id: i64,
	/// Embedder method name, e.g. `"loadNetworkResource"`.
	pub method: String,
	/// Positional arguments for the method, empty when absent.
	pub params: Vec<Value>,
}

/// Why an inbound message was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
	#[error("message is not valid JSON")]
	InvalidJson,
	#[error("message is not a JSON object")]
	NotAnObject,
	#[error("message has no string \"method\" field")]
	MissingMethod,
	#[error("\"params\" field is not an array")]
	ParamsNotArray,
}

impl Envelope {
	/// Parses and validates a raw frontend message.
	///
	/// A present but non-integer `id` is treated as absent rather than
	/// rejected; everything else malformed fails without side effects.
	pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
		let value: Value = serde_json::from_str(raw).map_err(|_| EnvelopeError::InvalidJson)?;
		let Value::Object(object) = value else {
			return Err(EnvelopeError::NotAnObject);
		};
		let method = object
			.get("method")
			.and_then(Value::as_str)
			.ok_or(EnvelopeError::MissingMethod)?
			.to_owned();
		let params = match object.get("params") {
			None => Vec::new(),
			Some(Value::Array(items)) => items.clone(),
			Some(_) => return Err(EnvelopeError::ParamsNotArray),
		};
		let id = object.get("id").and_then(Value::as_i64).unwrap_or(0);
		Ok(Self { id, method, params })
	}

	/// Whether a reply is expected for this envelope.
	pub fn expects_reply(&self) -> bool {
		self.id != 0
	}
}

/// Protocol method intercepted by the embedder instead of being forwarded.
pub const PAGE_RELOAD_METHOD: &str = "Page.reload";

/// Inspects a raw protocol message for the page-reload command.
///
/// This looks at a message bound for the inspected target, not at an
/// embedder envelope: reload requests are redirected to the embedder's
/// reload handling and must never reach the target.
pub fn is_page_reload(message: &str) -> bool {
	serde_json::from_str::<Value>(message)
		.ok()
		.and_then(|value| {
			value
				.get("method")
				.and_then(Value::as_str)
				.map(|method| method == PAGE_RELOAD_METHOD)
		})
		.unwrap_or(false)
}
