//! Script-call rendering for the frontend document.
//!
//! The embedder talks to the frontend by evaluating JavaScript of the form
//! `Function(arg, arg);` in the frontend document, with every argument
//! JSON-encoded. [`ClientCall`] assembles such a script; the constructors
//! cover the stable calls of the embedder contract:
//!
//! - [`ClientCall::dispatch_message`] - single-shot protocol event delivery
//! - [`ClientCall::dispatch_message_chunk`] - one chunk of a split message
//! - [`ClientCall::stream_write`] - one streamed resource body chunk
//! - [`ClientCall::embedder_message_ack`] - reply to an id-bearing envelope
//! - [`ClientCall::set_dock_side`] - push the persisted docking mode

use serde_json::Value;

/// One frontend function invocation, rendered with [`script`](Self::script).
#[derive(Debug, Clone)]
pub struct ClientCall {
	function: &'static str,
	args: Vec<Value>,
}

impl ClientCall {
	pub fn new(function: &'static str) -> Self {
		Self {
			function,
			args: Vec::new(),
		}
	}

	/// Appends a JSON-encoded argument.
	pub fn arg(mut self, value: impl Into<Value>) -> Self {
		self.args.push(value.into());
		self
	}

	/// `DevToolsAPI.dispatchMessage(json)` carrying a whole protocol event.
	pub fn dispatch_message(payload: &str) -> Self {
		Self::new(DISPATCH_MESSAGE).arg(payload)
	}

	/// `DevToolsAPI.dispatchMessageChunk(chunk[, total])`.
	///
	/// Only the first chunk of a split message carries the total byte length;
	/// later chunks carry the payload alone.
	pub fn dispatch_message_chunk(chunk: &str, total_size: Option<usize>) -> Self {
		let call = Self::new(DISPATCH_MESSAGE_CHUNK).arg(chunk);
		match total_size {
			Some(total) => call.arg(total),
			None => call,
		}
	}

	/// `DevToolsAPI.streamWrite(streamId, data, encoded)`.
	pub fn stream_write(stream_id: u64, data: &str, encoded: bool) -> Self {
		Self::new(STREAM_WRITE).arg(stream_id).arg(data).arg(encoded)
	}

	/// `DevToolsAPI.embedderMessageAck(requestId, resultOrNull)`.
	pub fn embedder_message_ack(request_id: i64, result: Option<Value>) -> Self {
		Self::new(EMBEDDER_MESSAGE_ACK)
			.arg(request_id)
			.arg(result.unwrap_or(Value::Null))
	}

	/// `Components.dockController.setDockSide(side)`.
	pub fn set_dock_side(side: &str) -> Self {
		Self::new(SET_DOCK_SIDE).arg(side)
	}

	/// Renders the call as an executable script string.
	pub fn script(&self) -> String {
		let args: Vec<String> = self.args.iter().map(Value::to_string).collect();
		format!("{}({});", self.function, args.join(", "))
	}
}

/// Single-shot protocol event delivery.
pub const DISPATCH_MESSAGE: &str = "DevToolsAPI.dispatchMessage";

/// Chunked protocol event delivery.
pub const DISPATCH_MESSAGE_CHUNK: &str = "DevToolsAPI.dispatchMessageChunk";

/// Streamed resource body delivery.
pub const STREAM_WRITE: &str = "DevToolsAPI.streamWrite";

/// Reply to an id-bearing frontend envelope.
pub const EMBEDDER_MESSAGE_ACK: &str = "DevToolsAPI.embedderMessageAck";

/// Docking mode push after the frontend finishes loading.
pub const SET_DOCK_SIDE: &str = "Components.dockController.setDockSide";
