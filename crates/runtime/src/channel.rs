//! Outbound channel from the embedder into the frontend document.
//!
//! Everything the embedder tells the frontend travels as a script evaluated
//! in the document's main frame. The channel owns two policies on top of
//! that: nothing is delivered while no document is bound, and protocol
//! payloads wider than the chunk budget are split across several
//! `dispatchMessageChunk` calls so no single evaluation exceeds what the
//! transport underneath tolerates.

use std::sync::Arc;

use dte_protocol::{ClientCall, MAX_CHUNK_SIZE, StreamChunk};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::frontend::FrontendDocument;

/// Dispatches embedder-to-frontend calls into the bound document.
pub struct MessageChannel {
	frontend: Mutex<Option<Arc<dyn FrontendDocument>>>,
	max_chunk_size: usize,
}

impl MessageChannel {
	pub fn new() -> Self {
		Self::with_max_chunk_size(MAX_CHUNK_SIZE)
	}

	/// A channel with a custom chunk budget. The budget only bounds
	/// protocol payload splitting; scripts built from already-bounded
	/// calls are evaluated as-is.
	pub fn with_max_chunk_size(max_chunk_size: usize) -> Self {
		Self {
			frontend: Mutex::new(None),
			max_chunk_size,
		}
	}

	pub fn max_chunk_size(&self) -> usize {
		self.max_chunk_size
	}

	pub fn bind(&self, document: Arc<dyn FrontendDocument>) {
		*self.frontend.lock() = Some(document);
	}

	pub fn unbind(&self) {
		self.frontend.lock().take();
	}

	pub fn is_bound(&self) -> bool {
		self.frontend.lock().is_some()
	}

	/// Delivers a protocol message to the frontend, chunking when the
	/// payload exceeds the budget. The first chunk of a split message
	/// carries the total byte size so the frontend can reassemble.
	pub fn deliver_to_frontend(&self, payload: &str) {
		let Some(doc) = self.document() else {
			return;
		};
		if payload.len() <= self.max_chunk_size {
			doc.eval(&ClientCall::dispatch_message(payload).script());
			return;
		}
		let total = payload.len();
		debug!(
			target = "dte.channel",
			total,
			max = self.max_chunk_size,
			"splitting oversized frontend dispatch"
		);
		let mut rest = payload;
		let mut first = true;
		while !rest.is_empty() {
			let end = chunk_end(rest, self.max_chunk_size);
			let (chunk, tail) = rest.split_at(end);
			let call = ClientCall::dispatch_message_chunk(chunk, first.then_some(total));
			doc.eval(&call.script());
			first = false;
			rest = tail;
		}
	}

	/// Appends a body chunk to the frontend-side stream `stream_id`.
	pub fn stream_write(&self, stream_id: u64, chunk: &StreamChunk) {
		let Some(doc) = self.document() else {
			return;
		};
		let call = ClientCall::stream_write(stream_id, &chunk.data, chunk.encoded);
		doc.eval(&call.script());
	}

	/// Acknowledges embedder command `request_id`, optionally with a result.
	pub fn ack(&self, request_id: i64, result: Option<Value>) {
		let Some(doc) = self.document() else {
			return;
		};
		doc.eval(&ClientCall::embedder_message_ack(request_id, result).script());
	}

	/// Evaluates an arbitrary script in the bound document.
	pub fn eval(&self, script: &str) {
		let Some(doc) = self.document() else {
			return;
		};
		doc.eval(script);
	}

	fn document(&self) -> Option<Arc<dyn FrontendDocument>> {
		self.frontend.lock().clone()
	}
}

impl Default for MessageChannel {
	fn default() -> Self {
		Self::new()
	}
}

/// Largest prefix of `payload` within `max` bytes that ends on a char
/// boundary. A scalar wider than the whole budget is taken in full so the
/// split always makes progress.
fn chunk_end(payload: &str, max: usize) -> usize {
	if payload.len() <= max {
		return payload.len();
	}
	let mut end = max;
	while end > 0 && !payload.is_char_boundary(end) {
		end -= 1;
	}
	if end == 0 {
		end = payload.chars().next().map_or(payload.len(), char::len_utf8);
	}
	end
}
