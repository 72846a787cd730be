//! Encoding of streamed resource body chunks.
//!
//! Resource bodies are forwarded to the frontend chunk by chunk as they
//! arrive. Each chunk travels inside a script string, so binary data cannot
//! be passed through as-is: chunks that are not valid UTF-8 are base64
//! encoded and flagged, valid text goes through unmodified.

use base64::{Engine as _, engine::general_purpose};

/// One resource body chunk, ready for `DevToolsAPI.streamWrite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
	/// Chunk payload, base64 when [`encoded`](Self::encoded) is set.
	pub data: String,
	/// Whether [`data`](Self::data) is base64 rather than plain text.
	pub encoded: bool,
}

impl StreamChunk {
	/// Classifies raw bytes as text or binary and encodes accordingly.
	pub fn from_bytes(bytes: &[u8]) -> Self {
		match std::str::from_utf8(bytes) {
			Ok(text) => Self {
				data: text.to_owned(),
				encoded: false,
			},
			Err(_) => Self {
				data: general_purpose::STANDARD.encode(bytes),
				encoded: true,
			},
		}
	}

	/// Recovers the original bytes of the chunk.
	pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
		if self.encoded {
			general_purpose::STANDARD.decode(&self.data)
		} else {
			Ok(self.data.clone().into_bytes())
		}
	}
}
