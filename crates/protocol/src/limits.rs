//! Transport sizing constants.

/// Largest message the embedder transport accepts, in bytes (128 MiB).
pub const MAX_TRANSPORT_MESSAGE_SIZE: usize = 128 * 1024 * 1024;

/// Largest payload delivered to the frontend in a single call.
///
/// A quarter of the transport limit, leaving headroom for other traffic
/// sharing the channel. Payloads above this are split into ordered chunks.
pub const MAX_CHUNK_SIZE: usize = MAX_TRANSPORT_MESSAGE_SIZE / 4;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn chunk_size_is_a_quarter_of_the_transport_limit() {
		assert_eq!(MAX_CHUNK_SIZE, 32 * 1024 * 1024);
		assert_eq!(MAX_CHUNK_SIZE * 4, MAX_TRANSPORT_MESSAGE_SIZE);
	}
}
