//! Error types for the embedder runtime.

use std::error::Error as _;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while dispatching embedder commands or loading
/// resources for the frontend.
#[derive(Debug, Error)]
pub enum Error {
	/// The resource URL could not be parsed or mapped to a path.
	#[error("invalid resource URL: {0}")]
	InvalidUrl(String),

	/// The fetch failed because the system ran out of resources.
	///
	/// The one failure class the resource loader retries with backoff;
	/// everything else is terminal on first occurrence.
	#[error("fetch failed: insufficient resources")]
	ResourceExhaustion,

	/// HTTP-level fetch failure.
	#[error(transparent)]
	Http(#[from] reqwest::Error),

	/// I/O failure on the file fetch path.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// The frontend used an embedder method this build does not support.
	#[error("unsupported embedder method: {0}")]
	UnknownMethod(String),

	/// The envelope's params did not match the method's signature.
	#[error("invalid parameters for {method}: {reason}")]
	InvalidParams { method: String, reason: String },
}

impl Error {
	/// Whether this failure is the transient resource-exhaustion class the
	/// loader retries.
	pub fn is_resource_exhaustion(&self) -> bool {
		match self {
			Self::ResourceExhaustion => true,
			Self::Io(err) => err.kind() == std::io::ErrorKind::OutOfMemory,
			Self::Http(err) => {
				let mut source = err.source();
				while let Some(inner) = source {
					if let Some(io) = inner.downcast_ref::<std::io::Error>() {
						return io.kind() == std::io::ErrorKind::OutOfMemory;
					}
					source = inner.source();
				}
				false
			}
			_ => false,
		}
	}
}
