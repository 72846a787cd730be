//! Wire-level vocabulary for hosting a DevTools-style frontend.
//!
//! Everything the embedder and the frontend exchange is expressed here as
//! plain data: the script calls evaluated in the frontend document, the JSON
//! envelopes the frontend sends back, the chunk encodings used for streamed
//! resource bodies, and the bootstrap URL the frontend is navigated to.
//! The async machinery that moves these values lives in `dte-runtime`.
//!
//! # Main Types
//!
//! - [`ClientCall`] - a `DevToolsAPI.*` invocation rendered as a script string
//! - [`Envelope`] - a parsed frontend-to-embedder command message
//! - [`StreamChunk`] - one streamed resource body chunk, text or base64
//! - [`LoadResponse`] - terminal status and headers of a resource load
//! - [`DockSide`] - where the frontend docks relative to the inspected page

pub mod bootstrap;
pub mod client_call;
pub mod dock;
pub mod envelope;
pub mod limits;
pub mod load_response;
pub mod stream_chunk;

pub use bootstrap::{frontend_url, remote_base_url};
pub use client_call::ClientCall;
pub use dock::{CURRENT_DOCK_STATE_PREF, DOCK_STATE_DETACH, DockSide, normalize_dock_preference};
pub use envelope::{Envelope, EnvelopeError, is_page_reload};
pub use limits::{MAX_CHUNK_SIZE, MAX_TRANSPORT_MESSAGE_SIZE};
pub use load_response::{DEFAULT_SUCCESS_STATUS, HeaderEntry, INVALID_URL_STATUS, LoadResponse};
pub use stream_chunk::StreamChunk;
