//! Embedder runtime for hosting a debugger frontend.
//!
//! This crate carries the machinery a session needs but owns no session
//! policy itself:
//!
//! - **Channel**: script-eval dispatch into the frontend document, with
//!   chunking for oversized protocol payloads
//! - **Commands**: the closed set of embedder methods the frontend may call
//! - **Loader**: streaming resource loads with bounded exhaustion retry
//! - **Seams**: traits the embedder implements for its rendering engine
//!   ([`FrontendDocument`]), its debuggable target ([`AgentHost`]), and its
//!   network stack ([`ResourceFetcher`])

pub mod agent;
pub mod channel;
pub mod command;
pub mod error;
pub mod fetch;
pub mod frontend;
pub mod loader;

pub use agent::{AgentClient, AgentHost, client_eq};
pub use channel::MessageChannel;
pub use command::EmbedderCommand;
pub use error::{Error, Result};
pub use fetch::{
	BodyStream, FetchRequest, FetchResponse, FileFetcher, HttpFetcher, ResourceFetcher,
	parse_header_block,
};
pub use frontend::{Frontend, FrontendDocument, FrontendFactory};
pub use loader::{
	INITIAL_BACKOFF_DELAY, LoadCallback, LoaderRegistry, MAX_BACKOFF_DELAY, PendingLoad,
	ResourceLoader, next_backoff_delay,
};
