//! Embedder bridge for hosting a DevTools-style debugger frontend.
//!
//! An embedding application uses this crate to open a debugger UI against
//! an inspected target it controls:
//!
//! - **Session**: the lifecycle controller binding one frontend document
//!   to one target, from `show` through `loadCompleted` to teardown
//! - **Embedder commands**: the frontend drives the embedder over a JSON
//!   envelope protocol (protocol forwarding, docking, preferences, file
//!   save, resource loads)
//! - **Collaborator seams**: windowing, file dialogs, and the rendering
//!   engine stay outside; the session calls them through injected traits
//!
//! Construction goes through [`SessionBuilder`]; multi-session embedders
//! keep a [`SessionRegistry`] for enumeration and bulk close.

pub mod builder;
pub mod delegate;
pub mod extensions;
pub mod prefs;
pub mod registry;
pub mod session;

pub use builder::SessionBuilder;
pub use delegate::{DevToolsView, SessionDelegate, ViewDelegate};
pub use extensions::ExtensionScripts;
pub use prefs::{MemoryPrefs, PreferenceStore};
pub use registry::SessionRegistry;
pub use session::{Lifecycle, Session};

// Re-export the protocol and runtime layers for embedders that implement
// the seam traits or speak the wire types directly.
pub use dte_protocol;
pub use dte_runtime;
pub use dte_runtime::{
	AgentClient, AgentHost, Frontend, FrontendDocument, FrontendFactory, MessageChannel,
	ResourceFetcher,
};
