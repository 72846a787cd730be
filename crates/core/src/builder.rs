//! Session construction.

use std::sync::Arc;

use dte_runtime::{AgentHost, FrontendDocument, FrontendFactory, ResourceFetcher};

use crate::delegate::{DevToolsView, SessionDelegate, ViewDelegate};
use crate::prefs::PreferenceStore;
use crate::session::Session;

/// Builder for [`Session`]. Only the inspected target is required; every
/// collaborator left unset falls back to a no-op or stock implementation.
pub struct SessionBuilder {
	pub(crate) target: Arc<dyn AgentHost>,
	pub(crate) frontend_factory: Option<Arc<dyn FrontendFactory>>,
	pub(crate) external_frontend: Option<Arc<dyn FrontendDocument>>,
	pub(crate) view: Option<Arc<dyn DevToolsView>>,
	pub(crate) view_delegate: Option<Arc<dyn ViewDelegate>>,
	pub(crate) delegate: Option<Arc<dyn SessionDelegate>>,
	pub(crate) prefs: Option<Arc<dyn PreferenceStore>>,
	pub(crate) http_fetcher: Option<Arc<dyn ResourceFetcher>>,
	pub(crate) file_fetcher: Option<Arc<dyn ResourceFetcher>>,
	pub(crate) max_chunk_size: Option<usize>,
	pub(crate) remote_base: Option<String>,
	pub(crate) dock_state: Option<String>,
	pub(crate) guest: bool,
}

impl SessionBuilder {
	/// Starts a builder for a session inspecting `target`.
	pub fn new(target: Arc<dyn AgentHost>) -> Self {
		Self {
			target,
			frontend_factory: None,
			external_frontend: None,
			view: None,
			view_delegate: None,
			delegate: None,
			prefs: None,
			http_fetcher: None,
			file_fetcher: None,
			max_chunk_size: None,
			remote_base: None,
			dock_state: None,
			guest: false,
		}
	}

	/// Factory for session-owned frontend documents.
	pub fn frontend_factory(mut self, factory: Arc<dyn FrontendFactory>) -> Self {
		self.frontend_factory = Some(factory);
		self
	}

	/// An embedder-hosted document to adopt instead of creating one.
	/// Takes precedence over the factory.
	pub fn external_frontend(mut self, document: Arc<dyn FrontendDocument>) -> Self {
		self.external_frontend = Some(document);
		self
	}

	/// The window or panel hosting an owned frontend.
	pub fn view(mut self, view: Arc<dyn DevToolsView>) -> Self {
		self.view = Some(view);
		self
	}

	pub fn view_delegate(mut self, delegate: Arc<dyn ViewDelegate>) -> Self {
		self.view_delegate = Some(delegate);
		self
	}

	pub fn delegate(mut self, delegate: Arc<dyn SessionDelegate>) -> Self {
		self.delegate = Some(delegate);
		self
	}

	/// Preference backend; defaults to an in-memory store.
	pub fn prefs(mut self, prefs: Arc<dyn PreferenceStore>) -> Self {
		self.prefs = Some(prefs);
		self
	}

	/// Fetcher for network-scheme resource loads.
	pub fn http_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
		self.http_fetcher = Some(fetcher);
		self
	}

	/// Fetcher for `file:` resource loads.
	pub fn file_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
		self.file_fetcher = Some(fetcher);
		self
	}

	/// Overrides the outbound protocol chunk budget.
	pub fn max_chunk_size(mut self, max: usize) -> Self {
		self.max_chunk_size = Some(max);
		self
	}

	/// Base URL the bootstrap page loads frontend assets from.
	pub fn remote_base(mut self, base: impl Into<String>) -> Self {
		self.remote_base = Some(base.into());
		self
	}

	/// Initial docking request, a dock side or `"detach"`.
	pub fn dock_state(mut self, state: impl Into<String>) -> Self {
		self.dock_state = Some(state.into());
		self
	}

	/// Marks a guest session; closing one leaves focus where it is.
	pub fn guest(mut self, guest: bool) -> Self {
		self.guest = guest;
		self
	}

	pub fn build(self) -> Arc<Session> {
		Session::from_builder(self)
	}
}
