//! One debugging session: a frontend document bound to an inspected target.
//!
//! The session is the policy layer. It decides when the frontend document
//! exists, when the protocol attachment to the target is live, and what
//! each embedder command from the frontend does. Mechanics live in the
//! runtime crate; collaborators (view, delegates, preference store) are
//! injected at construction.
//!
//! Lifecycle walkthrough:
//!
//! 1. [`Session::show`] creates or adopts a frontend document, attaches to
//!    the target, and navigates the document to the bootstrap URL.
//! 2. The frontend calls back `loadCompleted` once it is ready; the session
//!    reveals the view and pushes docking state.
//! 3. Protocol traffic flows both ways until [`Session::close`] or the
//!    document's destruction tears the session down.
//!
//! Locking rule: the state mutex is never held across a call into a
//! collaborator (document, view, delegate, agent host). Collaborators may
//! re-enter the session synchronously, destruction signals in particular.
//!
//! # Main Types
//!
//! - [`Session`]: the controller itself
//! - [`Lifecycle`]: where the frontend document is in its life

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dte_protocol::{
	CURRENT_DOCK_STATE_PREF, ClientCall, DOCK_STATE_DETACH, DockSide, Envelope, frontend_url,
	is_page_reload, normalize_dock_preference,
};
use dte_runtime::{
	AgentClient, AgentHost, EmbedderCommand, FileFetcher, Frontend, FrontendDocument,
	FrontendFactory, HttpFetcher, LoaderRegistry, MessageChannel, ResourceFetcher, ResourceLoader,
	parse_header_block,
};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::builder::SessionBuilder;
use crate::delegate::{
	DevToolsView, NoopDelegate, NoopView, NoopViewDelegate, SessionDelegate, ViewDelegate,
};
use crate::extensions::ExtensionScripts;
use crate::prefs::{MemoryPrefs, PreferenceStore};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

const DEV_TOOLS_TITLE_PREFIX: &str = "Developer Tools - ";

/// Frontend document lifecycle. The protocol attachment to the target is
/// tracked separately; see [`Session::is_attached`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
	/// No frontend document yet.
	Idle,
	/// Document created and navigating to the bootstrap URL.
	Opening,
	/// Frontend reported `loadCompleted`; protocol traffic flows.
	Loaded,
	/// Frontend was closed or its document destroyed.
	Closed,
}

struct SessionState {
	lifecycle: Lifecycle,
	frontend: Option<Frontend>,
	/// Embedder-hosted document adopted on the next `show`, if any.
	external_frontend: Option<Arc<dyn FrontendDocument>>,
	agent: Option<Arc<dyn AgentHost>>,
	activate_on_show: bool,
	can_dock: bool,
	dock_side: Option<DockSide>,
	/// Guards `devtools_closed` so destruction after an explicit close
	/// still notifies exactly once.
	closed_notified: bool,
}

/// The binding between one frontend document and one inspected target.
pub struct Session {
	id: u64,
	channel: Arc<MessageChannel>,
	loaders: Arc<LoaderRegistry>,
	http_fetcher: Arc<dyn ResourceFetcher>,
	file_fetcher: Arc<dyn ResourceFetcher>,
	prefs: Arc<dyn PreferenceStore>,
	delegate: Arc<dyn SessionDelegate>,
	view: Arc<dyn DevToolsView>,
	view_delegate: Arc<dyn ViewDelegate>,
	extensions: ExtensionScripts,
	target: Arc<dyn AgentHost>,
	frontend_factory: Option<Arc<dyn FrontendFactory>>,
	is_guest: bool,
	remote_base: String,
	injection_seq: AtomicU64,
	state: Mutex<SessionState>,
}

impl Session {
	pub(crate) fn from_builder(builder: SessionBuilder) -> Arc<Self> {
		let SessionBuilder {
			target,
			frontend_factory,
			external_frontend,
			view,
			view_delegate,
			delegate,
			prefs,
			http_fetcher,
			file_fetcher,
			max_chunk_size,
			remote_base,
			dock_state,
			guest,
		} = builder;
		let channel = match max_chunk_size {
			Some(max) => MessageChannel::with_max_chunk_size(max),
			None => MessageChannel::new(),
		};
		let session = Arc::new(Self {
			id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
			channel: Arc::new(channel),
			loaders: Arc::new(LoaderRegistry::new()),
			http_fetcher: http_fetcher.unwrap_or_else(|| Arc::new(HttpFetcher::default())),
			file_fetcher: file_fetcher.unwrap_or_else(|| Arc::new(FileFetcher)),
			prefs: prefs.unwrap_or_else(|| Arc::new(MemoryPrefs::new())),
			delegate: delegate.unwrap_or_else(|| Arc::new(NoopDelegate)),
			view: view.unwrap_or_else(|| Arc::new(NoopView)),
			view_delegate: view_delegate.unwrap_or_else(|| Arc::new(NoopViewDelegate)),
			extensions: ExtensionScripts::new(),
			target,
			frontend_factory,
			is_guest: guest,
			remote_base: remote_base.unwrap_or_default(),
			injection_seq: AtomicU64::new(0),
			state: Mutex::new(SessionState {
				lifecycle: Lifecycle::Idle,
				frontend: None,
				external_frontend,
				agent: None,
				activate_on_show: true,
				can_dock: true,
				dock_side: None,
				closed_notified: true,
			}),
		});
		if let Some(state) = dock_state {
			session.set_dock_state(&state);
		}
		session
	}

	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.state.lock().lifecycle
	}

	pub fn is_loaded(&self) -> bool {
		self.lifecycle() == Lifecycle::Loaded
	}

	pub fn is_attached(&self) -> bool {
		self.state.lock().agent.is_some()
	}

	pub fn can_dock(&self) -> bool {
		self.state.lock().can_dock
	}

	pub fn dock_side(&self) -> Option<DockSide> {
		self.state.lock().dock_side
	}

	/// In-flight resource loads started for this session's frontend.
	pub fn loaders(&self) -> &LoaderRegistry {
		&self.loaders
	}

	/// Opens the frontend, creating or adopting a document as configured.
	///
	/// Showing an already-open session only brings the view forward. A
	/// session with neither an external document nor a factory logs and
	/// ignores the request.
	pub fn show(self: &Arc<Self>, activate: bool) {
		let mut state = self.state.lock();
		if state.frontend.is_some() {
			let owned = state.frontend.as_ref().is_some_and(Frontend::is_owned);
			state.activate_on_show = activate;
			drop(state);
			if owned {
				self.view.show(activate);
			}
			return;
		}
		let frontend = if let Some(doc) = &state.external_frontend {
			Frontend::External(doc.clone())
		} else if let Some(factory) = &self.frontend_factory {
			Frontend::Owned(factory.create_frontend())
		} else {
			drop(state);
			warn!(
				target = "dte.session",
				session = self.id,
				"no frontend document source configured, ignoring show"
			);
			return;
		};
		let doc = frontend.document().clone();
		let can_dock = state.can_dock;
		state.lifecycle = Lifecycle::Opening;
		state.frontend = Some(frontend);
		state.activate_on_show = activate;
		state.closed_notified = false;
		drop(state);

		debug!(target = "dte.session", session = self.id, activate, "opening frontend");
		self.channel.bind(doc.clone());
		self.attach_to(self.target.clone());
		doc.load_url(&frontend_url(&self.remote_base, can_dock));
	}

	/// Binds the protocol client to `host`, detaching any prior binding
	/// first. Detach-then-attach is unconditional so a double attach can
	/// never hold two live attachments.
	pub fn attach_to(self: &Arc<Self>, host: Arc<dyn AgentHost>) {
		self.detach();
		self.state.lock().agent = Some(host.clone());
		host.attach(self.client_arc());
	}

	/// Releases the target binding. A no-op when already detached.
	pub fn detach(self: &Arc<Self>) {
		let host = self.state.lock().agent.take();
		if let Some(host) = host {
			host.detach(&self.client_arc());
		}
	}

	/// Detaches and immediately re-attaches to the current target,
	/// resetting protocol state without recreating the frontend. A no-op
	/// when no target is bound.
	pub fn reattach(self: &Arc<Self>) {
		let host = self.state.lock().agent.clone();
		if let Some(host) = host {
			self.attach_to(host);
		}
	}

	/// Tears the frontend down. Owned documents are destroyed, external
	/// ones released; either way the channel stops delivering and the
	/// target binding drops. Idempotent.
	pub fn close(self: &Arc<Self>) {
		let mut state = self.state.lock();
		let Some(frontend) = state.frontend.take() else {
			return;
		};
		state.lifecycle = Lifecycle::Closed;
		drop(state);

		debug!(target = "dte.session", session = self.id, "closing frontend");
		self.channel.unbind();
		self.detach();
		if frontend.is_owned() {
			self.view.close();
		}
		frontend.close();
		if !self.is_guest {
			self.delegate.focus_inspected_content();
		}
	}

	/// The frontend document was destroyed, possibly out-of-band. Clears
	/// every reference to it, detaches, and notifies the view delegate
	/// once across any close/destroy sequence.
	pub fn on_frontend_destroyed(self: &Arc<Self>) {
		let mut state = self.state.lock();
		if state.frontend.is_none() && state.lifecycle == Lifecycle::Idle {
			return;
		}
		state.frontend.take();
		state.external_frontend.take();
		state.lifecycle = Lifecycle::Closed;
		let notify = !state.closed_notified;
		state.closed_notified = true;
		drop(state);

		debug!(target = "dte.session", session = self.id, "frontend document destroyed");
		self.detach();
		self.channel.unbind();
		if notify {
			self.view_delegate.devtools_closed();
		}
	}

	/// A subframe inside the frontend finished navigating. Injects the
	/// registered extension bootstrap script for the frame's origin, if
	/// one exists.
	pub fn frontend_navigated(&self, url: &str) {
		let Ok(parsed) = Url::parse(url) else {
			return;
		};
		let Some(host) = parsed.host_str() else {
			return;
		};
		let origin = match parsed.port() {
			Some(port) => format!("{}://{host}:{port}/", parsed.scheme()),
			None => format!("{}://{host}/", parsed.scheme()),
		};
		let Some(script) = self.extensions.lookup(&origin) else {
			return;
		};
		let token = self.injection_seq.fetch_add(1, Ordering::Relaxed);
		debug!(
			target = "dte.session",
			session = self.id,
			origin,
			"injecting extension bootstrap"
		);
		self.channel.eval(&format!("{script}(\"{}-{token}\")", self.id));
	}

	/// Sets the requested docking mode before the frontend opens.
	/// `"detach"` disables docking entirely; any dock side enables it.
	pub fn set_dock_state(&self, state: &str) {
		let mut guard = self.state.lock();
		if state == DOCK_STATE_DETACH {
			guard.can_dock = false;
		} else {
			guard.can_dock = true;
			match DockSide::parse(state) {
				Some(side) => guard.dock_side = Some(side),
				None if state.is_empty() => {}
				None => {
					debug!(
						target = "dte.session",
						session = self.id,
						state,
						"ignoring unknown dock state"
					);
				}
			}
		}
	}

	/// Hands the session an embedder-hosted frontend document to adopt on
	/// the next `show`. Ignored while a frontend is already open.
	pub fn set_frontend_document(&self, document: Arc<dyn FrontendDocument>) {
		let mut state = self.state.lock();
		if state.frontend.is_none() {
			state.external_frontend = Some(document);
		}
	}

	/// Entry point for raw frontend envelopes. Malformed or unsupported
	/// messages are logged and dropped; they never fail the session.
	pub fn handle_frontend_message(self: &Arc<Self>, raw: &str) {
		let envelope = match Envelope::parse(raw) {
			Ok(envelope) => envelope,
			Err(err) => {
				error!(
					target = "dte.channel",
					session = self.id,
					error = %err,
					"invalid message was sent to embedder"
				);
				return;
			}
		};
		let command = match EmbedderCommand::from_envelope(&envelope) {
			Ok(command) => command,
			Err(err) => {
				error!(
					target = "dte.channel",
					session = self.id,
					method = %envelope.method,
					error = %err,
					"invalid message was sent to embedder"
				);
				return;
			}
		};
		self.execute(envelope.id, command);
	}

	fn execute(self: &Arc<Self>, id: i64, command: EmbedderCommand) {
		match command {
			EmbedderCommand::DispatchProtocolMessage { message } => {
				if is_page_reload(&message) {
					self.delegate.reload_inspected_page();
				} else {
					let agent = self.state.lock().agent.clone();
					if let Some(agent) = agent {
						agent.dispatch_protocol_message(&self.client_arc(), message.as_bytes());
					}
				}
				self.ack(id, None);
			}
			EmbedderCommand::CloseWindow => {
				self.close();
				self.ack(id, None);
			}
			EmbedderCommand::LoadCompleted => {
				self.load_completed();
				self.ack(id, None);
			}
			EmbedderCommand::InspectedUrlChanged { url } => {
				let owned = self
					.state
					.lock()
					.frontend
					.as_ref()
					.is_some_and(Frontend::is_owned);
				if owned {
					self.view.set_title(&format!("{DEV_TOOLS_TITLE_PREFIX}{url}"));
				}
				self.ack(id, None);
			}
			EmbedderCommand::LoadNetworkResource {
				url,
				headers,
				stream_id,
			} => {
				let weak = Arc::downgrade(self);
				ResourceLoader::start(
					stream_id,
					&url,
					parse_header_block(&headers),
					self.fetcher_for(&url),
					self.channel.clone(),
					self.loaders.clone(),
					Box::new(move |response| {
						// The session may have closed while the load ran.
						if let Some(session) = weak.upgrade() {
							let result = serde_json::to_value(&response).unwrap_or(Value::Null);
							session.ack(id, Some(result));
						}
					}),
				);
			}
			EmbedderCommand::SetIsDocked { docked } => {
				let (owned, activate) = {
					let state = self.state.lock();
					(
						state.frontend.as_ref().is_some_and(Frontend::is_owned),
						state.activate_on_show,
					)
				};
				if owned {
					self.view.set_docked(docked, activate);
				}
				self.ack(id, None);
			}
			EmbedderCommand::Reattach => {
				self.reattach();
				// Acked whether or not a target was bound.
				self.ack(id, None);
			}
			EmbedderCommand::GetPreferences => {
				self.ack(id, Some(Value::Object(self.prefs.get_all())));
			}
			EmbedderCommand::SetPreference { name, value } => {
				self.prefs.set(&name, &value);
				self.ack(id, None);
			}
			EmbedderCommand::RemovePreference { name } => {
				self.prefs.remove(&name);
				self.ack(id, None);
			}
			EmbedderCommand::ClearPreferences => {
				self.prefs.clear();
				self.ack(id, None);
			}
			EmbedderCommand::RegisterExtensionsApi { origin, script } => {
				self.extensions.register(&origin, &script);
				self.ack(id, None);
			}
			EmbedderCommand::SaveToFile {
				url,
				content,
				save_as,
			} => {
				self.delegate.save_to_file(&url, &content, save_as);
				self.ack(id, None);
			}
			EmbedderCommand::AppendToFile { url, content } => {
				self.delegate.append_to_file(&url, &content);
				self.ack(id, None);
			}
		}
	}

	fn load_completed(self: &Arc<Self>) {
		let mut state = self.state.lock();
		if state.lifecycle != Lifecycle::Opening {
			debug!(
				target = "dte.session",
				session = self.id,
				lifecycle = ?state.lifecycle,
				"ignoring loadCompleted outside of opening"
			);
			return;
		}
		state.lifecycle = Lifecycle::Loaded;
		let owned = state.frontend.as_ref().is_some_and(Frontend::is_owned);
		let activate = state.activate_on_show;
		let can_dock = state.can_dock;
		let dock_side = state.dock_side;
		drop(state);

		debug!(target = "dte.session", session = self.id, "frontend loaded");
		if owned {
			self.view.show(activate);
		}
		if !can_dock {
			if owned {
				self.view.set_docked(false, activate);
			}
		} else {
			let side = match dock_side {
				Some(side) => Some(side),
				None => {
					let parsed = self
						.prefs
						.get(CURRENT_DOCK_STATE_PREF)
						.and_then(|raw| DockSide::parse(&normalize_dock_preference(&raw)));
					if let Some(side) = parsed {
						self.state.lock().dock_side = Some(side);
					}
					parsed
				}
			};
			if let Some(side) = side {
				self.channel
					.eval(&ClientCall::set_dock_side(side.as_str()).script());
			}
		}
		self.view_delegate.devtools_opened();
	}

	fn fetcher_for(&self, url: &str) -> Arc<dyn ResourceFetcher> {
		let is_file = Url::parse(url).is_ok_and(|parsed| parsed.scheme() == "file");
		if is_file {
			self.file_fetcher.clone()
		} else {
			self.http_fetcher.clone()
		}
	}

	fn ack(&self, request_id: i64, result: Option<Value>) {
		if request_id != 0 {
			self.channel.ack(request_id, result);
		}
	}

	fn client_arc(self: &Arc<Self>) -> Arc<dyn AgentClient> {
		Arc::clone(self) as Arc<dyn AgentClient>
	}
}

impl AgentClient for Session {
	fn on_protocol_event(&self, message: &[u8]) {
		if !self.is_loaded() {
			return;
		}
		self.channel
			.deliver_to_frontend(&String::from_utf8_lossy(message));
	}

	fn on_agent_detached(&self) {
		debug!(target = "dte.session", session = self.id, "target dropped the attachment");
		self.state.lock().agent.take();
	}
}
