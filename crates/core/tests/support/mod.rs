//! Shared fakes for the integration tests: a recording frontend document,
//! a scriptable agent host, and counting collaborators.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;

use dte::dte_runtime::client_eq;
use dte::{
	AgentClient, AgentHost, DevToolsView, FrontendDocument, FrontendFactory, Session,
	SessionDelegate, ViewDelegate,
};
use parking_lot::Mutex;
use serde_json::Value;

/// Records everything the session evaluates or navigates, and can report
/// its own destruction back to the session like a rendering engine would.
#[derive(Default)]
pub struct FakeFrontend {
	evals: Mutex<Vec<String>>,
	loaded_urls: Mutex<Vec<String>>,
	destroyed: AtomicUsize,
	session: OnceLock<Weak<Session>>,
}

impl FakeFrontend {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Wires the destruction signal back into `session`.
	pub fn attach_session(&self, session: &Arc<Session>) {
		self.session.set(Arc::downgrade(session)).ok();
	}

	pub fn evals(&self) -> Vec<String> {
		self.evals.lock().clone()
	}

	pub fn loaded_urls(&self) -> Vec<String> {
		self.loaded_urls.lock().clone()
	}

	pub fn destroy_count(&self) -> usize {
		self.destroyed.load(Ordering::SeqCst)
	}

	/// `dispatchMessage` payloads delivered so far.
	pub fn dispatched_messages(&self) -> Vec<String> {
		self.call_args("DevToolsAPI.dispatchMessage")
			.into_iter()
			.filter_map(|args| Some(args.first()?.as_str()?.to_owned()))
			.collect()
	}

	/// `embedderMessageAck` calls as (request id, result) pairs.
	pub fn acks(&self) -> Vec<(i64, Value)> {
		self.call_args("DevToolsAPI.embedderMessageAck")
			.into_iter()
			.filter_map(|args| {
				Some((
					args.first()?.as_i64()?,
					args.get(1).cloned().unwrap_or(Value::Null),
				))
			})
			.collect()
	}

	/// `streamWrite` calls as (stream id, data, encoded) triples.
	pub fn stream_writes(&self) -> Vec<(u64, String, bool)> {
		self.call_args("DevToolsAPI.streamWrite")
			.into_iter()
			.filter_map(|args| {
				Some((
					args.first()?.as_u64()?,
					args.get(1)?.as_str()?.to_owned(),
					args.get(2)?.as_bool()?,
				))
			})
			.collect()
	}

	/// Argument lists of every recorded call to `function`.
	pub fn call_args(&self, function: &str) -> Vec<Vec<Value>> {
		let prefix = format!("{function}(");
		self.evals
			.lock()
			.iter()
			.filter_map(|script| {
				let inner = script.strip_prefix(&prefix)?.strip_suffix(");")?;
				serde_json::from_str(&format!("[{inner}]")).ok()
			})
			.collect()
	}
}

impl FrontendDocument for FakeFrontend {
	fn eval(&self, script: &str) {
		self.evals.lock().push(script.to_owned());
	}

	fn load_url(&self, url: &str) {
		self.loaded_urls.lock().push(url.to_owned());
	}

	fn destroy(&self) {
		self.destroyed.fetch_add(1, Ordering::SeqCst);
		if let Some(session) = self.session.get().and_then(Weak::upgrade) {
			session.on_frontend_destroyed();
		}
	}
}

/// Hands out one prepared document.
pub struct FakeFactory {
	doc: Arc<FakeFrontend>,
}

impl FakeFactory {
	pub fn new(doc: Arc<FakeFrontend>) -> Arc<Self> {
		Arc::new(Self { doc })
	}
}

impl FrontendFactory for FakeFactory {
	fn create_frontend(&self) -> Arc<dyn FrontendDocument> {
		self.doc.clone()
	}
}

/// A target that tracks attached clients by identity and records every
/// protocol message forwarded to it.
#[derive(Default)]
pub struct FakeAgentHost {
	clients: Mutex<Vec<Arc<dyn AgentClient>>>,
	dispatched: Mutex<Vec<Vec<u8>>>,
	attaches: AtomicUsize,
	detaches: AtomicUsize,
}

impl FakeAgentHost {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn client_count(&self) -> usize {
		self.clients.lock().len()
	}

	pub fn attach_count(&self) -> usize {
		self.attaches.load(Ordering::SeqCst)
	}

	pub fn detach_count(&self) -> usize {
		self.detaches.load(Ordering::SeqCst)
	}

	pub fn dispatched(&self) -> Vec<String> {
		self.dispatched
			.lock()
			.iter()
			.map(|bytes| String::from_utf8_lossy(bytes).into_owned())
			.collect()
	}

	/// Emits a protocol event to every attached client.
	pub fn emit(&self, message: &str) {
		let clients: Vec<_> = self.clients.lock().clone();
		for client in clients {
			client.on_protocol_event(message.as_bytes());
		}
	}
}

impl AgentHost for FakeAgentHost {
	fn attach(&self, client: Arc<dyn AgentClient>) {
		self.attaches.fetch_add(1, Ordering::SeqCst);
		self.clients.lock().push(client);
	}

	fn detach(&self, client: &Arc<dyn AgentClient>) {
		self.detaches.fetch_add(1, Ordering::SeqCst);
		self.clients.lock().retain(|held| !client_eq(held, client));
	}

	fn dispatch_protocol_message(&self, _client: &Arc<dyn AgentClient>, message: &[u8]) {
		self.dispatched.lock().push(message.to_vec());
	}
}

/// Records view calls in order as compact event strings.
#[derive(Default)]
pub struct FakeView {
	events: Mutex<Vec<String>>,
}

impl FakeView {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn events(&self) -> Vec<String> {
		self.events.lock().clone()
	}
}

impl DevToolsView for FakeView {
	fn show(&self, activate: bool) {
		self.events.lock().push(format!("show:{activate}"));
	}

	fn close(&self) {
		self.events.lock().push("close".to_owned());
	}

	fn set_docked(&self, docked: bool, activate: bool) {
		self.events.lock().push(format!("docked:{docked}:{activate}"));
	}

	fn set_title(&self, title: &str) {
		self.events.lock().push(format!("title:{title}"));
	}
}

#[derive(Default)]
pub struct FakeDelegate {
	reloads: AtomicUsize,
	focuses: AtomicUsize,
	saves: Mutex<Vec<(String, String, bool)>>,
	appends: Mutex<Vec<(String, String)>>,
}

impl FakeDelegate {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn reload_count(&self) -> usize {
		self.reloads.load(Ordering::SeqCst)
	}

	pub fn focus_count(&self) -> usize {
		self.focuses.load(Ordering::SeqCst)
	}

	pub fn saves(&self) -> Vec<(String, String, bool)> {
		self.saves.lock().clone()
	}

	pub fn appends(&self) -> Vec<(String, String)> {
		self.appends.lock().clone()
	}
}

impl SessionDelegate for FakeDelegate {
	fn reload_inspected_page(&self) {
		self.reloads.fetch_add(1, Ordering::SeqCst);
	}

	fn save_to_file(&self, url: &str, content: &str, save_as: bool) {
		self.saves
			.lock()
			.push((url.to_owned(), content.to_owned(), save_as));
	}

	fn append_to_file(&self, url: &str, content: &str) {
		self.appends.lock().push((url.to_owned(), content.to_owned()));
	}

	fn focus_inspected_content(&self) {
		self.focuses.fetch_add(1, Ordering::SeqCst);
	}
}

#[derive(Default)]
pub struct CountingViewDelegate {
	opened: AtomicUsize,
	closed: AtomicUsize,
}

impl CountingViewDelegate {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn opened_count(&self) -> usize {
		self.opened.load(Ordering::SeqCst)
	}

	pub fn closed_count(&self) -> usize {
		self.closed.load(Ordering::SeqCst)
	}
}

impl ViewDelegate for CountingViewDelegate {
	fn devtools_opened(&self) {
		self.opened.fetch_add(1, Ordering::SeqCst);
	}

	fn devtools_closed(&self) {
		self.closed.fetch_add(1, Ordering::SeqCst);
	}
}

/// Polls `predicate` until it holds, failing the test after a few seconds.
pub async fn wait_until(what: &str, mut predicate: impl FnMut() -> bool) {
	for _ in 0..400 {
		if predicate() {
			return;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	panic!("timed out waiting for {what}");
}
