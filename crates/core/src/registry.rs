//! Application-wide session registry.
//!
//! Embedders that host several sessions keep them enumerable here, for a
//! "close all developer tools" action or crash-time teardown. The registry
//! holds weak references so it never extends a session's life.

use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::session::Session;

#[derive(Default)]
pub struct SessionRegistry {
	sessions: DashMap<u64, Weak<Session>>,
}

impl SessionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, session: &Arc<Session>) {
		self.sessions.insert(session.id(), Arc::downgrade(session));
	}

	pub fn get(&self, id: u64) -> Option<Arc<Session>> {
		self.sessions.get(&id).and_then(|entry| entry.upgrade())
	}

	pub fn remove(&self, id: u64) {
		self.sessions.remove(&id);
	}

	/// Every session still alive, dropping stale entries from the result
	/// (but not from the map).
	pub fn sessions(&self) -> Vec<Arc<Session>> {
		self.sessions
			.iter()
			.filter_map(|entry| entry.upgrade())
			.collect()
	}

	/// Number of live sessions.
	pub fn len(&self) -> usize {
		self.sessions
			.iter()
			.filter(|entry| entry.strong_count() > 0)
			.count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Closes every live session.
	pub fn close_all(&self) {
		for session in self.sessions() {
			session.close();
		}
	}
}
