//! Debuggable-target seam.
//!
//! A session talks to whatever it is inspecting through [`AgentHost`], and
//! the target talks back through [`AgentClient`]. Hosts track their clients
//! by identity: a client that attaches twice with the same `Arc` is still
//! one attachment, and detach only removes the exact client that asked.

use std::sync::Arc;

/// Receives traffic from the inspected target.
pub trait AgentClient: Send + Sync {
	/// A protocol event or command response produced by the target.
	fn on_protocol_event(&self, message: &[u8]);

	/// The target went away or force-detached this client.
	fn on_agent_detached(&self) {}
}

/// A debuggable target that protocol clients attach to.
pub trait AgentHost: Send + Sync {
	fn attach(&self, client: Arc<dyn AgentClient>);

	fn detach(&self, client: &Arc<dyn AgentClient>);

	/// Forwards a protocol command from `client` to the target.
	fn dispatch_protocol_message(&self, client: &Arc<dyn AgentClient>, message: &[u8]);
}

/// Identity comparison for attached clients.
///
/// Hosts key their client sets on the `Arc` allocation, not on pointer
/// casts, so two fat pointers to the same allocation compare equal.
pub fn client_eq(a: &Arc<dyn AgentClient>, b: &Arc<dyn AgentClient>) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Silent;

	impl AgentClient for Silent {
		fn on_protocol_event(&self, _message: &[u8]) {}
	}

	#[test]
	fn client_identity_follows_the_allocation() {
		let a: Arc<dyn AgentClient> = Arc::new(Silent);
		let b = a.clone();
		let c: Arc<dyn AgentClient> = Arc::new(Silent);
		assert!(client_eq(&a, &b));
		assert!(!client_eq(&a, &c));
	}
}
