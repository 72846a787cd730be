//! Frontend document abstraction.
//!
//! The rendering engine hosting the frontend UI is not part of this crate;
//! embedders adapt it behind [`FrontendDocument`]. A session either creates
//! its own document through a [`FrontendFactory`] or is handed one that the
//! embedder hosts itself; [`Frontend`] keeps that ownership distinction
//! explicit so teardown destroys exactly what the session created.

use std::sync::Arc;

/// A live frontend document the embedder can drive.
///
/// All operations are fire-and-forget notifications into the rendering
/// engine; a document that is already gone ignores them.
pub trait FrontendDocument: Send + Sync {
	/// Evaluates a script in the document's main frame.
	fn eval(&self, script: &str);

	/// Navigates the document.
	fn load_url(&self, url: &str);

	/// Tears the document down. Only ever invoked on documents the session
	/// owns; the engine is expected to signal destruction back through
	/// the session afterwards.
	fn destroy(&self);
}

/// Creates frontend documents for sessions that manage their own.
pub trait FrontendFactory: Send + Sync {
	fn create_frontend(&self) -> Arc<dyn FrontendDocument>;
}

/// A frontend document together with its ownership rule.
#[derive(Clone)]
pub enum Frontend {
	/// Created by the session; destroyed by the session on close.
	Owned(Arc<dyn FrontendDocument>),
	/// Supplied by the embedder; released but never destroyed.
	External(Arc<dyn FrontendDocument>),
}

impl Frontend {
	pub fn document(&self) -> &Arc<dyn FrontendDocument> {
		match self {
			Self::Owned(doc) | Self::External(doc) => doc,
		}
	}

	pub fn is_owned(&self) -> bool {
		matches!(self, Self::Owned(_))
	}

	/// Applies the ownership rule at teardown: owned documents are
	/// destroyed, external ones are just dropped.
	pub fn close(self) {
		if let Self::Owned(doc) = self {
			doc.destroy();
		}
	}
}

impl std::fmt::Debug for Frontend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Owned(_) => f.write_str("Frontend::Owned"),
			Self::External(_) => f.write_str("Frontend::External"),
		}
	}
}
