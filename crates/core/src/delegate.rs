//! Embedder-side collaborators of a session.
//!
//! A session never touches windows, files, or focus itself; it narrates
//! through these traits and the embedder decides what, if anything, to do.
//! Every method defaults to a no-op so embedders implement only what their
//! shell supports.

/// Actions the frontend asks the embedder to perform.
pub trait SessionDelegate: Send + Sync {
	/// The frontend intercepted a page reload; the embedder should reload
	/// the inspected content.
	fn reload_inspected_page(&self) {}

	/// `save`: write `content` to a file chosen for `url`, prompting when
	/// `save_as` is set or no file is on record yet.
	fn save_to_file(&self, _url: &str, _content: &str, _save_as: bool) {}

	/// `append`: append `content` to the file previously saved for `url`.
	fn append_to_file(&self, _url: &str, _content: &str) {}

	/// The frontend went away; focus belongs to the inspected content.
	fn focus_inspected_content(&self) {}
}

/// The window or panel hosting a session-owned frontend. Sessions only
/// drive the view for frontends they created themselves.
pub trait DevToolsView: Send + Sync {
	fn show(&self, _activate: bool) {}

	fn close(&self) {}

	fn set_docked(&self, _docked: bool, _activate: bool) {}

	fn set_title(&self, _title: &str) {}
}

/// Observes the open/closed edges of the frontend UI.
pub trait ViewDelegate: Send + Sync {
	fn devtools_opened(&self) {}

	fn devtools_closed(&self) {}
}

pub(crate) struct NoopDelegate;

impl SessionDelegate for NoopDelegate {}

pub(crate) struct NoopView;

impl DevToolsView for NoopView {}

pub(crate) struct NoopViewDelegate;

impl ViewDelegate for NoopViewDelegate {}
