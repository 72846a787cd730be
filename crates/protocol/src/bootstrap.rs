//! Bootstrap URL of the frontend document.

/// Base serving the hosted frontend bundles.
pub const REMOTE_FRONTEND_BASE: &str = "https://chrome-devtools-frontend.appspot.com/";

/// Path component selecting a bundle by engine revision.
pub const REMOTE_FRONTEND_PATH: &str = "serve_file";

/// Remote base URL for a given engine revision.
pub fn remote_base_url(revision: &str) -> String {
	format!("{REMOTE_FRONTEND_BASE}{REMOTE_FRONTEND_PATH}/{revision}/")
}

/// URL the frontend document is navigated to when a session opens.
///
/// `can_dock` is serialized as `"true"` or the empty string; the frontend
/// only checks the parameter for truthiness.
pub fn frontend_url(remote_base: &str, can_dock: bool) -> String {
	format!(
		"devtools://devtools/bundled/devtools_app.html?\
		 remoteBase={remote_base}&\
		 can_dock={}&\
		 toolbarColor=rgba(223,223,223,1)&\
		 textColor=rgba(0,0,0,1)&\
		 experiments=true",
		if can_dock { "true" } else { "" }
	)
}
