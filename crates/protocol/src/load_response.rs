//! Terminal response of a frontend-requested resource load.

use serde::{Deserialize, Serialize};

/// Status the frontend sees when a load produced no response headers.
pub const DEFAULT_SUCCESS_STATUS: u16 = 200;

/// Status reported for a URL that could not be parsed at all.
pub const INVALID_URL_STATUS: u16 = 404;

/// One response header line. Headers are kept as repeated entries so that
/// duplicate names (`Set-Cookie`, `Vary`) survive the trip to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
	pub name: String,
	pub value: String,
}

/// What a resource load resolves to, success or failure alike.
///
/// Failures surface to the frontend in the same shape as successes; only
/// the status code tells them apart. An unparsable URL is the one case
/// with no header list at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResponse {
	#[serde(rename = "statusCode")]
	pub status_code: u16,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub headers: Option<Vec<HeaderEntry>>,
}

impl LoadResponse {
	/// Terminal response carrying whatever the fetch produced.
	pub fn new(status_code: u16, headers: Vec<HeaderEntry>) -> Self {
		Self {
			status_code,
			headers: Some(headers),
		}
	}

	/// Synthetic response for a URL that never reached the network.
	pub fn not_found() -> Self {
		Self {
			status_code: INVALID_URL_STATUS,
			headers: None,
		}
	}
}

impl HeaderEntry {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}
