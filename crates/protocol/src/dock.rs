//! Docking vocabulary for the frontend window.

use serde::{Deserialize, Serialize};

/// Where the frontend docks relative to the inspected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockSide {
	Undocked,
	Bottom,
	Right,
	Left,
}

impl DockSide {
	/// The string form the frontend's dock controller understands.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Undocked => "undocked",
			Self::Bottom => "bottom",
			Self::Right => "right",
			Self::Left => "left",
		}
	}

	/// Parses a dock side name, rejecting anything unknown.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"undocked" => Some(Self::Undocked),
			"bottom" => Some(Self::Bottom),
			"right" => Some(Self::Right),
			"left" => Some(Self::Left),
			_ => None,
		}
	}
}

/// Dock-state value that disables docking entirely.
pub const DOCK_STATE_DETACH: &str = "detach";

/// Preference key holding the frontend's persisted dock side.
pub const CURRENT_DOCK_STATE_PREF: &str = "currentDockState";

/// Strips the JSON-string quoting the frontend uses when persisting the
/// dock side, e.g. `"\"right\""` becomes `"right"`.
pub fn normalize_dock_preference(raw: &str) -> String {
	raw.chars().filter(|c| *c != '"').collect()
}
