//! Embedder command surface.
//!
//! The frontend drives the embedder through a closed set of methods. Every
//! inbound envelope either binds to one [`EmbedderCommand`] variant or is
//! rejected; there is no passthrough for methods this build does not know.

use dte_protocol::Envelope;
use serde_json::Value;

use crate::error::{Error, Result};

/// A fully bound embedder command, parsed from a frontend envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedderCommand {
	/// Forward a protocol command to the inspected target.
	DispatchProtocolMessage { message: String },
	/// The frontend asked its window to close.
	CloseWindow,
	/// The frontend finished loading and is ready for traffic.
	LoadCompleted,
	/// The inspected page navigated; the window title follows it.
	InspectedUrlChanged { url: String },
	/// Stream a resource body to the frontend-side stream `stream_id`.
	LoadNetworkResource {
		url: String,
		headers: String,
		stream_id: u64,
	},
	/// The frontend docked into or undocked from the inspected view.
	SetIsDocked { docked: bool },
	/// Re-establish the protocol attachment to the current target.
	Reattach,
	GetPreferences,
	SetPreference { name: String, value: String },
	RemovePreference { name: String },
	ClearPreferences,
	/// An extension origin registered its API bootstrap script.
	RegisterExtensionsApi { origin: String, script: String },
	/// Write `content` to the file picked for `url`.
	SaveToFile {
		url: String,
		content: String,
		save_as: bool,
	},
	/// Append `content` to the file previously saved for `url`.
	AppendToFile { url: String, content: String },
}

impl EmbedderCommand {
	/// Binds an envelope to a command, validating method and params.
	pub fn from_envelope(envelope: &Envelope) -> Result<Self> {
		let command = match envelope.method.as_str() {
			"dispatchProtocolMessage" => Self::DispatchProtocolMessage {
				message: str_param(envelope, 0)?,
			},
			"closeWindow" => Self::CloseWindow,
			"loadCompleted" => Self::LoadCompleted,
			"inspectedURLChanged" => Self::InspectedUrlChanged {
				url: str_param(envelope, 0)?,
			},
			"loadNetworkResource" => Self::LoadNetworkResource {
				url: str_param(envelope, 0)?,
				headers: str_param(envelope, 1)?,
				stream_id: u64_param(envelope, 2)?,
			},
			"setIsDocked" => Self::SetIsDocked {
				docked: bool_param(envelope, 0)?,
			},
			"reattach" => Self::Reattach,
			"getPreferences" => Self::GetPreferences,
			"setPreference" => Self::SetPreference {
				name: str_param(envelope, 0)?,
				value: str_param(envelope, 1)?,
			},
			"removePreference" => Self::RemovePreference {
				name: str_param(envelope, 0)?,
			},
			"clearPreferences" => Self::ClearPreferences,
			"registerExtensionsAPI" => Self::RegisterExtensionsApi {
				origin: str_param(envelope, 0)?,
				script: str_param(envelope, 1)?,
			},
			"save" => Self::SaveToFile {
				url: str_param(envelope, 0)?,
				content: str_param(envelope, 1)?,
				save_as: bool_param(envelope, 2)?,
			},
			"append" => Self::AppendToFile {
				url: str_param(envelope, 0)?,
				content: str_param(envelope, 1)?,
			},
			other => return Err(Error::UnknownMethod(other.to_owned())),
		};
		Ok(command)
	}

	/// The wire method name this command binds.
	pub fn method(&self) -> &'static str {
		match self {
			Self::DispatchProtocolMessage { .. } => "dispatchProtocolMessage",
			Self::CloseWindow => "closeWindow",
			Self::LoadCompleted => "loadCompleted",
			Self::InspectedUrlChanged { .. } => "inspectedURLChanged",
			Self::LoadNetworkResource { .. } => "loadNetworkResource",
			Self::SetIsDocked { .. } => "setIsDocked",
			Self::Reattach => "reattach",
			Self::GetPreferences => "getPreferences",
			Self::SetPreference { .. } => "setPreference",
			Self::RemovePreference { .. } => "removePreference",
			Self::ClearPreferences => "clearPreferences",
			Self::RegisterExtensionsApi { .. } => "registerExtensionsAPI",
			Self::SaveToFile { .. } => "save",
			Self::AppendToFile { .. } => "append",
		}
	}
}

fn str_param(envelope: &Envelope, index: usize) -> Result<String> {
	envelope
		.params
		.get(index)
		.and_then(Value::as_str)
		.map(str::to_owned)
		.ok_or_else(|| invalid(envelope, index, "string"))
}

fn bool_param(envelope: &Envelope, index: usize) -> Result<bool> {
	envelope
		.params
		.get(index)
		.and_then(Value::as_bool)
		.ok_or_else(|| invalid(envelope, index, "bool"))
}

fn u64_param(envelope: &Envelope, index: usize) -> Result<u64> {
	envelope
		.params
		.get(index)
		.and_then(Value::as_u64)
		.ok_or_else(|| invalid(envelope, index, "unsigned integer"))
}

fn invalid(envelope: &Envelope, index: usize, expected: &str) -> Error {
	Error::InvalidParams {
		method: envelope.method.clone(),
		reason: format!("param {index} must be a {expected}"),
	}
}
