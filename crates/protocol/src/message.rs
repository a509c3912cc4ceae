//! Cross-boundary messages emitted by placeholder documents.

use serde::{Deserialize, Serialize};

/// Inbound message from an embedded placeholder page to its host.
///
/// Tagged by the `type` field; unrecognized types fail deserialization and
/// are dropped by the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FrameMessage {
	/// A disconnected placeholder asking for its container to be restored to
	/// the live session address.
	#[serde(rename = "reconnect-request", rename_all = "camelCase")]
	ReconnectRequest {
		/// Opaque id correlating the request with its tracked container.
		tracking_id: String,
	},
}
